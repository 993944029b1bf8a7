/// Порт по умолчанию, на который ходит дисплей
pub const DEFAULT_PORT: u16 = 55556;

/// Длина заголовка кадра: 4 ASCII-цифры
pub const HEADER_LEN: usize = 4;

/// Максимальная длина payload, которую можно записать в заголовок
pub const MAX_PAYLOAD_LEN: usize = 9999;

/// Формат даты/времени в сообщении TIME (дисплей обновляется раз в минуту)
pub const TIME_FORMAT: &str = "%d-%m-%Y %H:%M";
