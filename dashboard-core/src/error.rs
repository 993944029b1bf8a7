use std::io;

use thiserror::Error;

/// Ошибки чтения кадров из потока
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Соединение закрыто посреди заголовка
    #[error("short header: got {got} of 4 bytes")]
    ShortHeader {
        /// сколько байт успели прочитать
        got: usize,
    },

    /// В заголовке не только десятичные цифры
    #[error("invalid header: {0:?}")]
    BadHeader(String),

    /// Соединение закрыто посреди payload
    #[error("short payload: got {got} of {expected} bytes")]
    ShortPayload {
        /// заявленная длина
        expected: usize,
        /// сколько байт успели прочитать
        got: usize,
    },

    /// Payload содержит не-ASCII байты
    #[error("payload is not ascii")]
    NonAscii,

    /// Ошибка ввода-вывода
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Ошибки кодирования кадра
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodeError {
    /// Длина не влезает в 4 цифры заголовка
    #[error("payload too long: {0} bytes (max 9999)")]
    TooLong(usize),

    /// Payload содержит не-ASCII символы
    #[error("payload is not ascii")]
    NonAscii,
}

/// Ошибки отправки кадра
#[derive(Debug, Error)]
pub enum SendError {
    /// Кадр не удалось собрать
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// Кадр не удалось записать в поток
    #[error("write failed: {0}")]
    Io(#[from] io::Error),
}

/// Ошибки разбора payload сообщения
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MessageError {
    /// Пустое сообщение
    #[error("empty message")]
    Empty,

    /// Неизвестный тип сообщения
    #[error("unknown message type: {0}")]
    UnknownType(String),

    /// Неверное количество полей
    #[error("{kind}: expected {expected} fields, got {got}")]
    FieldCount {
        /// тип сообщения
        kind: &'static str,
        /// ожидаемое количество полей
        expected: usize,
        /// фактическое количество полей
        got: usize,
    },

    /// Неверный формат даты/времени
    #[error("invalid timestamp: {0:?}")]
    BadTimestamp(String),
}
