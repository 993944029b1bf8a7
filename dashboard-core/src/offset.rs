use std::fmt;

/// Горизонт прогноза. Порядок вариантов = порядок полей в сообщении WEATHER.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Offset {
    /// текущий час
    Now,
    /// +1 час
    H1,
    /// +2 часа
    H2,
    /// +4 часа
    H4,
    /// +8 часов
    H8,
    /// завтра
    D1,
    /// +2 дня
    D2,
    /// +3 дня
    D3,
    /// +4 дня
    D4,
    /// +5 дней
    D5,
}

/// Горизонт в часах или в днях
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Horizon {
    /// сдвиг в почасовом ряду
    Hours(usize),
    /// индекс в подневном ряду (0 - сегодня)
    Days(usize),
}

impl Offset {
    /// Количество горизонтов
    pub const COUNT: usize = 10;

    /// Все горизонты в порядке отправки
    pub const ALL: [Offset; Offset::COUNT] = [
        Offset::Now,
        Offset::H1,
        Offset::H2,
        Offset::H4,
        Offset::H8,
        Offset::D1,
        Offset::D2,
        Offset::D3,
        Offset::D4,
        Offset::D5,
    ];

    /// Позиция в [`Offset::ALL`]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn label(self) -> &'static str {
        match self {
            Offset::Now => "now",
            Offset::H1 => "1h",
            Offset::H2 => "2h",
            Offset::H4 => "4h",
            Offset::H8 => "8h",
            Offset::D1 => "1d",
            Offset::D2 => "2d",
            Offset::D3 => "3d",
            Offset::D4 => "4d",
            Offset::D5 => "5d",
        }
    }

    pub const fn horizon(self) -> Horizon {
        match self {
            Offset::Now => Horizon::Hours(0),
            Offset::H1 => Horizon::Hours(1),
            Offset::H2 => Horizon::Hours(2),
            Offset::H4 => Horizon::Hours(4),
            Offset::H8 => Horizon::Hours(8),
            Offset::D1 => Horizon::Days(1),
            Offset::D2 => Horizon::Days(2),
            Offset::D3 => Horizon::Days(3),
            Offset::D4 => Horizon::Days(4),
            Offset::D5 => Horizon::Days(5),
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Offset::ALL.into_iter().find(|o| o.label() == label)
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}
