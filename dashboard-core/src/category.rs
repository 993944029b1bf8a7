use std::fmt;

/// Категория погоды для иконки на дисплее (закрытый набор).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Category {
    Sun,
    Moon,
    SunCloud,
    MoonCloud,
    Cloud,
    Fog,
    Drizzle,
    Hail,
    Rain,
    Snow,
    Thunder,
    #[default]
    Unknown,
}

impl Category {
    /// Переводит WMO weather code в категорию.
    ///
    /// `daylight` выбирает между "дневным" и "ночным" вариантом
    /// (sun/moon, sun_cloud/moon_cloud). Неизвестные коды -> `Unknown`.
    pub fn from_code(code: u16, daylight: bool) -> Self {
        match code {
            0 if daylight => Category::Sun,
            0 => Category::Moon,
            1 if daylight => Category::SunCloud,
            1 => Category::MoonCloud,
            2 | 3 => Category::Cloud,
            45 | 48 => Category::Fog,
            51 | 53 | 55 => Category::Drizzle,
            56 | 57 | 66 | 67 => Category::Hail,
            61 | 63 | 65 | 80 | 81 | 82 => Category::Rain,
            71 | 73 | 75 | 77 | 85 | 86 => Category::Snow,
            95 | 96 | 99 => Category::Thunder,
            _ => Category::Unknown,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Category::Sun => "sun",
            Category::Moon => "moon",
            Category::SunCloud => "sun_cloud",
            Category::MoonCloud => "moon_cloud",
            Category::Cloud => "cloud",
            Category::Fog => "fog",
            Category::Drizzle => "drizzle",
            Category::Hail => "hail",
            Category::Rain => "rain",
            Category::Snow => "snow",
            Category::Thunder => "thunder",
            Category::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_and_mostly_clear_depend_on_daylight() {
        assert_eq!(Category::from_code(0, true), Category::Sun);
        assert_eq!(Category::from_code(0, false), Category::Moon);
        assert_eq!(Category::from_code(1, true), Category::SunCloud);
        assert_eq!(Category::from_code(1, false), Category::MoonCloud);
    }

    #[test]
    fn other_codes_ignore_daylight() {
        for daylight in [true, false] {
            assert_eq!(Category::from_code(3, daylight), Category::Cloud);
            assert_eq!(Category::from_code(48, daylight), Category::Fog);
            assert_eq!(Category::from_code(55, daylight), Category::Drizzle);
            assert_eq!(Category::from_code(57, daylight), Category::Hail);
            assert_eq!(Category::from_code(67, daylight), Category::Hail);
            assert_eq!(Category::from_code(82, daylight), Category::Rain);
            assert_eq!(Category::from_code(86, daylight), Category::Snow);
            assert_eq!(Category::from_code(99, daylight), Category::Thunder);
        }
    }

    #[test]
    fn unmapped_codes_are_unknown() {
        assert_eq!(Category::from_code(4, true), Category::Unknown);
        assert_eq!(Category::from_code(100, false), Category::Unknown);
        assert_eq!(Category::default().as_str(), "unknown");
    }

    #[test]
    fn wire_names() {
        assert_eq!(Category::SunCloud.to_string(), "sun_cloud");
        assert_eq!(Category::MoonCloud.to_string(), "moon_cloud");
    }
}
