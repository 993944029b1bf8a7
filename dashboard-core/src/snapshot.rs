use std::fmt;
use std::ops::Index;

use chrono::NaiveDateTime;

use crate::category::Category;
use crate::offset::Offset;

/// Значение температуры, которое ещё ни разу не получали
pub const UNKNOWN_TEMPERATURE: i64 = -9999;

/// Температура для одного горизонта
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Temperature {
    /// данных ещё нет (на проводе `-9999`)
    #[default]
    Unknown,
    /// почасовой горизонт: одно округлённое значение
    Single(i64),
    /// подневной горизонт: `min-max`
    Range {
        /// минимум за день
        min: i64,
        /// максимум за день
        max: i64,
    },
}

impl Temperature {
    /// Округляет до целого (половины - от нуля).
    pub fn single(value: f64) -> Self {
        Temperature::Single(value.round() as i64)
    }

    /// Каждая граница округляется отдельно.
    pub fn range(min: f64, max: f64) -> Self {
        Temperature::Range {
            min: min.round() as i64,
            max: max.round() as i64,
        }
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Temperature::Unknown => write!(f, "{UNKNOWN_TEMPERATURE}"),
            Temperature::Single(t) => write!(f, "{t}"),
            Temperature::Range { min, max } => write!(f, "{min}-{max}"),
        }
    }
}

/// Прогноз для одного горизонта
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Entry {
    pub temperature: Temperature,
    pub category: Category,
}

/// Полный набор значений, который раздаётся клиентам.
///
/// Для каждого [`Offset`] всегда есть запись: до первого успешного
/// обновления это `Unknown`/`unknown`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Snapshot {
    entries: [Entry; Offset::COUNT],
    updated_at: Option<NaiveDateTime>,
}

impl Snapshot {
    /// Снимок без данных
    pub fn unknown() -> Self {
        Self::default()
    }

    /// Снимок, собранный целиком в момент `updated_at`
    pub fn new(entries: [Entry; Offset::COUNT], updated_at: NaiveDateTime) -> Self {
        Self {
            entries,
            updated_at: Some(updated_at),
        }
    }

    pub fn get(&self, offset: Offset) -> &Entry {
        &self.entries[offset.index()]
    }

    /// Когда снимок был собран; `None` - ещё ни одного успешного обновления
    pub fn updated_at(&self) -> Option<NaiveDateTime> {
        self.updated_at
    }

    /// Пары (горизонт, запись) в порядке отправки
    pub fn iter(&self) -> impl Iterator<Item = (Offset, &Entry)> {
        Offset::ALL.into_iter().zip(self.entries.iter())
    }
}

impl Index<Offset> for Snapshot {
    type Output = Entry;

    fn index(&self, offset: Offset) -> &Entry {
        self.get(offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_snapshot_has_sentinels_for_every_offset() {
        let s = Snapshot::unknown();
        assert_eq!(s.updated_at(), None);
        for (_, e) in s.iter() {
            assert_eq!(e.temperature.to_string(), "-9999");
            assert_eq!(e.category.as_str(), "unknown");
        }
    }

    #[test]
    fn temperatures_are_rounded() {
        assert_eq!(Temperature::single(10.4).to_string(), "10");
        assert_eq!(Temperature::single(10.5).to_string(), "11");
        assert_eq!(Temperature::single(-0.6).to_string(), "-1");
        assert_eq!(Temperature::range(3.4, 9.6).to_string(), "3-10");
        assert_eq!(Temperature::range(-3.5, -1.2).to_string(), "-4--1");
    }

    #[test]
    fn index_by_offset() {
        let mut entries = [Entry::default(); Offset::COUNT];
        entries[Offset::H4.index()] = Entry {
            temperature: Temperature::Single(7),
            category: Category::Rain,
        };
        let at = chrono::NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let s = Snapshot::new(entries, at);

        assert_eq!(s[Offset::H4].category, Category::Rain);
        assert_eq!(s[Offset::H2], Entry::default());
        assert_eq!(s.updated_at(), Some(at));
    }
}
