//! Текстовые сообщения внутри кадров: `<TYPE>|<field>|<field>|...`.

use chrono::NaiveDateTime;

use crate::constants::TIME_FORMAT;
use crate::error::MessageError;
use crate::offset::Offset;
use crate::snapshot::Snapshot;

pub const SEPARATOR: char = '|';

/// Разобранное сообщение (поля заимствуются из payload)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message<'a> {
    /// `TIME|DD-MM-YYYY HH:MM`
    Time(NaiveDateTime),
    /// `WEATHER|temp|code|...` - пары в порядке [`Offset::ALL`]
    Weather(Vec<WeatherField<'a>>),
    /// зарезервировано: поля не интерпретируются
    Status(Vec<&'a str>),
}

/// Одна пара `temp|code` из сообщения WEATHER
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeatherField<'a> {
    pub offset: Offset,
    pub temperature: &'a str,
    pub category: &'a str,
}

/// `TIME|01-02-2024 10:05` - секунды не передаём.
pub fn format_time_message(now: NaiveDateTime) -> String {
    format!("TIME{SEPARATOR}{}", now.format(TIME_FORMAT))
}

/// `WEATHER|{temp_now}|{code_now}|...|{temp_5d}|{code_5d}`
pub fn format_weather_message(snapshot: &Snapshot) -> String {
    let mut msg = String::from("WEATHER");
    for (_, entry) in snapshot.iter() {
        msg.push(SEPARATOR);
        msg.push_str(&entry.temperature.to_string());
        msg.push(SEPARATOR);
        msg.push_str(entry.category.as_str());
    }
    msg
}

pub fn parse_message(payload: &str) -> Result<Message<'_>, MessageError> {
    if payload.is_empty() {
        return Err(MessageError::Empty);
    }

    let mut parts = payload.split(SEPARATOR);
    // split всегда отдаёт хотя бы один элемент
    let kind = parts.next().unwrap_or_default();
    let fields: Vec<&str> = parts.collect();

    match kind {
        "TIME" => {
            let [raw] = fields.as_slice() else {
                return Err(MessageError::FieldCount {
                    kind: "TIME",
                    expected: 1,
                    got: fields.len(),
                });
            };
            NaiveDateTime::parse_from_str(raw, TIME_FORMAT)
                .map(Message::Time)
                .map_err(|_| MessageError::BadTimestamp(raw.to_string()))
        }
        "WEATHER" => {
            if fields.len() != Offset::COUNT * 2 {
                return Err(MessageError::FieldCount {
                    kind: "WEATHER",
                    expected: Offset::COUNT * 2,
                    got: fields.len(),
                });
            }
            let pairs = Offset::ALL
                .into_iter()
                .zip(fields.chunks_exact(2))
                .map(|(offset, pair)| WeatherField {
                    offset,
                    temperature: pair[0],
                    category: pair[1],
                })
                .collect();
            Ok(Message::Weather(pairs))
        }
        "STATUS" => Ok(Message::Status(fields)),
        other => Err(MessageError::UnknownType(other.to_string())),
    }
}
