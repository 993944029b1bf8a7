use crate::fetch::{FetchError, Forecast, ForecastSource};
use crate::shutdown::Shutdown;
use crate::store::SnapshotStore;
use chrono::{Local, NaiveDateTime, Timelike};
use dashboard_core::offset::Horizon;
use dashboard_core::{Category, Entry, Offset, Snapshot, Temperature};
use log::{info, warn};
use std::sync::Arc;
use std::time::Duration;

const SUN_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Цикл обновления: первая итерация сразу, дальше раз в `interval`.
/// Ожидание прерывается запросом на остановку.
pub(crate) fn run_refresh_loop(
    source: Arc<dyn ForecastSource>,
    store: Arc<SnapshotStore>,
    interval: Duration,
    shutdown: Arc<Shutdown>,
) {
    while !shutdown.is_requested() {
        let now = Local::now().naive_local();

        if let Err(e) = refresh_once(source.as_ref(), &store, now) {
            // предыдущий снимок остаётся в силе до следующего удачного цикла
            warn!("weather refresh failed, keeping previous data: {e}");
        }

        if shutdown.wait_timeout(interval) {
            break;
        }
    }
    info!("shutting down refresh loop");
}

/// Один цикл: fetch -> сборка снимка -> замена целиком.
pub(crate) fn refresh_once(
    source: &dyn ForecastSource,
    store: &SnapshotStore,
    now: NaiveDateTime,
) -> Result<(), FetchError> {
    let forecast = source.fetch()?;
    let snapshot = build_snapshot(&forecast, now)?;
    log_snapshot(&snapshot);
    store.replace(snapshot);
    Ok(())
}

/// Собирает снимок из сырого прогноза. Любая нехватка данных - ошибка всего
/// цикла, частично собранный снимок наружу не отдаётся.
pub(crate) fn build_snapshot(
    forecast: &Forecast,
    now: NaiveDateTime,
) -> Result<Snapshot, FetchError> {
    // почасовой ряд начинается с 00:00, после :30 берём следующий час
    let hour_index = now.hour() as usize + (now.minute() / 30) as usize;
    let daylight = is_daylight(forecast, now)?;

    let mut entries = [Entry::default(); Offset::COUNT];
    for offset in Offset::ALL {
        entries[offset.index()] = match offset.horizon() {
            Horizon::Hours(h) => {
                let i = hour_index + h;
                let temp = at(&forecast.hourly.temperature, "hourly temperature", i)?;
                let code = at(&forecast.hourly.weathercode, "hourly weathercode", i)?;
                Entry {
                    temperature: Temperature::single(temp),
                    category: Category::from_code(code, daylight),
                }
            }
            // для дней день/ночь смысла не имеет
            Horizon::Days(d) => {
                let min = at(&forecast.daily.temperature_min, "daily min temperature", d)?;
                let max = at(&forecast.daily.temperature_max, "daily max temperature", d)?;
                let code = at(&forecast.daily.weathercode, "daily weathercode", d)?;
                Entry {
                    temperature: Temperature::range(min, max),
                    category: Category::from_code(code, true),
                }
            }
        };
    }

    Ok(Snapshot::new(entries, now))
}

fn is_daylight(forecast: &Forecast, now: NaiveDateTime) -> Result<bool, FetchError> {
    let sunrise = parse_sun_time("sunrise", &at(&forecast.daily.sunrise, "sunrise", 0)?)?;
    let sunset = parse_sun_time("sunset", &at(&forecast.daily.sunset, "sunset", 0)?)?;
    Ok(sunrise < now && now < sunset)
}

fn parse_sun_time(field: &'static str, value: &str) -> Result<NaiveDateTime, FetchError> {
    NaiveDateTime::parse_from_str(value, SUN_TIME_FORMAT).map_err(|source| {
        FetchError::Timestamp {
            field,
            value: value.to_string(),
            source,
        }
    })
}

fn at<T: Clone>(series: &[T], name: &'static str, index: usize) -> Result<T, FetchError> {
    series.get(index).cloned().ok_or(FetchError::MissingEntry {
        series: name,
        index,
    })
}

fn log_snapshot(snapshot: &Snapshot) {
    let mut table = String::from("Retrieved weather data:");
    for (offset, entry) in snapshot.iter() {
        table.push_str(&format!(
            "\n  {:>3} | Temperature: {} | Weather: {}",
            offset, entry.temperature, entry.category
        ));
    }
    info!("{table}");
}
