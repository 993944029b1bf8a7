use log::debug;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

// остановка сервера ждёт текущий запрос, поэтому таймауты короткие
pub(crate) const HTTP_TIMEOUT: Duration = Duration::from_secs(5);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(3);

const HOURLY_FIELDS: &str = "temperature_2m,weathercode";
const DAILY_FIELDS: &str = "temperature_2m_max,temperature_2m_min,weathercode,sunrise,sunset";

#[derive(Debug, Error)]
pub(crate) enum FetchError {
    #[error("http request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("upstream returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid forecast json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid {field} timestamp {value:?}: {source}")]
    Timestamp {
        field: &'static str,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("{series} series has no entry at index {index}")]
    MissingEntry { series: &'static str, index: usize },
}

/// Сырой прогноз: почасовые ряды начинаются с 00:00 текущего дня,
/// подневные - с сегодняшнего дня (индекс 0).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct Forecast {
    pub(crate) hourly: HourlySeries,
    pub(crate) daily: DailySeries,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct HourlySeries {
    #[serde(rename = "temperature_2m")]
    pub(crate) temperature: Vec<f64>,
    pub(crate) weathercode: Vec<u16>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct DailySeries {
    #[serde(rename = "temperature_2m_min")]
    pub(crate) temperature_min: Vec<f64>,
    #[serde(rename = "temperature_2m_max")]
    pub(crate) temperature_max: Vec<f64>,
    pub(crate) weathercode: Vec<u16>,
    /// `%Y-%m-%dT%H:%M`, локальное время точки
    pub(crate) sunrise: Vec<String>,
    pub(crate) sunset: Vec<String>,
}

/// Источник прогноза для цикла обновления
pub(crate) trait ForecastSource: Send + Sync {
    fn fetch(&self) -> Result<Forecast, FetchError>;
}

/// Open-Meteo для фиксированной точки
pub(crate) struct OpenMeteoSource {
    client: reqwest::blocking::Client,
    api_url: String,
    latitude: f64,
    longitude: f64,
}

impl OpenMeteoSource {
    pub(crate) fn new(api_url: &str, latitude: f64, longitude: f64) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("dashboard-server/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(HTTP_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            api_url: api_url.to_string(),
            latitude,
            longitude,
        })
    }
}

impl ForecastSource for OpenMeteoSource {
    fn fetch(&self) -> Result<Forecast, FetchError> {
        debug!(
            "fetching forecast: {} lat={} lon={}",
            self.api_url, self.latitude, self.longitude
        );

        let resp = self
            .client
            .get(&self.api_url)
            .query(&[
                ("latitude", self.latitude.to_string()),
                ("longitude", self.longitude.to_string()),
                ("timezone", "auto".to_string()),
                ("hourly", HOURLY_FIELDS.to_string()),
                ("daily", DAILY_FIELDS.to_string()),
            ])
            .send()?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        let body = resp.text()?;
        Ok(serde_json::from_str(&body)?)
    }
}
