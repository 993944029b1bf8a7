use anyhow::{bail, Result};
use std::net::SocketAddr;
use std::time::Duration;

pub(crate) const BIND_ADDR: &str = "0.0.0.0:55556";

/// 15 минут
pub(crate) const REFRESH_INTERVAL_SECS: u64 = 15 * 60;

pub(crate) const OPEN_METEO_URL: &str = "https://api.open-meteo.com/v1/forecast";
pub(crate) const LATITUDE: f64 = 51.99;
pub(crate) const LONGITUDE: f64 = 5.09;

/// Сколько держим соединение после последнего кадра
pub(crate) const LINGER_MS: u64 = 1000;

pub(crate) const MAX_CONNECTIONS: usize = 64;

/// Шаг опроса accept: за это время listener замечает остановку
pub(crate) const ACCEPT_TICK: Duration = Duration::from_millis(50);

pub(crate) const TCP_WRITE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub(crate) struct ServerConfig {
    pub(crate) bind: SocketAddr,
    pub(crate) refresh_interval: Duration,
    pub(crate) api_url: String,
    pub(crate) latitude: f64,
    pub(crate) longitude: f64,
    pub(crate) listener: ListenerConfig,
}

/// Настройки accept-цикла и клиентских сессий
#[derive(Debug, Clone, Copy)]
pub(crate) struct ListenerConfig {
    pub(crate) linger: Duration,
    pub(crate) max_connections: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            linger: Duration::from_millis(LINGER_MS),
            max_connections: MAX_CONNECTIONS,
        }
    }
}

impl ServerConfig {
    pub(crate) fn validate(&self) -> Result<()> {
        if self.refresh_interval.is_zero() {
            bail!("refresh interval must be greater than zero");
        }
        if self.listener.max_connections == 0 {
            bail!("max connections must be greater than zero");
        }
        if !(-90.0..=90.0).contains(&self.latitude) {
            bail!("latitude out of range: {}", self.latitude);
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            bail!("longitude out of range: {}", self.longitude);
        }
        if self.api_url.trim().is_empty() {
            bail!("api url is empty");
        }
        Ok(())
    }
}
