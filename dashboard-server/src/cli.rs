use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;

use crate::config::{self, ListenerConfig, ServerConfig};

/// Dashboard Server - периодически забирает прогноз погоды и отдаёт
/// последний снимок каждому подключившемуся дисплею.
#[derive(Parser, Debug, Clone)]
#[command(name = "dashboard-server", version, about)]
pub(crate) struct Args {
    /// TCP bind address, например 0.0.0.0:55556
    #[arg(long, default_value = config::BIND_ADDR)]
    pub(crate) bind: SocketAddr,

    /// Интервал обновления прогноза, секунды
    #[arg(long, default_value_t = config::REFRESH_INTERVAL_SECS)]
    pub(crate) interval_secs: u64,

    /// Широта точки прогноза
    #[arg(long, default_value_t = config::LATITUDE, allow_negative_numbers = true)]
    pub(crate) latitude: f64,

    /// Долгота точки прогноза
    #[arg(long, default_value_t = config::LONGITUDE, allow_negative_numbers = true)]
    pub(crate) longitude: f64,

    /// Endpoint Open-Meteo forecast API
    #[arg(long, default_value = config::OPEN_METEO_URL)]
    pub(crate) api_url: String,

    /// Пауза перед закрытием соединения после последнего кадра, мс
    #[arg(long, default_value_t = config::LINGER_MS)]
    pub(crate) linger_ms: u64,

    /// Максимум одновременно обслуживаемых клиентов
    #[arg(long, default_value_t = config::MAX_CONNECTIONS)]
    pub(crate) max_connections: usize,
}

impl Args {
    pub(crate) fn into_config(self) -> anyhow::Result<ServerConfig> {
        let cfg = ServerConfig {
            bind: self.bind,
            refresh_interval: Duration::from_secs(self.interval_secs),
            api_url: self.api_url,
            latitude: self.latitude,
            longitude: self.longitude,
            listener: ListenerConfig {
                linger: Duration::from_millis(self.linger_ms),
                max_connections: self.max_connections,
            },
        };
        cfg.validate()?;
        Ok(cfg)
    }
}
