//! Точка входа `dashboard-server`.
//!
//! Жизненный цикл:
//! - парсинг CLI и bind TCP-порта (ошибка bind - единственная фатальная)
//! - поток обновления прогноза: сразу при старте, дальше по интервалу
//! - accept-цикл: каждый клиент получает TIME + WEATHER в своём потоке
//! - корректная остановка по `Ctrl+C` / SIGTERM

mod cli;
mod config;
mod fetch;
mod refresh;
mod session;
mod shutdown;
mod store;
mod tcp;

use std::sync::Arc;
use std::thread;

use clap::Parser;
use log::{info, warn};

use crate::fetch::{ForecastSource, OpenMeteoSource};
use crate::shutdown::Shutdown;
use crate::store::SnapshotStore;

fn main() -> anyhow::Result<()> {
    // Логи через RUST_LOG=debug/trace, по умолчанию info
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cfg = cli::Args::parse().into_config()?;

    let shutdown = Arc::new(Shutdown::new());

    // Ctrl+C / SIGTERM => запрос на остановку
    {
        let shutdown = shutdown.clone();
        ctrlc::set_handler(move || {
            info!("signal received, stopping server...");
            shutdown.request();
        })?;
    }

    let listener = tcp::bind(cfg.bind)?;
    info!("Started server on {}", cfg.bind);

    let store = Arc::new(SnapshotStore::new());
    let source: Arc<dyn ForecastSource> = Arc::new(OpenMeteoSource::new(
        &cfg.api_url,
        cfg.latitude,
        cfg.longitude,
    )?);

    let refresh = {
        let store = store.clone();
        let shutdown = shutdown.clone();
        let interval = cfg.refresh_interval;
        thread::Builder::new()
            .name("refresh".into())
            .spawn(move || refresh::run_refresh_loop(source, store, interval, shutdown))?
    };

    let result = tcp::run_tcp_listener(listener, store, cfg.listener, shutdown.clone());

    // если listener упал сам, останавливаем и обновление
    shutdown.request();
    if let Err(panic) = refresh.join() {
        warn!("refresh thread panicked: {:?}", panic);
    }

    info!("server stopped");
    result
}
