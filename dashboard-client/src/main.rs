//! Точка входа `dashboard-client`.
//!
//! Диагностический клиент: ведёт себя как дисплей - подключается, читает
//! кадры, пока сервер не закроет соединение, и печатает их в stdout.
//! Ненулевой код выхода - нарушение протокола или ошибка соединения.

mod cli;
mod tcp;

use std::time::Duration;

use clap::Parser;
use log::info;

fn main() -> anyhow::Result<()> {
    // Логи через RUST_LOG=info/debug
    env_logger::init();

    let args = cli::Args::parse();
    args.validate()?;

    let server = args.server_socket_addr()?;
    info!("Connecting to {server}");

    let stdout = std::io::stdout();
    let frames = tcp::receive_all(
        server,
        Duration::from_secs(args.timeout_secs),
        &mut stdout.lock(),
    )?;

    info!("received {frames} frames");
    Ok(())
}
