use std::net::{SocketAddr, ToSocketAddrs};

use anyhow::{bail, Result};
use clap::Parser;

/// Dashboard Client - подключается к dashboard-server, читает кадры
/// до закрытия соединения сервером и печатает каждое сообщение.
#[derive(Parser, Debug, Clone)]
#[command(name = "dashboard-client", version, about)]
pub(crate) struct Args {
    /// TCP адрес dashboard-server, например 127.0.0.1:55556 или host.example.com:55556
    #[arg(long, default_value = "127.0.0.1:55556")]
    pub(crate) server: String,

    /// Таймаут чтения, секунды
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    pub(crate) timeout_secs: u64,
}

impl Args {
    pub(crate) fn validate(&self) -> Result<()> {
        if self.server.trim().is_empty() {
            bail!("--server is empty");
        }
        if !self.server.contains(':') {
            bail!("--server must look like HOST:PORT (got: {})", self.server);
        }
        Ok(())
    }

    pub(crate) fn server_socket_addr(&self) -> std::io::Result<SocketAddr> {
        // Берём первый результат резолвинга
        self.server.to_socket_addrs()?.next().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "no addresses resolved")
        })
    }
}
