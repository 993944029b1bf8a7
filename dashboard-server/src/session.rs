use crate::store::SnapshotStore;
use anyhow::Context;
use chrono::{Local, NaiveDateTime};
use dashboard_core::frame::write_frame;
use dashboard_core::message::{format_time_message, format_weather_message};
use dashboard_core::{SendError, Snapshot};
use log::{debug, info};
use std::io::Write;
use std::net::{SocketAddr, TcpStream};
use std::thread;
use std::time::Duration;

/// Обслуживает одного клиента: TIME, WEATHER, пауза, закрытие.
/// Ошибка прерывает только эту сессию.
pub(crate) fn run_session(
    mut stream: TcpStream,
    peer: SocketAddr,
    store: &SnapshotStore,
    linger: Duration,
) -> anyhow::Result<()> {
    info!("Client '{peer}' connected");

    let snapshot = store.read();
    let now = Local::now().naive_local();

    send_messages(&mut stream, &snapshot, now)
        .with_context(|| format!("send to {peer}"))?;

    // даём медленному клиенту дочитать, прежде чем закрыть
    thread::sleep(linger);

    info!("Closing connection to client '{peer}'");
    stream.shutdown(std::net::Shutdown::Both).ok();
    Ok(())
}

/// Кадры в фиксированном порядке: сначала время, потом погода.
pub(crate) fn send_messages<W: Write>(
    w: &mut W,
    snapshot: &Snapshot,
    now: NaiveDateTime,
) -> Result<(), SendError> {
    for msg in [format_time_message(now), format_weather_message(snapshot)] {
        debug!("Sending message: '{msg}'");
        write_frame(w, &msg)?;
    }
    Ok(())
}
