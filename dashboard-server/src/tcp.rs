use crate::config::{ACCEPT_TICK, ListenerConfig, TCP_WRITE_TIMEOUT};
use crate::session::run_session;
use crate::shutdown::Shutdown;
use crate::store::SnapshotStore;
use anyhow::Context;
use log::{debug, info, warn};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;

/// Bind - единственная фатальная ошибка: до запуска accept-цикла.
pub(crate) fn bind(addr: SocketAddr) -> anyhow::Result<TcpListener> {
    let listener =
        TcpListener::bind(addr).with_context(|| format!("bind TCP listener {}", addr))?;
    listener
        .set_nonblocking(true)
        .context("listener.set_nonblocking(true)")?;
    Ok(listener)
}

// accept loop: каждое соединение - в свой поток, accept не ждёт сессий
pub(crate) fn run_tcp_listener(
    listener: TcpListener,
    store: Arc<SnapshotStore>,
    cfg: ListenerConfig,
    shutdown: Arc<Shutdown>,
) -> anyhow::Result<()> {
    let mut session_handles = Vec::new();

    loop {
        reap_finished_sessions(&mut session_handles);

        if shutdown.is_requested() {
            info!("shutting down tcp listener");
            break;
        }

        match listener.accept() {
            Ok((stream, peer)) => {
                if session_handles.len() >= cfg.max_connections {
                    warn!(
                        "rejecting {peer}: {} sessions in flight (max {})",
                        session_handles.len(),
                        cfg.max_connections
                    );
                    drop(stream);
                    continue;
                }

                // ошибка настройки сокета касается только этого клиента
                if let Err(e) = configure_stream(&stream) {
                    warn!("dropping {peer}: socket setup failed: {e}");
                    continue;
                }

                let store = store.clone();
                let linger = cfg.linger;

                let spawned = thread::Builder::new()
                    .name(format!("session-{peer}"))
                    .spawn(move || {
                        if let Err(e) = run_session(stream, peer, &store, linger) {
                            warn!("session {peer} ended with error: {e:#}");
                        }
                    });
                match spawned {
                    Ok(h) => session_handles.push(h),
                    Err(e) => warn!("failed to spawn session for {peer}: {e}"),
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                // нет новых соединений прямо сейчас
                shutdown.wait_timeout(ACCEPT_TICK);
            }
            Err(e) => {
                warn!("accept error: {e}");
                shutdown.wait_timeout(ACCEPT_TICK);
            }
        }
    }

    // уже принятые сессии дорабатывают до конца
    debug!("waiting for {} sessions", session_handles.len());
    for h in session_handles {
        if let Err(panic) = h.join() {
            warn!("session thread panicked: {:?}", panic);
        }
    }

    Ok(())
}

/// Accepted-сокет наследует nonblocking от listener-а, сессии нужен блокирующий.
fn configure_stream(stream: &TcpStream) -> std::io::Result<()> {
    stream.set_nonblocking(false)?;
    stream.set_write_timeout(Some(TCP_WRITE_TIMEOUT))?;
    stream.set_nodelay(true).ok();
    Ok(())
}

fn reap_finished_sessions(handles: &mut Vec<thread::JoinHandle<()>>) {
    let (finished, running): (Vec<_>, Vec<_>) =
        handles.drain(..).partition(|h| h.is_finished());
    *handles = running;

    for h in finished {
        let name = h.thread().name().unwrap_or("session").to_string();
        if let Err(panic) = h.join() {
            warn!("{name} panicked: {:?}", panic);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, NaiveDateTime, TimeDelta};
    use dashboard_core::frame::read_frame;
    use dashboard_core::message::{Message, parse_message};
    use std::time::{Duration, Instant};

    struct Running {
        addr: SocketAddr,
        shutdown: Arc<Shutdown>,
        handle: thread::JoinHandle<anyhow::Result<()>>,
    }

    fn start(cfg: ListenerConfig) -> Running {
        let listener = bind("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = listener.local_addr().unwrap();
        let store = Arc::new(SnapshotStore::new());
        let shutdown = Arc::new(Shutdown::new());

        let handle = {
            let shutdown = shutdown.clone();
            thread::spawn(move || run_tcp_listener(listener, store, cfg, shutdown))
        };

        Running {
            addr,
            shutdown,
            handle,
        }
    }

    fn connect(addr: SocketAddr) -> TcpStream {
        let s = TcpStream::connect(addr).unwrap();
        s.set_read_timeout(Some(Duration::from_secs(5))).unwrap();
        s
    }

    fn cfg(linger_ms: u64, max_connections: usize) -> ListenerConfig {
        ListenerConfig {
            linger: Duration::from_millis(linger_ms),
            max_connections,
        }
    }

    #[test]
    fn client_gets_time_then_weather_then_close() {
        let srv = start(ListenerConfig::default());
        let mut client = connect(srv.addr);

        let before = Local::now().naive_local();
        let time = read_frame(&mut client).unwrap().unwrap();
        let weather = read_frame(&mut client).unwrap().unwrap();
        let after_last = Instant::now();

        let Message::Time(sent) = parse_message(&time).unwrap() else {
            panic!("first frame must be TIME, got {time:?}");
        };
        let minute = |t: NaiveDateTime| t.format("%Y%m%d%H%M").to_string();
        let after = Local::now().naive_local();
        assert!(
            minute(sent) == minute(before) || minute(sent) == minute(after),
            "TIME {sent} is not the current minute"
        );
        assert!(sent <= after && sent > before - TimeDelta::minutes(1));

        let Message::Weather(fields) = parse_message(&weather).unwrap() else {
            panic!("second frame must be WEATHER, got {weather:?}");
        };
        assert_eq!(fields.len(), 10);
        assert!(fields.iter().all(|f| f.temperature == "-9999" && f.category == "unknown"));

        assert_eq!(read_frame(&mut client).unwrap(), None);
        assert!(after_last.elapsed() <= Duration::from_secs(2));

        srv.shutdown.request();
        srv.handle.join().unwrap().unwrap();
    }

    #[test]
    fn slow_session_does_not_block_accept() {
        let srv = start(cfg(1000, 8));
        let started = Instant::now();

        let mut first = connect(srv.addr);
        assert!(read_frame(&mut first).unwrap().is_some());

        // первая сессия ещё спит перед закрытием
        let mut second = connect(srv.addr);
        assert!(read_frame(&mut second).unwrap().is_some());
        assert!(read_frame(&mut second).unwrap().is_some());
        assert!(
            started.elapsed() < Duration::from_millis(900),
            "second client waited for the first one: {:?}",
            started.elapsed()
        );

        srv.shutdown.request();
        srv.handle.join().unwrap().unwrap();
    }

    #[test]
    fn shutdown_twice_stops_accepting_and_lets_sessions_finish() {
        let linger = Duration::from_millis(500);
        let srv = start(cfg(500, 8));

        let mut client = connect(srv.addr);
        assert!(read_frame(&mut client).unwrap().is_some());

        let requested = Instant::now();
        srv.shutdown.request();
        srv.shutdown.request();

        // сессия, принятая до остановки, дописывает всё и закрывает штатно
        assert!(read_frame(&mut client).unwrap().is_some());
        assert_eq!(read_frame(&mut client).unwrap(), None);

        srv.handle.join().unwrap().unwrap();
        assert!(
            requested.elapsed() < Duration::from_secs(1) + linger,
            "listener stopped too late: {:?}",
            requested.elapsed()
        );

        // новых соединений больше не принимают
        drop(client);
        match TcpStream::connect(srv.addr) {
            Err(_) => {}
            Ok(mut late) => {
                late.set_read_timeout(Some(Duration::from_millis(500))).unwrap();
                assert!(!matches!(read_frame(&mut late), Ok(Some(_))));
            }
        }
    }

    #[test]
    fn accepted_stream_is_blocking_with_write_timeout() {
        let listener = bind("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = listener.local_addr().unwrap();
        let _client = TcpStream::connect(addr).unwrap();

        let accepted = loop {
            match listener.accept() {
                Ok((s, _)) => break s,
                Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                    thread::sleep(Duration::from_millis(10));
                }
                Err(e) => panic!("accept failed: {e}"),
            }
        };

        configure_stream(&accepted).unwrap();
        assert_eq!(accepted.write_timeout().unwrap(), Some(TCP_WRITE_TIMEOUT));
        assert!(accepted.nodelay().unwrap());
    }

    /// Подключается, пока не получит первый кадр: слот может быть занят.
    fn connect_served(addr: SocketAddr) -> (TcpStream, String) {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            let mut s = connect(addr);
            if let Some(first) = read_frame(&mut s).unwrap() {
                return (s, first);
            }
            assert!(Instant::now() < deadline, "listener stopped serving");
            thread::sleep(Duration::from_millis(50));
        }
    }

    #[test]
    fn listener_keeps_serving_after_vanished_and_rejected_clients() {
        let srv = start(cfg(500, 1));

        // клиенты, исчезающие сразу после connect
        for _ in 0..5 {
            drop(TcpStream::connect(srv.addr).unwrap());
        }

        let (mut busy, time) = connect_served(srv.addr);
        assert!(time.starts_with("TIME|"));

        // сверх лимита - закрыто без кадров
        let mut rejected = connect(srv.addr);
        assert_eq!(read_frame(&mut rejected).unwrap(), None);

        assert!(read_frame(&mut busy).unwrap().unwrap().starts_with("WEATHER|"));
        assert_eq!(read_frame(&mut busy).unwrap(), None);

        // после reap слот снова свободен
        let (mut late, time) = connect_served(srv.addr);
        assert!(time.starts_with("TIME|"));
        assert!(read_frame(&mut late).unwrap().unwrap().starts_with("WEATHER|"));

        srv.shutdown.request();
        srv.handle.join().unwrap().unwrap();
    }

    #[test]
    fn connections_over_limit_are_closed_without_frames() {
        let srv = start(cfg(1000, 1));

        let mut first = connect(srv.addr);
        assert!(read_frame(&mut first).unwrap().is_some());

        let mut second = connect(srv.addr);
        assert_eq!(read_frame(&mut second).unwrap(), None);

        // первая сессия не пострадала
        assert!(read_frame(&mut first).unwrap().is_some());
        assert_eq!(read_frame(&mut first).unwrap(), None);

        srv.shutdown.request();
        srv.handle.join().unwrap().unwrap();
    }
}
