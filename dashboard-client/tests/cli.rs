use assert_cmd::Command;
use dashboard_core::frame::write_frame;
use predicates::prelude::*;
use std::io::Write;
use std::net::TcpListener;
use std::thread;

/// Одноразовый сервер: принимает одно соединение, пишет байты и закрывает.
fn serve_once(bytes: Vec<u8>) -> (String, thread::JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap().to_string();

    let h = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        stream.write_all(&bytes).unwrap();
    });

    (addr, h)
}

#[test]
fn prints_messages_and_exits_zero_on_server_close() {
    let mut wire = Vec::new();
    write_frame(&mut wire, "TIME|16-10-2026 08:15").unwrap();
    write_frame(
        &mut wire,
        "WEATHER|10|cloud|11|rain|12|rain|14|fog|18|moon|3-10|sun|1-4|snow|2-6|cloud|0-3|thunder|5-9|sun_cloud",
    )
    .unwrap();
    let (addr, server) = serve_once(wire);

    Command::cargo_bin("dashboard-client")
        .unwrap()
        .args(["--server", &addr, "--timeout-secs", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("TIME 16-10-2026 08:15"))
        .stdout(predicate::str::contains("  now | Temperature: 10 | Weather: cloud"))
        .stdout(predicate::str::contains("   1d | Temperature: 3-10 | Weather: sun"))
        .stdout(predicate::str::contains("Connection closed by server"));

    server.join().unwrap();
}

#[test]
fn exits_non_zero_on_broken_frame() {
    let (addr, server) = serve_once(b"12xy".to_vec());

    Command::cargo_bin("dashboard-client")
        .unwrap()
        .args(["--server", &addr, "--timeout-secs", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid header"));

    server.join().unwrap();
}

#[test]
fn rejects_server_without_port() {
    Command::cargo_bin("dashboard-client")
        .unwrap()
        .args(["--server", "localhost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("HOST:PORT"));
}
