use dashboard_core::frame::{read_frame_header, read_frame_payload};
use dashboard_core::message::{Message, parse_message};
use log::{debug, warn};
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::time::Duration;

/// Подключается и печатает сообщения, пока сервер не закроет соединение.
/// Возвращает количество прочитанных кадров.
pub(crate) fn receive_all(
    server: SocketAddr,
    read_timeout: Duration,
    out: &mut impl Write,
) -> anyhow::Result<usize> {
    let mut stream = TcpStream::connect(server)?;
    stream.set_read_timeout(Some(read_timeout)).ok();

    read_messages(&mut stream, out)
}

pub(crate) fn read_messages<R: Read>(r: &mut R, out: &mut impl Write) -> anyhow::Result<usize> {
    let mut frames = 0;

    loop {
        // размер всегда дополнен до 4 байт
        let Some(size) = read_frame_header(r)? else {
            writeln!(out, "Connection closed by server")?;
            return Ok(frames);
        };
        debug!("Going to read {size} bytes");

        let payload = read_frame_payload(r, size)?;
        frames += 1;
        print_message(&payload, out)?;
    }
}

fn print_message(payload: &str, out: &mut impl Write) -> std::io::Result<()> {
    match parse_message(payload) {
        Ok(Message::Time(at)) => writeln!(out, "TIME {}", at.format("%d-%m-%Y %H:%M")),
        Ok(Message::Weather(fields)) => {
            writeln!(out, "WEATHER")?;
            for f in fields {
                writeln!(
                    out,
                    "  {:>3} | Temperature: {} | Weather: {}",
                    f.offset, f.temperature, f.category
                )?;
            }
            Ok(())
        }
        Ok(Message::Status(fields)) => writeln!(out, "STATUS {}", fields.join(" ")),
        Err(e) => {
            // кадр корректный, содержимое - нет: печатаем как есть
            warn!("unrecognized message: {e}");
            writeln!(out, "Received message {payload}")
        }
    }
}
