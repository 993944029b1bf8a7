//! Кадры вида `[4 ASCII-цифры длины][payload]`, например `0012TIME|...`.

use std::io::{self, Read, Write};

use crate::constants::{HEADER_LEN, MAX_PAYLOAD_LEN};
use crate::error::{EncodeError, ProtocolError, SendError};

/// Собирает кадр: заголовок с длиной (дополненный нулями) + payload.
pub fn encode_frame(payload: &str) -> Result<Vec<u8>, EncodeError> {
    if !payload.is_ascii() {
        return Err(EncodeError::NonAscii);
    }
    if payload.len() > MAX_PAYLOAD_LEN {
        return Err(EncodeError::TooLong(payload.len()));
    }

    let mut out = Vec::with_capacity(HEADER_LEN + payload.len());
    out.extend_from_slice(format!("{:04}", payload.len()).as_bytes());
    out.extend_from_slice(payload.as_bytes());
    Ok(out)
}

/// Кодирует и пишет один кадр целиком.
pub fn write_frame<W: Write>(w: &mut W, payload: &str) -> Result<(), SendError> {
    let bytes = encode_frame(payload)?;
    w.write_all(&bytes)?;
    w.flush()?;
    Ok(())
}

/// Читает заголовок кадра.
///
/// `Ok(None)` - собеседник закрыл соединение до первого байта заголовка,
/// это штатное завершение, а не ошибка протокола.
pub fn read_frame_header<R: Read>(r: &mut R) -> Result<Option<usize>, ProtocolError> {
    let mut buf = [0u8; HEADER_LEN];
    let got = read_full(r, &mut buf)?;

    if got == 0 {
        return Ok(None);
    }
    if got < HEADER_LEN {
        return Err(ProtocolError::ShortHeader { got });
    }
    if !buf.iter().all(u8::is_ascii_digit) {
        return Err(ProtocolError::BadHeader(
            String::from_utf8_lossy(&buf).into_owned(),
        ));
    }

    // 4 цифры всегда влезают в usize
    let len = buf
        .iter()
        .fold(0usize, |acc, d| acc * 10 + usize::from(d - b'0'));
    Ok(Some(len))
}

/// Читает ровно `len` байт payload.
pub fn read_frame_payload<R: Read>(r: &mut R, len: usize) -> Result<String, ProtocolError> {
    let mut buf = vec![0u8; len];
    let got = read_full(r, &mut buf)?;
    if got < len {
        return Err(ProtocolError::ShortPayload { expected: len, got });
    }
    if !buf.is_ascii() {
        return Err(ProtocolError::NonAscii);
    }

    // ASCII - подмножество UTF-8
    String::from_utf8(buf).map_err(|_| ProtocolError::NonAscii)
}

/// Заголовок + payload. `Ok(None)` - штатное закрытие соединения.
pub fn read_frame<R: Read>(r: &mut R) -> Result<Option<String>, ProtocolError> {
    match read_frame_header(r)? {
        Some(len) => read_frame_payload(r, len).map(Some),
        None => Ok(None),
    }
}

/// Как `read_exact`, но возвращает, сколько байт успели прочитать до EOF.
fn read_full<R: Read>(r: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match r.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
