//! # dashboard-core
//!
//! Базовые типы и протокол для Dashboard Server / Dashboard Client.
//!
//! Этот крейт содержит:
//!
//! - [`frame`] — кадры с 4-значным ASCII заголовком длины
//! - [`message`] — сообщения `TIME` / `WEATHER` / `STATUS` внутри кадров
//! - [`offset`] — горизонты прогноза (`now`, `1h`, ..., `5d`)
//! - [`category`] — категории погоды (weather code -> иконка)
//! - [`snapshot`] — кэшируемый снимок прогноза
//! - [`error`] — типы ошибок, которые возвращают компоненты `dashboard-core`
//!
//! ## Быстрый пример: кадр с сообщением `TIME`
//!
//! ```rust
//! use dashboard_core::frame::{read_frame, write_frame};
//! use std::io::Cursor;
//!
//! let mut wire = Vec::new();
//! write_frame(&mut wire, "TIME|01-02-2024 10:05").unwrap();
//! assert_eq!(&wire[..4], b"0021");
//!
//! let payload = read_frame(&mut Cursor::new(wire)).unwrap();
//! assert_eq!(payload.as_deref(), Some("TIME|01-02-2024 10:05"));
//! ```
//!
//! ## Пример: сообщение `WEATHER` до первого обновления
//!
//! ```rust
//! use dashboard_core::message::format_weather_message;
//! use dashboard_core::Snapshot;
//!
//! let msg = format_weather_message(&Snapshot::unknown());
//! assert!(msg.starts_with("WEATHER|-9999|unknown|-9999|unknown"));
//! ```
//!
//! ## Дизайн
//!
//! `dashboard-core` - общая зависимость для сервера, клиента и тестов.
//! Здесь только чистые типы и кодирование поверх `Read`/`Write`,
//! без потоков и сети.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Кадры протокола (заголовок длины + ASCII payload).
pub mod frame;

/// Сообщения внутри кадров.
pub mod message;

/// Горизонты прогноза.
pub mod offset;

/// Категории погоды.
pub mod category;

/// Снимок прогноза.
pub mod snapshot;

/// Ошибки `dashboard-core`.
pub mod error;

/// Общие константы
mod constants;
pub use constants::{DEFAULT_PORT, HEADER_LEN, MAX_PAYLOAD_LEN, TIME_FORMAT};

// --- Re-exports (публичный фасад API) ---

pub use crate::category::Category;
pub use crate::error::{EncodeError, MessageError, ProtocolError, SendError};
pub use crate::message::Message;
pub use crate::offset::Offset;
pub use crate::snapshot::{Entry, Snapshot, Temperature};
