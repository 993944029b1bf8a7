use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Флаг остановки процесса.
///
/// Кроме флага держит канал без сообщений: при первом `request()` отправитель
/// дропается, и все ждущие в `wait_timeout` просыпаются сразу (Disconnected),
/// не дожидаясь конца таймаута.
pub(crate) struct Shutdown {
    flag: AtomicBool,
    trigger: Mutex<Option<Sender<()>>>,
    signal: Receiver<()>,
}

impl Shutdown {
    pub(crate) fn new() -> Self {
        let (tx, rx) = crossbeam_channel::bounded(0);
        Self {
            flag: AtomicBool::new(false),
            trigger: Mutex::new(Some(tx)),
            signal: rx,
        }
    }

    /// Идемпотентно, можно звать из обработчика сигнала и из любого потока.
    pub(crate) fn request(&self) {
        self.flag.store(true, Ordering::SeqCst);

        let mut trigger = match self.trigger.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        // drop отправителя будит всех ждущих
        trigger.take();
    }

    pub(crate) fn is_requested(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Спит не дольше `timeout`. `true` - пришёл запрос на остановку.
    pub(crate) fn wait_timeout(&self, timeout: Duration) -> bool {
        if self.is_requested() {
            return true;
        }
        match self.signal.recv_timeout(timeout) {
            Err(RecvTimeoutError::Timeout) => self.is_requested(),
            // сообщений никто не шлёт, остаётся только Disconnected
            Ok(()) | Err(RecvTimeoutError::Disconnected) => true,
        }
    }
}
