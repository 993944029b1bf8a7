use dashboard_core::Snapshot;
use log::warn;
use std::sync::{Arc, RwLock};

/// Последний снимок прогноза.
///
/// Снимок неизменяемый и лежит за `Arc`: `read()` только клонирует указатель
/// под read-локом, `replace()` подменяет указатель целиком под write-локом.
/// Поэтому читатель видит либо старый снимок, либо новый, но не смесь.
pub(crate) struct SnapshotStore {
    current: RwLock<Arc<Snapshot>>,
}

impl SnapshotStore {
    /// Стартовое состояние: все горизонты `unknown` / `-9999`
    pub(crate) fn new() -> Self {
        Self::with_snapshot(Snapshot::unknown())
    }

    pub(crate) fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            current: RwLock::new(Arc::new(snapshot)),
        }
    }

    pub(crate) fn read(&self) -> Arc<Snapshot> {
        let guard = match self.current.read() {
            Ok(g) => g,
            Err(poisoned) => {
                warn!("snapshot lock poisoned; continuing");
                poisoned.into_inner()
            }
        };
        Arc::clone(&guard)
    }

    pub(crate) fn replace(&self, snapshot: Snapshot) {
        let snapshot = Arc::new(snapshot);
        let mut guard = match self.current.write() {
            Ok(g) => g,
            Err(poisoned) => {
                warn!("snapshot lock poisoned; continuing");
                poisoned.into_inner()
            }
        };
        *guard = snapshot;
    }
}
