//! Operation lock giving the ledger its one-at-a-time semantics.
//!
//! Every service operation, reads included, runs under this single mutex,
//! so effects apply in submission order and no operation observes another's
//! partial write. The lock is cloned into each service at wiring time;
//! clones share the same underlying mutex.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

/// Shared exclusive lock over the ledger's table set.
#[derive(Debug, Clone, Default)]
pub struct OperationLock(Arc<Mutex<()>>);

impl OperationLock {
    /// Create a fresh lock for a new ledger instance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock for the duration of one operation.
    pub async fn acquire(&self) -> MutexGuard<'_, ()> {
        self.0.lock().await
    }
}
