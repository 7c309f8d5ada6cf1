//! Per-hunt mutual exclusion.
//!
//! Submissions read progress, decide, then write it back. Two requests for
//! the same hunt interleaving that sequence would lose an update, so
//! handlers hold the hunt's lock for the whole read-decide-write span.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use uuid::Uuid;

use crate::error::DomainError;

/// Registry of one async lock per hunt.
#[derive(Debug, Default)]
pub struct HuntLocks {
    locks: Mutex<HashMap<Uuid, Arc<AsyncMutex<()>>>>,
}

impl HuntLocks {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive access to `hunt_id`. Released when the guard drops.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the registry mutex is poisoned.
    pub async fn acquire(&self, hunt_id: Uuid) -> Result<OwnedMutexGuard<()>, DomainError> {
        let lock = {
            let mut locks = self
                .locks
                .lock()
                .map_err(|e| DomainError::Infrastructure(format!("hunt lock registry poisoned: {e}")))?;
            // Drop entries nobody holds or waits on.
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            Arc::clone(locks.entry(hunt_id).or_default())
        };
        Ok(lock.lock_owned().await)
    }
}
