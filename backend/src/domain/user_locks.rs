//! Per-user async locks shared by every service that writes a user's
//! occurrences.
//!
//! An entry lives in the registry only while some task holds or waits for
//! that user's lock; the last guard to drop removes it.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

type Registry = Arc<Mutex<HashMap<String, Arc<AsyncMutex<()>>>>>;

#[derive(Clone, Default)]
pub struct UserLocks {
    registry: Registry,
}

/// Held for the duration of one user's critical section
pub struct UserLockGuard {
    guard: Option<OwnedMutexGuard<()>>,
    user_id: String,
    registry: Registry,
}

impl UserLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `user_id`
    pub async fn lock(&self, user_id: &str) -> UserLockGuard {
        let mutex = {
            let mut registry = self.registry.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            registry.entry(user_id.to_string()).or_default().clone()
        };

        UserLockGuard {
            guard: Some(mutex.lock_owned().await),
            user_id: user_id.to_string(),
            registry: self.registry.clone(),
        }
    }

    /// Number of users with a live lock entry
    pub fn len(&self) -> usize {
        self.registry.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Drop for UserLockGuard {
    fn drop(&mut self) {
        // Release first so our clone no longer counts
        self.guard.take();

        let mut registry = self.registry.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let unused = registry
            .get(&self.user_id)
            .map(|mutex| Arc::strong_count(mutex) == 1)
            .unwrap_or(false);
        if unused {
            registry.remove(&self.user_id);
        }
    }
}
