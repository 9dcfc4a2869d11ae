//! Unique identifier generation for expenses and occurrences.

use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Source of unique identifiers, injected so tests can assert on exact ids
pub trait IdProvider: Send + Sync {
    fn next_id(&self) -> String;
}

/// Random v4 UUIDs
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdProvider;

impl IdProvider for UuidIdProvider {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Deterministic `<prefix>-1`, `<prefix>-2`, ... ids
#[derive(Debug)]
pub struct SequentialIdProvider {
    prefix: String,
    counter: AtomicU64,
}

impl SequentialIdProvider {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: AtomicU64::new(0),
        }
    }
}

impl IdProvider for SequentialIdProvider {
    fn next_id(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        format!("{}-{}", self.prefix, n)
    }
}
