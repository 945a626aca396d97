use std::sync::atomic::{AtomicI64, Ordering};

use tracing::debug;

use crate::app::Result;

/// Holds the most recently fetched unread digest count.
///
/// No dedup logic: a successful refresh replaces the value wholesale, a
/// failed one keeps whatever was held before.
#[derive(Debug, Default)]
pub struct UnreadCounter {
    count: AtomicI64,
}

impl UnreadCounter {
    pub fn get(&self) -> i64 {
        self.count.load(Ordering::SeqCst)
    }

    pub fn apply(&self, outcome: Result<i64>) {
        match outcome {
            Ok(count) => self.count.store(count, Ordering::SeqCst),
            Err(e) => debug!("unread count refresh failed: {}", e),
        }
    }
}
