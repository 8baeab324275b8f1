use super::types::RecordId;

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Hands out record ids based on wall-clock milliseconds.
///
/// Ids are strictly increasing for the lifetime of the generator: two creates
/// in the same millisecond get consecutive ids, and a clock stepping back
/// never repeats an id.
#[derive(Debug, Default)]
pub struct RecordIdGenerator {
    last: AtomicU64,
}

impl RecordIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// A generator whose first id is greater than `id`.
    pub fn starting_after(id: RecordId) -> Self {
        Self {
            last: AtomicU64::new(id.0),
        }
    }

    pub fn next_id(&self) -> RecordId {
        let now = now_ms();
        let prev = match self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last + 1))
            }) {
            Ok(prev) | Err(prev) => prev,
        };
        RecordId(now.max(prev + 1))
    }
}

pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
