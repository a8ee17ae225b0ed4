//! Identifier synthesis for tool parameters that arrive without an id.
//!
//! A generated id combines three parts: the wall clock in milliseconds, a
//! monotonic batch sequence number, and the element position inside the
//! batch. One normalization call is one batch, so two calls landing in the
//! same millisecond still get distinct ids, and two elements of one call
//! differ by position.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::time::Timestamp;

/// Process-wide batch counter for [`ClockIdSource`]
static BATCH_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Source of parameter id batches
pub trait IdSource: Send + Sync {
    /// Start a new batch
    fn batch(&self) -> IdBatch;
}

/// Stamp shared by every id generated during one normalization call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IdBatch {
    millis: i64,
    sequence: u64,
}

impl IdBatch {
    /// Create a batch stamp
    #[must_use]
    pub const fn new(millis: i64, sequence: u64) -> Self {
        Self { millis, sequence }
    }

    /// Id for the element at `position`
    #[must_use]
    pub fn id_for(&self, prefix: &str, position: usize) -> String {
        format!("{}_{}_{}_{}", prefix, self.millis, self.sequence, position)
    }
}

/// Wall clock backed id source
#[derive(Debug, Clone, Copy, Default)]
pub struct ClockIdSource;

impl ClockIdSource {
    /// Create a new clock source
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl IdSource for ClockIdSource {
    fn batch(&self) -> IdBatch {
        let sequence = BATCH_SEQUENCE.fetch_add(1, Ordering::Relaxed);
        IdBatch::new(Timestamp::now().as_millis(), sequence)
    }
}

/// Deterministic id source with a fixed clock value
#[derive(Debug, Default)]
pub struct SequentialIdSource {
    millis: i64,
    next: AtomicU64,
}

impl SequentialIdSource {
    /// Create a source that always reports `millis`
    #[must_use]
    pub const fn new(millis: i64) -> Self {
        Self {
            millis,
            next: AtomicU64::new(0),
        }
    }
}

impl IdSource for SequentialIdSource {
    fn batch(&self) -> IdBatch {
        IdBatch::new(self.millis, self.next.fetch_add(1, Ordering::Relaxed))
    }
}
