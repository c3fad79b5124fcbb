//! Payload-free "the collection changed" notification.
//!
//! The host creates one `RefreshSignal` and hands clones to every workflow
//! that either mutates persons (editor, list deletes) or displays them (list).
//! Writers bump a generation counter; readers compare it against the
//! generation they last loaded at.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct RefreshSignal {
    generation: Arc<AtomicU64>,
}

impl RefreshSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notify(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// True if anyone notified since `seen` was read.
    pub fn changed_since(&self, seen: u64) -> bool {
        self.generation() != seen
    }
}
