//! Tessel Runtime
//!
//! Bundles the reactive graph with the deferred update queue. `C` is the
//! context handed to deferred tasks, usually the host document.

use crate::reactive::{ReactiveGraph, ReactiveStats};
use crate::scheduler::UpdateQueue;

/// Owns all reactive state and deferred work for one host
pub struct Runtime<C> {
    pub reactive: ReactiveGraph,
    pub updates: UpdateQueue<C>,
}

impl<C> Runtime<C> {
    pub fn new() -> Self {
        Self {
            reactive: ReactiveGraph::new(),
            updates: UpdateQueue::new(),
        }
    }

    /// Get statistics about the runtime
    pub fn stats(&self) -> RuntimeStats {
        RuntimeStats {
            reactive: self.reactive.stats(),
            pending_updates: self.updates.len(),
            processed_updates: self.updates.processed(),
        }
    }
}

impl<C> Default for Runtime<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Statistics about the runtime
#[derive(Debug, Clone)]
pub struct RuntimeStats {
    pub reactive: ReactiveStats,
    pub pending_updates: usize,
    pub processed_updates: u64,
}
