//! Deferred update queue
//!
//! Work that must wait for the current synchronous pass (render, layout) to
//! finish is queued here and drained by the host afterwards. Tasks are
//! single-shot: they run exactly once, in FIFO order, and cannot be cancelled.
//!
//! The queue is generic over the context handed to each task, so the host
//! decides what a task may touch:
//!
//! ```rust
//! use tessel_core::scheduler::UpdateQueue;
//!
//! struct Host {
//!     updates: UpdateQueue<Host>,
//!     focused: bool,
//! }
//!
//! let mut host = Host { updates: UpdateQueue::new(), focused: false };
//! host.updates.queue_update(|host: &mut Host| host.focused = true);
//! assert!(!host.focused);
//!
//! while let Some(task) = host.updates.pop() {
//!     task(&mut host);
//! }
//! assert!(host.focused);
//! ```

use std::collections::VecDeque;
use std::fmt;

/// A deferred unit of work
pub type UpdateTask<C> = Box<dyn FnOnce(&mut C)>;

/// FIFO queue of deferred tasks
pub struct UpdateQueue<C> {
    tasks: VecDeque<UpdateTask<C>>,
    /// Tasks handed out by `pop` so far
    processed: u64,
}

impl<C> UpdateQueue<C> {
    pub fn new() -> Self {
        Self {
            tasks: VecDeque::new(),
            processed: 0,
        }
    }

    /// Schedule a task to run after the current pass
    pub fn queue_update<F>(&mut self, task: F)
    where
        F: FnOnce(&mut C) + 'static,
    {
        self.tasks.push_back(Box::new(task));
    }

    /// Take the next task to run
    pub fn pop(&mut self) -> Option<UpdateTask<C>> {
        let task = self.tasks.pop_front()?;
        self.processed += 1;
        Some(task)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Total number of tasks taken from the queue
    pub fn processed(&self) -> u64 {
        self.processed
    }
}

impl<C> Default for UpdateQueue<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for UpdateQueue<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateQueue")
            .field("pending", &self.tasks.len())
            .field("processed", &self.processed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Log {
        entries: Vec<&'static str>,
    }

    #[test]
    fn test_tasks_run_in_fifo_order() {
        let mut queue: UpdateQueue<Log> = UpdateQueue::new();
        let mut log = Log::default();

        queue.queue_update(|log: &mut Log| log.entries.push("a"));
        queue.queue_update(|log: &mut Log| log.entries.push("b"));
        assert_eq!(queue.len(), 2);

        while let Some(task) = queue.pop() {
            task(&mut log);
        }

        assert_eq!(log.entries, vec!["a", "b"]);
        assert!(queue.is_empty());
        assert_eq!(queue.processed(), 2);
    }

    #[test]
    fn test_task_runs_once() {
        let mut queue: UpdateQueue<Log> = UpdateQueue::new();
        let mut log = Log::default();

        queue.queue_update(|log: &mut Log| log.entries.push("focus"));
        if let Some(task) = queue.pop() {
            task(&mut log);
        }

        assert!(queue.pop().is_none());
        assert_eq!(log.entries, vec!["focus"]);
    }
}
