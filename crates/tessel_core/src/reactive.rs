//! Fine-grained reactive signal system
//!
//! Signals hold typed values inside a [`ReactiveGraph`]. Effects read signals
//! through the graph, which records the reads as dependencies; writing a
//! signal schedules every effect that depends on it.
//!
//! - Signals push invalidation to their subscribed effects
//! - Effects re-run with fresh dependency tracking on every run
//! - Writes inside a batch are coalesced into a single flush
//!
//! The graph is single-threaded: element state lives on the UI thread, so
//! values and effect closures do not need to be `Send`.
//!
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use tessel_core::reactive::ReactiveGraph;
//!
//! let mut graph = ReactiveGraph::new();
//! let count = graph.create_signal(0i32);
//!
//! let seen = Rc::new(Cell::new(0));
//! let seen_in_effect = Rc::clone(&seen);
//! graph.create_effect(move |g| seen_in_effect.set(g.get(count).unwrap_or(0)));
//!
//! graph.set(count, 5);
//! assert_eq!(seen.get(), 5);
//! ```

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use std::any::Any;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::marker::PhantomData;

new_key_type! {
    /// Unique identifier for a signal
    pub struct SignalId;
    /// Unique identifier for an effect
    pub struct EffectId;
}

/// A reactive signal handle (cheap to copy)
#[derive(Debug)]
pub struct Signal<T> {
    id: SignalId,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Signal<T> {}

impl<T> PartialEq for Signal<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for Signal<T> {}

impl<T> Signal<T> {
    /// Get the signal's internal ID
    pub fn id(&self) -> SignalId {
        self.id
    }
}

/// An effect handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Effect {
    id: EffectId,
}

impl Effect {
    pub fn id(&self) -> EffectId {
        self.id
    }
}

type EffectFn = Box<dyn FnMut(&ReactiveGraph)>;

struct SignalNode {
    value: Box<dyn Any>,
    /// Bumped on every write
    version: u64,
    subscribers: SmallVec<[EffectId; 4]>,
}

struct EffectNode {
    /// Taken out of the node while the effect runs
    run: Option<EffectFn>,
    dependencies: SmallVec<[SignalId; 8]>,
    dirty: bool,
    runs: u64,
}

/// The reactive graph that owns all signals and effects
pub struct ReactiveGraph {
    signals: SlotMap<SignalId, SignalNode>,
    effects: SlotMap<EffectId, EffectNode>,
    pending_effects: VecDeque<EffectId>,
    /// > 0 while inside a batch
    batch_depth: u32,
    /// Dependencies recorded by the effect that is currently running
    tracking: RefCell<Option<SmallVec<[SignalId; 8]>>>,
    global_version: u64,
}

impl ReactiveGraph {
    /// Create a new reactive graph
    pub fn new() -> Self {
        Self {
            signals: SlotMap::with_key(),
            effects: SlotMap::with_key(),
            pending_effects: VecDeque::new(),
            batch_depth: 0,
            tracking: RefCell::new(None),
            global_version: 0,
        }
    }

    // =========================================================================
    // SIGNALS
    // =========================================================================

    /// Create a new signal with an initial value
    pub fn create_signal<T: 'static>(&mut self, initial: T) -> Signal<T> {
        let id = self.signals.insert(SignalNode {
            value: Box::new(initial),
            version: 0,
            subscribers: SmallVec::new(),
        });
        Signal {
            id,
            _marker: PhantomData,
        }
    }

    /// Get the current value of a signal
    ///
    /// Inside a running effect the signal is recorded as a dependency.
    pub fn get<T: Clone + 'static>(&self, signal: Signal<T>) -> Option<T> {
        self.track(signal.id);
        self.get_untracked(signal)
    }

    /// Get the current value without recording a dependency
    pub fn get_untracked<T: Clone + 'static>(&self, signal: Signal<T>) -> Option<T> {
        self.signals
            .get(signal.id)
            .and_then(|node| node.value.downcast_ref::<T>().cloned())
    }

    /// Set the value of a signal, scheduling dependent effects
    pub fn set<T: 'static>(&mut self, signal: Signal<T>, value: T) {
        let Some(node) = self.signals.get_mut(signal.id) else {
            tracing::warn!("write to disposed signal {:?} ignored", signal.id);
            return;
        };

        node.value = Box::new(value);
        node.version += 1;
        self.global_version += 1;

        let subscribers = node.subscribers.clone();
        for effect_id in subscribers {
            self.mark_dirty(effect_id);
        }

        if self.batch_depth == 0 {
            self.flush_effects();
        }
    }

    /// Update a signal using a function
    pub fn update<T: Clone + 'static>(&mut self, signal: Signal<T>, f: impl FnOnce(T) -> T) {
        if let Some(current) = self.get_untracked(signal) {
            self.set(signal, f(current));
        }
    }

    /// Get the version of a signal (number of writes since creation)
    pub fn signal_version(&self, id: SignalId) -> Option<u64> {
        self.signals.get(id).map(|node| node.version)
    }

    /// Remove a signal from the graph
    pub fn dispose_signal<T>(&mut self, signal: Signal<T>) {
        if let Some(node) = self.signals.remove(signal.id) {
            for effect_id in node.subscribers {
                if let Some(effect) = self.effects.get_mut(effect_id) {
                    effect.dependencies.retain(|dep| *dep != signal.id);
                }
            }
        }
    }

    // =========================================================================
    // EFFECTS
    // =========================================================================

    /// Create an effect that runs now and again whenever its dependencies change
    pub fn create_effect<F>(&mut self, run: F) -> Effect
    where
        F: FnMut(&ReactiveGraph) + 'static,
    {
        let id = self.effects.insert(EffectNode {
            run: Some(Box::new(run)),
            dependencies: SmallVec::new(),
            dirty: true,
            runs: 0,
        });

        self.pending_effects.push_back(id);
        if self.batch_depth == 0 {
            self.flush_effects();
        }

        Effect { id }
    }

    /// Dispose of an effect, removing it from the graph
    pub fn dispose_effect(&mut self, effect: Effect) {
        if let Some(node) = self.effects.remove(effect.id) {
            for dep_id in node.dependencies {
                if let Some(signal) = self.signals.get_mut(dep_id) {
                    signal.subscribers.retain(|sub| *sub != effect.id);
                }
            }
        }
    }

    /// Number of times an effect has run, `None` once disposed
    pub fn effect_runs(&self, effect: Effect) -> Option<u64> {
        self.effects.get(effect.id).map(|node| node.runs)
    }

    // =========================================================================
    // BATCHING
    // =========================================================================

    /// Start a batch - effects won't run until the outermost batch ends
    pub fn batch_start(&mut self) {
        self.batch_depth += 1;
    }

    /// End a batch and flush pending effects
    pub fn batch_end(&mut self) {
        if self.batch_depth == 0 {
            return;
        }
        self.batch_depth -= 1;
        if self.batch_depth == 0 {
            self.flush_effects();
        }
    }

    /// Run a function in a batch context
    pub fn batch<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.batch_start();
        let result = f(self);
        self.batch_end();
        result
    }

    /// Whether writes are currently being batched
    pub fn is_batching(&self) -> bool {
        self.batch_depth > 0
    }

    // =========================================================================
    // INTERNAL
    // =========================================================================

    fn track(&self, id: SignalId) {
        if let Some(deps) = self.tracking.borrow_mut().as_mut() {
            if !deps.contains(&id) {
                deps.push(id);
            }
        }
    }

    fn mark_dirty(&mut self, effect_id: EffectId) {
        if let Some(node) = self.effects.get_mut(effect_id) {
            if !node.dirty {
                node.dirty = true;
                self.pending_effects.push_back(effect_id);
            }
        }
    }

    fn flush_effects(&mut self) {
        while let Some(effect_id) = self.pending_effects.pop_front() {
            self.run_effect(effect_id);
        }
    }

    fn run_effect(&mut self, effect_id: EffectId) {
        let Some(node) = self.effects.get_mut(effect_id) else {
            return;
        };
        if !node.dirty {
            return;
        }
        node.dirty = false;
        let Some(mut run) = node.run.take() else {
            return;
        };

        self.tracking.replace(Some(SmallVec::new()));
        run(&*self);
        let deps = self.tracking.take().unwrap_or_default();

        let Some(node) = self.effects.get_mut(effect_id) else {
            return;
        };
        node.run = Some(run);
        node.runs += 1;

        let old_deps = std::mem::replace(&mut node.dependencies, deps.clone());
        for dep_id in old_deps {
            if let Some(signal) = self.signals.get_mut(dep_id) {
                signal.subscribers.retain(|sub| *sub != effect_id);
            }
        }
        for dep_id in deps {
            if let Some(signal) = self.signals.get_mut(dep_id) {
                if !signal.subscribers.contains(&effect_id) {
                    signal.subscribers.push(effect_id);
                }
            }
        }
    }

    /// Get statistics about the reactive graph
    pub fn stats(&self) -> ReactiveStats {
        ReactiveStats {
            signal_count: self.signals.len(),
            effect_count: self.effects.len(),
            pending_effects: self.pending_effects.len(),
            global_version: self.global_version,
        }
    }
}

impl Default for ReactiveGraph {
    fn default() -> Self {
        Self::new()
    }
}

/// Statistics about the reactive graph
#[derive(Debug, Clone)]
pub struct ReactiveStats {
    pub signal_count: usize,
    pub effect_count: usize,
    pub pending_effects: usize,
    pub global_version: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_signal_create_get_set() {
        let mut graph = ReactiveGraph::new();

        let count = graph.create_signal(0i32);
        assert_eq!(graph.get(count), Some(0));

        graph.set(count, 42);
        assert_eq!(graph.get(count), Some(42));
        assert_eq!(graph.signal_version(count.id()), Some(1));
    }

    #[test]
    fn test_signal_update() {
        let mut graph = ReactiveGraph::new();

        let count = graph.create_signal(10i32);
        graph.update(count, |x| x + 5);
        assert_eq!(graph.get(count), Some(15));
    }

    #[test]
    fn test_effect_runs_on_change() {
        let mut graph = ReactiveGraph::new();
        let effect_runs = Rc::new(RefCell::new(Vec::new()));

        let count = graph.create_signal(0i32);
        let effect_runs_clone = effect_runs.clone();

        let effect = graph.create_effect(move |g| {
            let val = g.get(count).unwrap_or(0);
            effect_runs_clone.borrow_mut().push(val);
        });

        // Runs immediately
        assert_eq!(*effect_runs.borrow(), vec![0]);

        graph.set(count, 1);
        graph.set(count, 2);
        assert_eq!(*effect_runs.borrow(), vec![0, 1, 2]);
        assert_eq!(graph.effect_runs(effect), Some(3));
    }

    #[test]
    fn test_untracked_read_does_not_subscribe() {
        let mut graph = ReactiveGraph::new();
        let runs = Rc::new(RefCell::new(0));

        let count = graph.create_signal(0i32);
        let runs_clone = runs.clone();
        graph.create_effect(move |g| {
            let _ = g.get_untracked(count);
            *runs_clone.borrow_mut() += 1;
        });

        graph.set(count, 1);
        assert_eq!(*runs.borrow(), 1);
    }

    #[test]
    fn test_dependencies_follow_last_run() {
        let mut graph = ReactiveGraph::new();
        let runs = Rc::new(RefCell::new(0));

        let use_a = graph.create_signal(true);
        let a = graph.create_signal(1i32);
        let b = graph.create_signal(2i32);
        let runs_clone = runs.clone();
        graph.create_effect(move |g| {
            *runs_clone.borrow_mut() += 1;
            if g.get(use_a).unwrap_or(false) {
                let _ = g.get(a);
            } else {
                let _ = g.get(b);
            }
        });

        graph.set(use_a, false);
        assert_eq!(*runs.borrow(), 2);

        // `a` is no longer read
        graph.set(a, 10);
        assert_eq!(*runs.borrow(), 2);

        graph.set(b, 20);
        assert_eq!(*runs.borrow(), 3);
    }

    #[test]
    fn test_batching() {
        let mut graph = ReactiveGraph::new();
        let effect_runs = Rc::new(RefCell::new(0));

        let a = graph.create_signal(1i32);
        let b = graph.create_signal(2i32);
        let effect_runs_clone = effect_runs.clone();

        graph.create_effect(move |g| {
            let _a = g.get(a);
            let _b = g.get(b);
            *effect_runs_clone.borrow_mut() += 1;
        });
        assert_eq!(*effect_runs.borrow(), 1);

        // Without batching, effect runs twice
        *effect_runs.borrow_mut() = 0;
        graph.set(a, 10);
        graph.set(b, 20);
        assert_eq!(*effect_runs.borrow(), 2);

        // With nested batching, effect runs once when the outer batch ends
        *effect_runs.borrow_mut() = 0;
        graph.batch(|g| {
            g.set(a, 100);
            g.batch(|g| g.set(b, 200));
            assert!(g.is_batching());
        });
        assert_eq!(*effect_runs.borrow(), 1);
    }

    #[test]
    fn test_dispose_effect() {
        let mut graph = ReactiveGraph::new();
        let effect_runs = Rc::new(RefCell::new(0));

        let count = graph.create_signal(0i32);
        let effect_runs_clone = effect_runs.clone();

        let effect = graph.create_effect(move |g| {
            let _val = g.get(count);
            *effect_runs_clone.borrow_mut() += 1;
        });

        graph.set(count, 1);
        assert_eq!(*effect_runs.borrow(), 2);

        graph.dispose_effect(effect);
        assert_eq!(graph.effect_runs(effect), None);

        graph.set(count, 2);
        assert_eq!(*effect_runs.borrow(), 2);
    }

    #[test]
    fn test_dispose_signal() {
        let mut graph = ReactiveGraph::new();

        let name = graph.create_signal(String::from("tessel"));
        graph.dispose_signal(name);

        assert_eq!(graph.get(name), None);
        graph.set(name, String::from("ignored"));
        assert_eq!(graph.stats().signal_count, 0);
    }

    #[test]
    fn test_stats() {
        let mut graph = ReactiveGraph::new();

        let s1 = graph.create_signal(1);
        let _s2 = graph.create_signal(2);
        graph.create_effect(move |g| {
            let _ = g.get(s1);
        });

        let stats = graph.stats();
        assert_eq!(stats.signal_count, 2);
        assert_eq!(stats.effect_count, 1);
        assert_eq!(stats.pending_effects, 0);
    }
}
