//! Tessel Core Runtime
//!
//! This crate provides the foundational primitives for Tessel elements:
//!
//! - **Reactive Signals**: Fine-grained reactivity with automatic dependency tracking
//! - **Deferred Updates**: Single-shot tasks that run after the current pass
//! - **Event Dispatch**: Typed events and per-element handler storage
//! - **State Transitions**: Enum-based state machines driven by events
//!
//! # Example
//!
//! ```rust
//! use tessel_core::reactive::ReactiveGraph;
//!
//! let mut graph = ReactiveGraph::new();
//! let appearance = graph.create_signal("default");
//!
//! graph.set(appearance, "error");
//! assert_eq!(graph.get(appearance), Some("error"));
//! ```

pub mod events;
pub mod reactive;
pub mod runtime;
pub mod scheduler;
pub mod transitions;

pub use events::{event_name, event_types, Event, EventCallback, EventData, EventHandlers, EventType};
pub use reactive::{Effect, EffectId, ReactiveGraph, ReactiveStats, Signal, SignalId};
pub use runtime::{Runtime, RuntimeStats};
pub use scheduler::{UpdateQueue, UpdateTask};
pub use transitions::StateTransitions;
