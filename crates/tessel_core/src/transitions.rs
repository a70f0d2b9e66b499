//! State transition trait for element state machines
//!
//! A state type maps `(state, event)` pairs to the next state. Returning
//! `None` means the event does not affect the current state.
//!
//! # Example
//!
//! ```rust
//! use tessel_core::transitions::StateTransitions;
//!
//! const TOGGLE: u32 = 1;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum Switch {
//!     Off,
//!     On,
//! }
//!
//! impl StateTransitions for Switch {
//!     fn on_event(&self, event: u32) -> Option<Self> {
//!         match (self, event) {
//!             (Switch::Off, TOGGLE) => Some(Switch::On),
//!             (Switch::On, TOGGLE) => Some(Switch::Off),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! assert_eq!(Switch::Off.on_event(TOGGLE), Some(Switch::On));
//! assert_eq!(Switch::Off.on_event(99), None);
//! ```

use std::fmt::Debug;
use std::hash::Hash;

/// Trait for enum-based state machines
pub trait StateTransitions: Clone + Copy + PartialEq + Eq + Hash + Debug + 'static {
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: u32) -> Option<Self>;

    /// Apply an event in place, returning whether the state changed
    fn apply(&mut self, event: u32) -> bool {
        match self.on_event(event) {
            Some(next) if next != *self => {
                *self = next;
                true
            }
            _ => false,
        }
    }
}
