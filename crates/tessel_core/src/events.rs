//! Event types and handler storage
//!
//! Events are identified by a plain `u32` so that state machines can switch
//! on them directly (see [`crate::transitions`]).
//!
//! ```text
//! native control
//!     ↓ Event { composed: false }        (stops at the element boundary)
//! element internals
//!     ↓ re-emitted Event                 (explicit forward)
//! EventHandlers registered on the element
//! ```

use std::rc::Rc;

use rustc_hash::FxHashMap;

/// Event type identifier
pub type EventType = u32;

/// Well-known event types
pub mod event_types {
    use super::EventType;

    /// Text content of a control changed (every keystroke)
    pub const INPUT: EventType = 1;
    /// A control's value was committed (blur after edit, enter)
    pub const CHANGE: EventType = 2;
    /// Element received focus
    pub const FOCUS: EventType = 3;
    /// Element lost focus
    pub const BLUR: EventType = 4;
}

/// Human readable name of a well-known event type
pub fn event_name(event_type: EventType) -> &'static str {
    match event_type {
        event_types::INPUT => "input",
        event_types::CHANGE => "change",
        event_types::FOCUS => "focus",
        event_types::BLUR => "blur",
        _ => "custom",
    }
}

/// Event payload
#[derive(Clone, Debug, Default, PartialEq)]
pub enum EventData {
    #[default]
    None,
    /// Text entered into a control
    TextInput { text: String },
}

/// An event travelling through the element tree
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    pub event_type: EventType,
    pub data: EventData,
    pub bubbles: bool,
    /// Whether the event crosses an encapsulation boundary on its own
    pub composed: bool,
}

impl Event {
    /// Create an event with no payload that bubbles and is composed
    pub fn new(event_type: EventType) -> Self {
        Self {
            event_type,
            data: EventData::None,
            bubbles: true,
            composed: true,
        }
    }

    /// Native `input` notification: composed, carries the typed text
    pub fn input(text: impl Into<String>) -> Self {
        Self {
            data: EventData::TextInput { text: text.into() },
            ..Self::new(event_types::INPUT)
        }
    }

    /// Native `change` notification: bubbles but is not composed
    pub fn change() -> Self {
        Self {
            composed: false,
            ..Self::new(event_types::CHANGE)
        }
    }

    pub fn name(&self) -> &'static str {
        event_name(self.event_type)
    }
}

/// Callback for handling events
///
/// Uses Rc since UI is single-threaded.
pub type EventCallback = Rc<dyn Fn(&Event)>;

/// Storage for event handlers on an element
#[derive(Default, Clone)]
pub struct EventHandlers {
    handlers: FxHashMap<EventType, Vec<EventCallback>>,
}

impl EventHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Check if a handler is registered for a specific event type
    pub fn has_handler(&self, event_type: EventType) -> bool {
        self.handlers.contains_key(&event_type)
    }

    /// Register a handler for an event type
    pub fn on<F>(&mut self, event_type: EventType, handler: F)
    where
        F: Fn(&Event) + 'static,
    {
        self.handlers
            .entry(event_type)
            .or_default()
            .push(Rc::new(handler));
    }

    /// Remove all handlers for an event type, returning how many were dropped
    pub fn remove(&mut self, event_type: EventType) -> usize {
        self.handlers
            .remove(&event_type)
            .map_or(0, |handlers| handlers.len())
    }

    /// Get handlers for an event type
    pub fn get(&self, event_type: EventType) -> Option<&[EventCallback]> {
        self.handlers.get(&event_type).map(|v| v.as_slice())
    }

    /// Dispatch an event to all handlers for its type, in registration order
    ///
    /// Returns the number of handlers invoked.
    pub fn dispatch(&self, event: &Event) -> usize {
        let Some(handlers) = self.handlers.get(&event.event_type) else {
            return 0;
        };
        for handler in handlers {
            handler(event);
        }
        handlers.len()
    }
}
