//! In-process element host
//!
//! The [`Document`] plays the part of the host page: it owns every element's
//! host attributes, boundary listeners, native control and rendered
//! fragment, plus the reactive runtime, the deferred update queue and the
//! color scheme context.
//!
//! Lifecycle mirrors custom elements:
//!
//! ```text
//! create_element ──► connect ──► connected_callback (render effect, autofocus)
//!                       │
//!                  set_attribute ──► attribute_changed_callback
//!                       │
//!                  disconnect ──► disconnected_callback (render effect disposed)
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;
use slotmap::{new_key_type, SlotMap};
use tessel_core::{Event, EventHandlers, EventType, ReactiveGraph, Runtime, Signal};
use tessel_core::{Effect, RuntimeStats};

use crate::config::TesselConfig;
use crate::definition::ElementDefinition;
use crate::template::Node;
use crate::theme::ColorScheme;

new_key_type! {
    /// Handle to an element owned by a [`Document`]
    pub struct ElementId;
}

/// Lifecycle hooks the document calls on an element
pub trait CustomElement {
    fn id(&self) -> ElementId;

    fn definition(&self) -> &'static ElementDefinition;

    /// Called once each time the element is attached to the document
    fn connected_callback(&self, doc: &mut Document);

    fn disconnected_callback(&self, doc: &mut Document);

    /// Called after a host attribute changed (names are lower case)
    fn attribute_changed_callback(
        &self,
        doc: &mut Document,
        name: &str,
        old: Option<&str>,
        new: Option<&str>,
    );
}

/// The native `<input>` rendered inside an element
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NativeControl {
    /// Live text of the control
    pub value: String,
    pub focused: bool,
}

/// Latest render output of an element
#[derive(Debug, Default)]
pub struct RenderSlot {
    pub fragment: Option<Node>,
    pub passes: u64,
}

struct ElementData {
    tag: &'static str,
    attributes: IndexMap<String, String>,
    connected: bool,
    control: Option<NativeControl>,
    listeners: EventHandlers,
    render: Rc<RefCell<RenderSlot>>,
    render_effect: Option<Effect>,
}

/// Host for a set of elements
pub struct Document {
    runtime: Runtime<Document>,
    color_scheme: Signal<ColorScheme>,
    config: TesselConfig,
    elements: SlotMap<ElementId, ElementData>,
    focused: Option<ElementId>,
}

impl Document {
    pub fn new() -> Self {
        Self::with_config(TesselConfig::default())
    }

    pub fn with_config(config: TesselConfig) -> Self {
        let mut runtime = Runtime::new();
        let color_scheme = runtime.reactive.create_signal(config.theme.color_scheme);
        Self {
            runtime,
            color_scheme,
            config,
            elements: SlotMap::with_key(),
            focused: None,
        }
    }

    pub fn config(&self) -> &TesselConfig {
        &self.config
    }

    pub fn reactive(&self) -> &ReactiveGraph {
        &self.runtime.reactive
    }

    pub fn reactive_mut(&mut self) -> &mut ReactiveGraph {
        &mut self.runtime.reactive
    }

    pub fn stats(&self) -> RuntimeStats {
        self.runtime.stats()
    }

    /// Run `f` with effect flushing deferred until it returns
    pub fn batch<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.runtime.reactive.batch_start();
        let result = f(self);
        self.runtime.reactive.batch_end();
        result
    }

    // =========================================================================
    // COLOR SCHEME
    // =========================================================================

    pub fn color_scheme_signal(&self) -> Signal<ColorScheme> {
        self.color_scheme
    }

    pub fn color_scheme(&self) -> ColorScheme {
        self.runtime
            .reactive
            .get_untracked(self.color_scheme)
            .unwrap_or_default()
    }

    pub fn set_color_scheme(&mut self, scheme: ColorScheme) {
        tracing::debug!("color scheme -> {:?}", scheme);
        self.runtime.reactive.set(self.color_scheme, scheme);
    }

    pub fn is_dark_mode(&self) -> bool {
        self.color_scheme().is_dark()
    }

    // =========================================================================
    // ELEMENTS
    // =========================================================================

    /// Allocate a disconnected element
    pub fn create_element(&mut self, tag: &'static str) -> ElementId {
        self.elements.insert(ElementData {
            tag,
            attributes: IndexMap::new(),
            connected: false,
            control: None,
            listeners: EventHandlers::new(),
            render: Rc::new(RefCell::new(RenderSlot::default())),
            render_effect: None,
        })
    }

    /// Drop an element and everything the document holds for it
    pub fn remove_element(&mut self, id: ElementId) -> bool {
        self.dispose_render_effect(id);
        if self.focused == Some(id) {
            self.focused = None;
        }
        self.elements.remove(id).is_some()
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(id)
    }

    pub fn tag(&self, id: ElementId) -> Option<&'static str> {
        self.elements.get(id).map(|data| data.tag)
    }

    pub fn is_connected(&self, id: ElementId) -> bool {
        self.elements.get(id).is_some_and(|data| data.connected)
    }

    /// Attach an element and run its connected callback
    ///
    /// Connecting an already connected element does nothing.
    pub fn connect<E: CustomElement + ?Sized>(&mut self, element: &E) {
        let id = element.id();
        let Some(data) = self.elements.get_mut(id) else {
            tracing::warn!("connect: unknown element {:?}", id);
            return;
        };
        if data.connected {
            return;
        }
        data.connected = true;
        tracing::trace!("connected <{}> {:?}", data.tag, id);
        element.connected_callback(self);
    }

    /// Detach an element and run its disconnected callback
    pub fn disconnect<E: CustomElement + ?Sized>(&mut self, element: &E) {
        let id = element.id();
        let Some(data) = self.elements.get_mut(id) else {
            tracing::warn!("disconnect: unknown element {:?}", id);
            return;
        };
        if !data.connected {
            return;
        }
        data.connected = false;
        tracing::trace!("disconnected <{}> {:?}", data.tag, id);
        if self.focused == Some(id) {
            self.blur(id);
        }
        element.disconnected_callback(self);
    }

    // =========================================================================
    // HOST ATTRIBUTES
    // =========================================================================

    pub fn attribute(&self, id: ElementId, name: &str) -> Option<&str> {
        let data = self.elements.get(id)?;
        data.attributes
            .get(name.to_ascii_lowercase().as_str())
            .map(String::as_str)
    }

    pub fn has_attribute(&self, id: ElementId, name: &str) -> bool {
        self.attribute(id, name).is_some()
    }

    /// Set (`Some`) or remove (`None`) a host attribute and notify the element
    pub fn set_attribute<E: CustomElement + ?Sized>(
        &mut self,
        element: &E,
        name: &str,
        value: Option<&str>,
    ) {
        let id = element.id();
        let name = name.to_ascii_lowercase();
        let Some(old) = self.write_attribute(id, &name, value.map(str::to_owned)) else {
            tracing::warn!("set_attribute: unknown element {:?}", id);
            return;
        };
        tracing::trace!("attribute {} {:?} -> {:?}", name, old, value);
        element.attribute_changed_callback(self, &name, old.as_deref(), value);
    }

    /// Write a host attribute without notifying the element
    ///
    /// Used for property → attribute reflection.
    pub fn reflect_attribute(&mut self, id: ElementId, name: &str, value: Option<String>) {
        if self.write_attribute(id, name, value).is_none() {
            tracing::warn!("reflect_attribute: unknown element {:?}", id);
        }
    }

    /// Returns the previous value, or `None` for an unknown element
    fn write_attribute(
        &mut self,
        id: ElementId,
        name: &str,
        value: Option<String>,
    ) -> Option<Option<String>> {
        let data = self.elements.get_mut(id)?;
        let old = match value {
            Some(value) => data.attributes.insert(name.to_string(), value),
            None => data.attributes.shift_remove(name),
        };
        Some(old)
    }

    // =========================================================================
    // EVENTS
    // =========================================================================

    /// Listen for events at the element's boundary
    pub fn add_event_listener<F>(&mut self, id: ElementId, event_type: EventType, handler: F)
    where
        F: Fn(&Event) + 'static,
    {
        match self.elements.get_mut(id) {
            Some(data) => data.listeners.on(event_type, handler),
            None => tracing::warn!("add_event_listener: unknown element {:?}", id),
        }
    }

    /// Drop every boundary listener of one type
    ///
    /// Returns the number of listeners removed.
    pub fn remove_event_listeners(&mut self, id: ElementId, event_type: EventType) -> usize {
        match self.elements.get_mut(id) {
            Some(data) => data.listeners.remove(event_type),
            None => {
                tracing::warn!("remove_event_listeners: unknown element {:?}", id);
                0
            }
        }
    }

    /// Deliver an event to the element's boundary listeners
    ///
    /// Returns the number of listeners invoked.
    pub fn dispatch_event(&self, id: ElementId, event: &Event) -> usize {
        self.elements
            .get(id)
            .map(|data| data.listeners.dispatch(event))
            .unwrap_or(0)
    }

    // =========================================================================
    // DEFERRED UPDATES
    // =========================================================================

    /// Schedule work to run after the current pass
    pub fn queue_update<F>(&mut self, task: F)
    where
        F: FnOnce(&mut Document) + 'static,
    {
        self.runtime.updates.queue_update(task);
    }

    pub fn pending_updates(&self) -> usize {
        self.runtime.updates.len()
    }

    /// Run every queued task, including tasks queued while draining
    ///
    /// Returns the number of tasks run.
    pub fn process_updates(&mut self) -> usize {
        let mut ran = 0;
        while let Some(task) = self.runtime.updates.pop() {
            task(self);
            ran += 1;
        }
        ran
    }

    // =========================================================================
    // NATIVE CONTROL AND FOCUS
    // =========================================================================

    /// Create the element's native control if it does not exist yet
    pub fn ensure_control(&mut self, id: ElementId) {
        if let Some(data) = self.elements.get_mut(id) {
            data.control.get_or_insert_with(NativeControl::default);
        }
    }

    pub fn control(&self, id: ElementId) -> Option<&NativeControl> {
        self.elements.get(id)?.control.as_ref()
    }

    pub fn control_mut(&mut self, id: ElementId) -> Option<&mut NativeControl> {
        self.elements.get_mut(id)?.control.as_mut()
    }

    /// Focus the element's control, returning whether focus moved
    pub fn focus(&mut self, id: ElementId) -> bool {
        if self.control(id).is_none() {
            tracing::warn!("focus: element {:?} has no control", id);
            return false;
        }
        if self.focused == Some(id) {
            return false;
        }
        if let Some(previous) = self.focused.take() {
            self.blur(previous);
        }
        if let Some(control) = self.control_mut(id) {
            control.focused = true;
        }
        self.focused = Some(id);
        tracing::debug!("focused {:?}", id);
        true
    }

    pub fn blur(&mut self, id: ElementId) {
        if let Some(control) = self.control_mut(id) {
            control.focused = false;
        }
        if self.focused == Some(id) {
            self.focused = None;
        }
    }

    pub fn focused(&self) -> Option<ElementId> {
        self.focused
    }

    // =========================================================================
    // RENDERING
    // =========================================================================

    pub fn render_slot(&self, id: ElementId) -> Option<Rc<RefCell<RenderSlot>>> {
        self.elements.get(id).map(|data| data.render.clone())
    }

    /// Latest rendered fragment of an element
    pub fn fragment(&self, id: ElementId) -> Option<Node> {
        self.elements.get(id)?.render.borrow().fragment.clone()
    }

    pub fn render_passes(&self, id: ElementId) -> u64 {
        self.elements
            .get(id)
            .map(|data| data.render.borrow().passes)
            .unwrap_or(0)
    }

    pub fn has_render_effect(&self, id: ElementId) -> bool {
        self.elements
            .get(id)
            .is_some_and(|data| data.render_effect.is_some())
    }

    pub fn set_render_effect(&mut self, id: ElementId, effect: Effect) {
        match self.elements.get_mut(id) {
            Some(data) => data.render_effect = Some(effect),
            None => {
                tracing::warn!("set_render_effect: unknown element {:?}", id);
                self.runtime.reactive.dispose_effect(effect);
            }
        }
    }

    /// Dispose the element's render effect, if any
    pub fn dispose_render_effect(&mut self, id: ElementId) {
        let effect = self
            .elements
            .get_mut(id)
            .and_then(|data| data.render_effect.take());
        if let Some(effect) = effect {
            self.runtime.reactive.dispose_effect(effect);
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
