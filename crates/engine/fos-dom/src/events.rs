//! DOM Events
//!
//! Keyboard events and the listener registry used for dispatch.

use std::fmt;
use std::rc::Rc;

use crate::{Document, NodeId};

/// Event type identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    KeyDown,
    KeyUp,
}

/// Keyboard event
#[derive(Debug, Clone)]
pub struct KeyboardEvent {
    pub event_type: EventType,
    /// Key value, e.g. `"Tab"`, `"Escape"`, `"a"`
    pub key: String,
    pub shift_key: bool,
    pub ctrl_key: bool,
    pub alt_key: bool,
    pub meta_key: bool,
    target: NodeId,
    default_prevented: bool,
    immediate_propagation_stopped: bool,
    handled: bool,
}

impl KeyboardEvent {
    /// Create a keydown event
    pub fn key_down(key: &str) -> Self {
        Self {
            event_type: EventType::KeyDown,
            key: key.to_string(),
            shift_key: false,
            ctrl_key: false,
            alt_key: false,
            meta_key: false,
            target: NodeId::NONE,
            default_prevented: false,
            immediate_propagation_stopped: false,
            handled: false,
        }
    }

    /// Tab keydown
    pub fn tab() -> Self {
        Self::key_down("Tab")
    }

    /// Shift+Tab keydown
    pub fn shift_tab() -> Self {
        Self::tab().with_shift()
    }

    pub fn with_shift(mut self) -> Self {
        self.shift_key = true;
        self
    }

    pub fn is_tab(&self) -> bool {
        self.key == "Tab"
    }

    /// Node the event was dispatched to
    pub fn target(&self) -> NodeId {
        self.target
    }

    pub(crate) fn set_target(&mut self, target: NodeId) {
        self.target = target;
    }

    /// Cancel the default action
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Check if default was prevented
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Skip every listener not yet invoked, on this node and beyond
    pub fn stop_immediate_propagation(&mut self) {
        self.immediate_propagation_stopped = true;
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.immediate_propagation_stopped
    }

    /// Claim the event for one scope without stopping dispatch
    ///
    /// Later listeners still run and can check [`Self::is_handled`] to
    /// step aside.
    pub fn mark_handled(&mut self) {
        self.handled = true;
    }

    pub fn is_handled(&self) -> bool {
        self.handled
    }
}

/// Event listener callback
///
/// Listeners receive the document mutably so they can move focus.
pub type Listener = Rc<dyn Fn(&mut Document, &mut KeyboardEvent)>;

/// Handle returned by registration, used for removal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Listener options
#[derive(Debug, Clone, Copy, Default)]
pub struct ListenerOptions {
    pub capture: bool,
}

impl ListenerOptions {
    pub fn capture() -> Self {
        Self { capture: true }
    }
}

struct Registration {
    id: ListenerId,
    target: NodeId,
    event_type: EventType,
    capture: bool,
    callback: Listener,
}

/// Registered listeners, in registration order
#[derive(Default)]
pub(crate) struct ListenerRegistry {
    next_id: u64,
    registrations: Vec<Registration>,
}

impl ListenerRegistry {
    pub(crate) fn add(
        &mut self,
        target: NodeId,
        event_type: EventType,
        options: ListenerOptions,
        callback: Listener,
    ) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.registrations.push(Registration {
            id,
            target,
            event_type,
            capture: options.capture,
            callback,
        });
        id
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.registrations.len();
        self.registrations.retain(|r| r.id != id);
        self.registrations.len() < before
    }

    pub(crate) fn is_registered(&self, id: ListenerId) -> bool {
        self.registrations.iter().any(|r| r.id == id)
    }

    pub(crate) fn len(&self) -> usize {
        self.registrations.len()
    }

    /// Snapshot of the listeners for one node and phase, in registration order
    pub(crate) fn matching(
        &self,
        target: NodeId,
        event_type: EventType,
        capture: bool,
    ) -> Vec<(ListenerId, Listener)> {
        self.registrations
            .iter()
            .filter(|r| r.target == target && r.event_type == event_type && r.capture == capture)
            .map(|r| (r.id, Rc::clone(&r.callback)))
            .collect()
    }
}

impl fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("next_id", &self.next_id)
            .field("listeners", &self.registrations.len())
            .finish()
    }
}
