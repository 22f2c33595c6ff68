//! Focus Trap
//!
//! Confines Tab / Shift+Tab cycling to a container until released.
//!
//! Each trap owns one capture-phase keydown listener on the document.
//! Capture listeners run newest-first, so with nested dialogs the innermost
//! trap sees Tab first and marks it handled; outer traps stay registered
//! but step aside until the inner one is released. Dispatch itself is never
//! stopped, so page-level key listeners keep working.

use fos_dom::{Document, EventType, FocusOptions, KeyboardEvent, ListenerId, ListenerOptions, NodeId};

use crate::config::FocusConfig;
use crate::tabbable::list_tabbables;

/// Where focus goes when a trap is released
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RestoreFocus {
    /// Whatever was focused when the trap started
    #[default]
    Previous,
    /// A specific element
    Node(NodeId),
    /// Leave focus where it is
    None,
}

/// Options for [`FocusTrap::start`]
#[derive(Debug, Clone, Copy)]
pub struct TrapOptions {
    /// Element to focus instead of the first tabbable
    pub initial_focus: Option<NodeId>,
    pub restore_focus: RestoreFocus,
    pub prevent_scroll: bool,
}

impl Default for TrapOptions {
    fn default() -> Self {
        Self {
            initial_focus: None,
            restore_focus: RestoreFocus::Previous,
            prevent_scroll: true,
        }
    }
}

impl TrapOptions {
    pub fn from_config(config: &FocusConfig) -> Self {
        Self { prevent_scroll: config.prevent_scroll, ..Default::default() }
    }

    pub fn with_initial_focus(mut self, node: NodeId) -> Self {
        self.initial_focus = Some(node);
        self
    }

    pub fn with_restore_focus(mut self, restore: RestoreFocus) -> Self {
        self.restore_focus = restore;
        self
    }

    fn focus_options(&self) -> FocusOptions {
        FocusOptions { prevent_scroll: self.prevent_scroll }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TrapState {
    Active,
    Released,
}

/// An active focus-containment scope
///
/// Must be ended with [`FocusTrap::release`]; dropping it leaves the key
/// listener registered.
#[derive(Debug)]
#[must_use = "a focus trap stays active until `release` is called"]
pub struct FocusTrap {
    container: NodeId,
    previously_focused: Option<NodeId>,
    restore_target: Option<NodeId>,
    listener: ListenerId,
    focus_options: FocusOptions,
    state: TrapState,
}

impl FocusTrap {
    /// Start trapping focus inside `container`
    pub fn start(doc: &mut Document, container: NodeId, options: TrapOptions) -> Self {
        let previously_focused = doc.active_element();
        let focus_options = options.focus_options();

        match options.initial_focus {
            Some(target) => {
                if !doc.focus(target, focus_options) {
                    tracing::trace!("Initial focus target {:?} refused focus", target);
                }
            }
            None => {
                focus_first_with(doc, container, None, focus_options);
            }
        }

        let listener = doc.add_event_listener(
            NodeId::ROOT,
            EventType::KeyDown,
            ListenerOptions::capture(),
            move |doc, event| handle_key(doc, event, container, focus_options),
        );

        let restore_target = match options.restore_focus {
            RestoreFocus::Previous => previously_focused,
            RestoreFocus::Node(node) => Some(node),
            RestoreFocus::None => None,
        };

        tracing::debug!(
            "Focus trap started on {:?} (previously focused {:?})",
            container,
            previously_focused
        );

        Self {
            container,
            previously_focused,
            restore_target,
            listener,
            focus_options,
            state: TrapState::Active,
        }
    }

    /// Stop trapping and restore focus
    ///
    /// Focus is restored only if the target is still in the document.
    /// Calling this again is a no-op.
    pub fn release(&mut self, doc: &mut Document) {
        if self.state == TrapState::Released {
            tracing::debug!("Focus trap on {:?} already released", self.container);
            return;
        }
        self.state = TrapState::Released;
        doc.remove_event_listener(self.listener);

        match self.restore_target {
            Some(target) if doc.tree().is_connected(target) => {
                if !doc.focus(target, self.focus_options) {
                    tracing::trace!("Restore target {:?} refused focus", target);
                }
            }
            Some(target) => tracing::trace!("Restore target {:?} detached, leaving focus", target),
            None => {}
        }
        tracing::debug!("Focus trap on {:?} released", self.container);
    }

    pub fn is_active(&self) -> bool {
        self.state == TrapState::Active
    }

    pub fn container(&self) -> NodeId {
        self.container
    }

    pub fn previously_focused(&self) -> Option<NodeId> {
        self.previously_focused
    }

    pub fn restore_target(&self) -> Option<NodeId> {
        self.restore_target
    }
}

/// Focus the first tabbable inside `root`
///
/// With no tabbable descendants, focuses `fallback` (or `root` itself)
/// through a temporary `tabindex="-1"`. Returns whether focus moved.
pub fn focus_first(doc: &mut Document, root: NodeId, fallback: Option<NodeId>) -> bool {
    focus_first_with(doc, root, fallback, FocusOptions::prevent_scroll())
}

fn focus_first_with(doc: &mut Document, root: NodeId, fallback: Option<NodeId>, options: FocusOptions) -> bool {
    match list_tabbables(doc, root).first() {
        Some(&first) => doc.focus(first, options),
        None => focus_programmatically(doc, fallback.unwrap_or(root), options),
    }
}

/// Focus a node that may not be focusable on its own
///
/// A `tabindex="-1"` is added for the duration of the focus call only, so
/// the node never joins the tab order. An author-set tabindex is left as is.
fn focus_programmatically(doc: &mut Document, node: NodeId, options: FocusOptions) -> bool {
    let added = !doc.tree().has_attribute(node, "tabindex")
        && doc.tree_mut().set_attribute(node, "tabindex", "-1").is_ok();
    let focused = doc.focus(node, options);
    if added {
        doc.tree_mut().remove_attribute(node, "tabindex").ok();
    }
    focused
}

fn handle_key(doc: &mut Document, event: &mut KeyboardEvent, container: NodeId, options: FocusOptions) {
    // An inner trap already owns this Tab; other listeners still see it.
    if !event.is_tab() || event.is_handled() {
        return;
    }
    event.mark_handled();

    let tabbables = list_tabbables(doc, container);
    let (Some(&first), Some(&last)) = (tabbables.first(), tabbables.last()) else {
        event.prevent_default();
        focus_programmatically(doc, container, options);
        return;
    };

    let active = doc.active_element();
    let outside = match active {
        Some(node) => node == container || !doc.tree().contains(container, node),
        None => true,
    };

    let wrap_to = if event.shift_key {
        (outside || active == Some(first)).then_some(last)
    } else {
        (outside || active == Some(last)).then_some(first)
    };

    if let Some(target) = wrap_to {
        tracing::trace!("Tab wraps from {:?} to {:?}", active, target);
        event.prevent_default();
        doc.focus(target, options);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dialog_with_buttons(doc: &mut Document, count: usize) -> (NodeId, Vec<NodeId>) {
        let body = doc.body();
        let dialog = doc.append_element(body, "div").unwrap();
        let buttons = (0..count)
            .map(|_| doc.append_element(dialog, "button").unwrap())
            .collect();
        (dialog, buttons)
    }

    #[test]
    fn test_start_focuses_first_tabbable() {
        let mut doc = Document::default();
        let (dialog, buttons) = dialog_with_buttons(&mut doc, 2);
        let mut trap = FocusTrap::start(&mut doc, dialog, TrapOptions::default());

        assert_eq!(doc.active_element(), Some(buttons[0]));
        assert!(trap.is_active());
        assert_eq!(doc.listener_count(), 1);

        trap.release(&mut doc);
        assert!(!trap.is_active());
        assert_eq!(doc.listener_count(), 0);
    }

    #[test]
    fn test_empty_container_gets_focus_without_tabindex() {
        let mut doc = Document::default();
        let (dialog, _) = dialog_with_buttons(&mut doc, 0);
        let mut trap = FocusTrap::start(&mut doc, dialog, TrapOptions::default());

        assert_eq!(doc.active_element(), Some(dialog));
        assert!(!doc.tree().has_attribute(dialog, "tabindex"));
        trap.release(&mut doc);
    }

    #[test]
    fn test_author_tabindex_preserved() {
        let mut doc = Document::default();
        let (dialog, _) = dialog_with_buttons(&mut doc, 0);
        doc.tree_mut().set_attribute(dialog, "tabindex", "-1").unwrap();
        let mut trap = FocusTrap::start(&mut doc, dialog, TrapOptions::default());

        assert_eq!(doc.tree().get_attribute(dialog, "tabindex"), Some("-1"));
        trap.release(&mut doc);
    }

    #[test]
    fn test_initial_focus_failure_is_swallowed() {
        let mut doc = Document::default();
        let (dialog, buttons) = dialog_with_buttons(&mut doc, 1);
        let plain = doc.append_element(dialog, "span").unwrap();

        let mut trap = FocusTrap::start(&mut doc, dialog, TrapOptions::default().with_initial_focus(plain));
        assert_eq!(doc.active_element(), None);

        let mut trap2 = FocusTrap::start(&mut doc, dialog, TrapOptions::default().with_initial_focus(buttons[0]));
        assert_eq!(doc.active_element(), Some(buttons[0]));
        trap2.release(&mut doc);
        trap.release(&mut doc);
    }

    #[test]
    fn test_double_release_is_noop() {
        let mut doc = Document::default();
        let opener = doc.append_element(doc.body(), "button").unwrap();
        doc.focus(opener, FocusOptions::default());
        let (dialog, buttons) = dialog_with_buttons(&mut doc, 1);

        let mut trap = FocusTrap::start(&mut doc, dialog, TrapOptions::default());
        trap.release(&mut doc);
        assert_eq!(doc.active_element(), Some(opener));

        doc.focus(buttons[0], FocusOptions::default());
        trap.release(&mut doc);
        assert_eq!(doc.active_element(), Some(buttons[0]));
    }

    #[test]
    fn test_restore_focus_options() {
        let mut doc = Document::default();
        let body = doc.body();
        let opener = doc.append_element(body, "button").unwrap();
        let other = doc.append_element(body, "button").unwrap();
        let (dialog, buttons) = dialog_with_buttons(&mut doc, 1);

        doc.focus(opener, FocusOptions::default());
        let mut trap = FocusTrap::start(&mut doc, dialog, TrapOptions::default().with_restore_focus(RestoreFocus::None));
        assert_eq!(trap.previously_focused(), Some(opener));
        assert_eq!(trap.restore_target(), None);
        trap.release(&mut doc);
        assert_eq!(doc.active_element(), Some(buttons[0]));

        let mut trap = FocusTrap::start(
            &mut doc,
            dialog,
            TrapOptions::default().with_restore_focus(RestoreFocus::Node(other)),
        );
        trap.release(&mut doc);
        assert_eq!(doc.active_element(), Some(other));
    }

    #[test]
    fn test_detached_restore_target_is_skipped() {
        let mut doc = Document::default();
        let body = doc.body();
        let opener = doc.append_element(body, "button").unwrap();
        let (dialog, buttons) = dialog_with_buttons(&mut doc, 1);
        doc.focus(opener, FocusOptions::default());

        let mut trap = FocusTrap::start(&mut doc, dialog, TrapOptions::default());
        doc.remove_child(body, opener).unwrap();
        trap.release(&mut doc);
        assert_eq!(doc.active_element(), Some(buttons[0]));
    }

    #[test]
    fn test_page_listeners_still_see_tab() {
        use crate::keyboard::press_tab;
        use std::cell::Cell;
        use std::rc::Rc;

        let mut doc = Document::default();
        let (dialog, buttons) = dialog_with_buttons(&mut doc, 3);
        let tabs = Rc::new(Cell::new(0));
        let counter = Rc::clone(&tabs);
        let body = doc.body();
        doc.add_event_listener(body, EventType::KeyDown, ListenerOptions::default(), move |_, event| {
            if event.is_tab() {
                counter.set(counter.get() + 1);
            }
        });

        let mut trap = FocusTrap::start(&mut doc, dialog, TrapOptions::default());
        doc.focus(buttons[1], FocusOptions::default());
        assert!(press_tab(&mut doc));
        assert_eq!(tabs.get(), 1);
        assert_eq!(doc.active_element(), Some(buttons[2]));

        // A wrap cancels the default action but still reaches the page
        assert!(!press_tab(&mut doc));
        assert_eq!(tabs.get(), 2);
        assert_eq!(doc.active_element(), Some(buttons[0]));
        trap.release(&mut doc);
    }

    #[test]
    fn test_outer_trap_steps_aside_for_handled_event() {
        let mut doc = Document::default();
        let (dialog, buttons) = dialog_with_buttons(&mut doc, 2);
        let mut trap = FocusTrap::start(&mut doc, dialog, TrapOptions::default());
        doc.focus(buttons[1], FocusOptions::default());

        let mut event = KeyboardEvent::tab();
        event.mark_handled();
        assert!(doc.dispatch_key_event(&mut event));
        assert_eq!(doc.active_element(), Some(buttons[1]));
        trap.release(&mut doc);
    }

    #[test]
    fn test_focus_first_fallback() {
        let mut doc = Document::default();
        let (dialog, _) = dialog_with_buttons(&mut doc, 0);
        let heading = doc.append_element(dialog, "h2").unwrap();

        assert!(focus_first(&mut doc, dialog, Some(heading)));
        assert_eq!(doc.active_element(), Some(heading));
        assert!(!doc.tree().has_attribute(heading, "tabindex"));

        let button = doc.append_element(dialog, "button").unwrap();
        assert!(focus_first(&mut doc, dialog, Some(heading)));
        assert_eq!(doc.active_element(), Some(button));
    }
}
