//! Keyboard Input
//!
//! Dispatches key presses through the document and performs the user
//! agent's default Tab action when no listener cancelled it.

use std::collections::HashMap;

use fos_dom::{Document, EventType, FocusOptions, KeyboardEvent, NodeId};

use crate::tabbable::list_tabbables;

/// Dispatch a key event, then run its default action
///
/// Returns `false` if a listener cancelled the default action.
pub fn press_key(doc: &mut Document, mut event: KeyboardEvent) -> bool {
    let proceed = doc.dispatch_key_event(&mut event);
    if proceed && event.event_type == EventType::KeyDown && event.is_tab() {
        sequential_navigation(doc, event.shift_key);
    }
    proceed
}

pub fn press_tab(doc: &mut Document) -> bool {
    press_key(doc, KeyboardEvent::tab())
}

pub fn press_shift_tab(doc: &mut Document) -> bool {
    press_key(doc, KeyboardEvent::shift_tab())
}

/// Move focus to the next (or previous) tabbable element in document order
///
/// Stepping past either end moves focus out of the document, leaving
/// nothing focused. Returns the newly focused element.
pub fn sequential_navigation(doc: &mut Document, backwards: bool) -> Option<NodeId> {
    let root = doc.tree().root();
    let order: HashMap<NodeId, usize> = doc
        .tree()
        .descendants(root)
        .enumerate()
        .map(|(index, node)| (node, index))
        .collect();
    let tabbables = list_tabbables(doc, root);
    let current = doc.active_element().and_then(|node| order.get(&node).copied());

    let next = match (current, backwards) {
        (None, false) => tabbables.first().copied(),
        (None, true) => tabbables.last().copied(),
        (Some(current), false) => tabbables.iter().copied().find(|n| order[n] > current),
        (Some(current), true) => tabbables.iter().rev().copied().find(|n| order[n] < current),
    };

    match next {
        Some(node) => {
            doc.focus(node, FocusOptions::default());
        }
        None => doc.blur(),
    }
    next
}
