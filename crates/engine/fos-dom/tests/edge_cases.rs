//! Edge case tests for fos-dom
//!
//! Detached nodes, focus after mutation, and dispatch while listeners change.

use std::cell::RefCell;
use std::rc::Rc;

use fos_dom::{
    ComputedStyle, Document, DomError, DomTree, EventType, FocusOptions, KeyboardEvent, ListenerOptions, NodeId,
};

// ============================================================================
// TREE EDGE CASES
// ============================================================================

#[test]
fn test_tree_empty_operations() {
    let tree = DomTree::new();

    assert_eq!(tree.len(), 1);
    assert_eq!(tree.children(NodeId::NONE).count(), 0);
    assert_eq!(tree.descendants(NodeId::NONE).count(), 0);
    assert!(!tree.contains(NodeId::ROOT, NodeId::NONE));
    assert!(tree.is_connected(NodeId::ROOT));
}

#[test]
fn test_tree_deep_nesting() {
    let mut tree = DomTree::new();
    let mut parent = tree.root();
    let mut nodes = Vec::new();
    for _ in 0..500 {
        let div = tree.create_element("div");
        tree.append_child(parent, div).unwrap();
        nodes.push(div);
        parent = div;
    }

    assert_eq!(tree.descendants(tree.root()).collect::<Vec<_>>(), nodes);
    assert_eq!(tree.ancestors(parent).count(), 500);
    assert!(tree.is_being_rendered(parent));

    tree.set_style(nodes[0], ComputedStyle::hidden()).unwrap();
    assert!(!tree.is_being_rendered(parent));
}

#[test]
fn test_append_to_text_node_fails() {
    let mut tree = DomTree::new();
    let text = tree.create_text("content");
    let div = tree.create_element("div");
    assert_eq!(tree.append_child(text, div), Err(DomError::HierarchyRequest));
    assert_eq!(tree.append_child(NodeId::NONE, div), Err(DomError::NotFound(NodeId::NONE)));
}

#[test]
fn test_reattach_detached_subtree() {
    let mut doc = Document::default();
    let body = doc.body();
    let panel = doc.append_element(body, "div").unwrap();
    let button = doc.append_element(panel, "button").unwrap();

    doc.remove_child(body, panel).unwrap();
    assert!(!doc.tree().is_connected(button));
    assert!(!doc.focus(button, FocusOptions::default()));

    doc.append_child(body, panel).unwrap();
    assert!(doc.focus(button, FocusOptions::default()));
}

// ============================================================================
// FOCUS EDGE CASES
// ============================================================================

#[test]
fn test_focus_detached_via_tree_mut() {
    let mut doc = Document::default();
    let body = doc.body();
    let button = doc.append_element(body, "button").unwrap();
    assert!(doc.focus(button, FocusOptions::default()));

    // Bypassing Document::remove_child still never reports a detached focus
    doc.tree_mut().remove_child(body, button).unwrap();
    assert_eq!(doc.active_element(), None);
}

#[test]
fn test_focus_invisible_element_allowed() {
    // visibility:hidden still generates a box; only display suppresses focus here
    let mut doc = Document::default();
    let body = doc.body();
    let button = doc.append_element(body, "button").unwrap();
    doc.tree_mut().set_style(button, ComputedStyle::invisible()).unwrap();
    assert!(doc.is_focusable_area(button));
}

// ============================================================================
// EVENT DISPATCH EDGE CASES
// ============================================================================

#[test]
fn test_listener_removed_during_dispatch() {
    let mut doc = Document::default();
    let calls = Rc::new(RefCell::new(Vec::new()));

    let outer_calls = Rc::clone(&calls);
    let outer = doc.add_event_listener(NodeId::ROOT, EventType::KeyDown, ListenerOptions::capture(), move |_, _| {
        outer_calls.borrow_mut().push("outer");
    });
    let inner_calls = Rc::clone(&calls);
    doc.add_event_listener(NodeId::ROOT, EventType::KeyDown, ListenerOptions::capture(), move |doc, _| {
        inner_calls.borrow_mut().push("inner");
        doc.remove_event_listener(outer);
    });

    doc.dispatch_key_event(&mut KeyboardEvent::tab());
    assert_eq!(*calls.borrow(), vec!["inner"]);
}

#[test]
fn test_event_targets_focused_element() {
    let mut doc = Document::default();
    let body = doc.body();
    let input = doc.append_element(body, "input").unwrap();
    doc.focus(input, FocusOptions::default());

    let seen = Rc::new(RefCell::new(NodeId::NONE));
    let target = Rc::clone(&seen);
    doc.add_event_listener(input, EventType::KeyDown, ListenerOptions::default(), move |_, event| {
        *target.borrow_mut() = event.target();
    });

    let mut event = KeyboardEvent::key_down("a");
    assert!(doc.dispatch_key_event(&mut event));
    assert_eq!(event.target(), input);
    assert_eq!(*seen.borrow(), input);
}

#[test]
fn test_keyup_does_not_reach_keydown_listeners() {
    let mut doc = Document::default();
    doc.add_event_listener(NodeId::ROOT, EventType::KeyDown, ListenerOptions::capture(), |_, event| {
        event.prevent_default();
    });

    let mut up = KeyboardEvent::tab();
    up.event_type = EventType::KeyUp;
    assert!(doc.dispatch_key_event(&mut up));
    assert!(!doc.dispatch_key_event(&mut KeyboardEvent::tab()));
}
