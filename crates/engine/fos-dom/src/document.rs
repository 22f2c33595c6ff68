//! Document - High-level document API
//!
//! Owns the tree plus the per-document state that is not part of any
//! node: the focused element and the registered event listeners.

use std::rc::Rc;

use crate::events::ListenerRegistry;
use crate::{
    DomResult, DomTree, EventType, InteractiveKind, KeyboardEvent, ListenerId, ListenerOptions, NodeId,
};

/// Options for [`Document::focus`]
#[derive(Debug, Clone, Copy, Default)]
pub struct FocusOptions {
    /// Skip scrolling the focused element into view
    pub prevent_scroll: bool,
}

impl FocusOptions {
    pub fn prevent_scroll() -> Self {
        Self { prevent_scroll: true }
    }
}

/// HTML Document
#[derive(Debug)]
pub struct Document {
    /// The DOM tree
    pub tree: DomTree,
    /// Document URL
    url: String,
    /// Cached reference to <html> element
    html_element: NodeId,
    /// Cached reference to <head> element
    head_element: NodeId,
    /// Cached reference to <body> element
    body_element: NodeId,
    /// Focused element (NONE when focus is on the viewport)
    focused: NodeId,
    /// Last element scrolled into view by a focus call
    scrolled_into_view: NodeId,
    listeners: ListenerRegistry,
}

impl Document {
    /// Create a new document with html/head/body
    pub fn new(url: &str) -> Self {
        let mut doc = Self::empty(url);
        let html = doc.tree.create_element("html");
        let head = doc.tree.create_element("head");
        let body = doc.tree.create_element("body");

        // Fresh nodes under a fresh root: these appends cannot fail.
        doc.tree.append_child(NodeId::ROOT, html).ok();
        doc.tree.append_child(html, head).ok();
        doc.tree.append_child(html, body).ok();

        doc.html_element = html;
        doc.head_element = head;
        doc.body_element = body;
        doc
    }

    /// Create an empty document (no structure)
    pub fn empty(url: &str) -> Self {
        Self {
            tree: DomTree::new(),
            url: url.to_string(),
            html_element: NodeId::NONE,
            head_element: NodeId::NONE,
            body_element: NodeId::NONE,
            focused: NodeId::NONE,
            scrolled_into_view: NodeId::NONE,
            listeners: ListenerRegistry::default(),
        }
    }

    /// Get document URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get <html> element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get <head> element
    pub fn head(&self) -> NodeId {
        self.head_element
    }

    /// Get <body> element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    /// Get connected element by ID
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree
            .descendants(self.tree.root())
            .find(|&n| self.tree.get_attribute(n, "id") == Some(id))
    }

    /// Create an element and append it to `parent`
    pub fn append_element(&mut self, parent: NodeId, tag_name: &str) -> DomResult<NodeId> {
        let child = self.tree.create_element(tag_name);
        self.tree.append_child(parent, child)
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        self.tree.append_child(parent, child)
    }

    /// Remove a child; focus inside the removed subtree is dropped
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        let removed = self.tree.remove_child(parent, child)?;
        if self.focused.is_valid() && self.tree.contains(removed, self.focused) {
            tracing::trace!("Focused node removed with subtree {:?}", removed);
            self.focused = NodeId::NONE;
        }
        Ok(removed)
    }

    /// Currently focused element
    ///
    /// Returns `None` when nothing is focused or the focused node has been
    /// detached since it received focus.
    pub fn active_element(&self) -> Option<NodeId> {
        self.focused.to_option().filter(|&n| self.tree.is_connected(n))
    }

    /// Whether `focus()` would succeed on this node
    pub fn is_focusable_area(&self, id: NodeId) -> bool {
        let Some(element) = self.tree.element(id) else {
            return false;
        };
        if element.is_disabled() || !self.tree.is_being_rendered(id) {
            return false;
        }
        if element.has_attr("tabindex") {
            return true;
        }
        match element.interactive_kind() {
            Some(InteractiveKind::Link { has_href }) => has_href,
            Some(_) => true,
            None => false,
        }
    }

    /// Move focus to `id`
    ///
    /// Silently does nothing and returns `false` when the node cannot take
    /// focus (detached, not rendered, disabled, or not focusable).
    pub fn focus(&mut self, id: NodeId, options: FocusOptions) -> bool {
        if !self.is_focusable_area(id) {
            tracing::trace!("Focus refused for {:?}", id);
            return false;
        }
        self.focused = id;
        if !options.prevent_scroll {
            self.scrolled_into_view = id;
        }
        true
    }

    /// Drop focus back to the viewport
    pub fn blur(&mut self) {
        self.focused = NodeId::NONE;
    }

    /// Last element a focus call scrolled into view
    pub fn scrolled_into_view(&self) -> Option<NodeId> {
        self.scrolled_into_view.to_option()
    }

    /// Register a listener on `target`
    pub fn add_event_listener<F>(
        &mut self,
        target: NodeId,
        event_type: EventType,
        options: ListenerOptions,
        callback: F,
    ) -> ListenerId
    where
        F: Fn(&mut Document, &mut KeyboardEvent) + 'static,
    {
        self.listeners.add(target, event_type, options, Rc::new(callback))
    }

    /// Remove a listener; returns `false` if it was already gone
    pub fn remove_event_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Dispatch a keyboard event at the focused element (or body)
    ///
    /// Capture listeners run root-to-target; at each node the most recently
    /// registered one runs first, so an inner scope sees the event before
    /// the outer scopes that were set up around it. Bubble listeners then
    /// run target-to-root in registration order.
    ///
    /// Returns `true` if the default action should still happen.
    pub fn dispatch_key_event(&mut self, event: &mut KeyboardEvent) -> bool {
        let target = self
            .active_element()
            .or(self.body_element.to_option().filter(|&b| self.tree.is_connected(b)))
            .unwrap_or(NodeId::ROOT);
        event.set_target(target);

        let mut path: Vec<NodeId> = std::iter::once(target).chain(self.tree.ancestors(target)).collect();
        path.reverse();

        for &node in &path {
            let listeners = self.listeners.matching(node, event.event_type, true);
            if self.invoke(listeners.into_iter().rev(), event) {
                return !event.is_default_prevented();
            }
        }
        for &node in path.iter().rev() {
            let listeners = self.listeners.matching(node, event.event_type, false);
            if self.invoke(listeners.into_iter(), event) {
                break;
            }
        }
        !event.is_default_prevented()
    }

    /// Run listeners in order; returns `true` if propagation was stopped
    fn invoke(
        &mut self,
        listeners: impl Iterator<Item = (ListenerId, crate::Listener)>,
        event: &mut KeyboardEvent,
    ) -> bool {
        for (id, callback) in listeners {
            // A listener may have been removed by an earlier one.
            if !self.listeners.is_registered(id) {
                continue;
            }
            callback(self, event);
            if event.is_propagation_stopped() {
                return true;
            }
        }
        false
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}
