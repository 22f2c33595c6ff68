//! Background Hiding
//!
//! Marks every top-level body child outside a dialog's lineage as
//! `aria-hidden`, and puts each attribute back exactly as it was.

use fos_dom::{Document, NodeId};

/// Attribute that removes a subtree from the accessibility tree
pub const ARIA_HIDDEN: &str = "aria-hidden";

/// One body child hidden by [`hide_siblings`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HiddenSibling {
    pub node: NodeId,
    /// `aria-hidden` value before hiding; `None` if absent
    pub previous: Option<String>,
}

/// Undo record for one [`hide_siblings`] call
#[derive(Debug, Default)]
#[must_use = "siblings stay hidden until `restore` is called"]
pub struct HideSession {
    records: Vec<HiddenSibling>,
}

impl HideSession {
    /// Put back every recorded attribute
    ///
    /// Records are consumed, so a second call does nothing.
    pub fn restore(&mut self, doc: &mut Document) {
        let count = self.records.len();
        for record in self.records.drain(..) {
            let tree = doc.tree_mut();
            let result = match &record.previous {
                Some(value) => tree.set_attribute(record.node, ARIA_HIDDEN, value).map(drop),
                None => tree.remove_attribute(record.node, ARIA_HIDDEN).map(drop),
            };
            if let Err(err) = result {
                tracing::trace!("Could not restore {:?}: {}", record.node, err);
            }
        }
        if count > 0 {
            tracing::debug!("Restored {} hidden siblings", count);
        }
    }

    /// Number of siblings still recorded
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[HiddenSibling] {
        &self.records
    }
}

/// Hide every body child that neither is nor contains `target`
///
/// Only direct children of `<body>` are touched; the dialog's own
/// ancestor chain stays exposed.
pub fn hide_siblings(doc: &mut Document, target: NodeId) -> HideSession {
    let body = doc.body();
    let mut session = HideSession::default();
    if !body.is_valid() {
        return session;
    }
    if !doc.tree().contains(body, target) {
        tracing::warn!("Hide target {:?} is not inside <body>; hiding all of it", target);
    }

    let siblings: Vec<NodeId> = doc
        .tree()
        .children(body)
        .filter(|(id, node)| node.is_element() && !doc.tree().contains(*id, target))
        .map(|(id, _)| id)
        .collect();

    for node in siblings {
        let previous = doc.tree().get_attribute(node, ARIA_HIDDEN).map(str::to_string);
        if doc.tree_mut().set_attribute(node, ARIA_HIDDEN, "true").is_ok() {
            session.records.push(HiddenSibling { node, previous });
        }
    }

    tracing::debug!("Hid {} siblings of {:?}", session.records.len(), target);
    session
}
