//! Tabbable Element Detection
//!
//! Finds the elements reachable by sequential (Tab key) navigation inside a
//! subtree. Results are never cached: the tree can change between calls.

use fos_dom::{Document, InteractiveKind, NodeId, Visibility};

/// Focus-relevant facts about one candidate element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabbableElement {
    pub node: NodeId,
    pub visible: bool,
    pub disabled: bool,
    /// Parsed `tabindex` attribute, if present
    pub explicit_tab_index: Option<i32>,
    /// Focusable without a `tabindex` (navigable links, form controls,
    /// summaries, editing hosts)
    pub naturally_focusable: bool,
}

impl TabbableElement {
    /// Inspect a node; `None` when it is not an interactive candidate at all
    pub fn inspect(doc: &Document, node: NodeId) -> Option<Self> {
        let element = doc.tree().element(node)?;
        let explicit_tab_index = element.get_attr("tabindex").map(parse_tab_index);
        let naturally_focusable = match element.interactive_kind() {
            Some(InteractiveKind::Link { has_href }) => has_href,
            Some(_) => true,
            None => false,
        };
        if explicit_tab_index.is_none() && !naturally_focusable {
            return None;
        }

        Some(Self {
            node,
            visible: is_visible(doc, node),
            disabled: is_disabled(doc, node),
            explicit_tab_index,
            naturally_focusable,
        })
    }

    /// Effective sequential navigation index
    pub fn tab_index(&self) -> i32 {
        match self.explicit_tab_index {
            Some(index) => index,
            None if self.naturally_focusable => 0,
            None => -1,
        }
    }

    pub fn is_tabbable(&self) -> bool {
        self.visible && !self.disabled && self.tab_index() >= 0
    }
}

/// Parse a `tabindex` value like `parseInt`: leading integer, else 0
pub fn parse_tab_index(value: &str) -> i32 {
    let value = value.trim_start();
    let (negative, digits) = match value.as_bytes().first() {
        Some(b'-') => (true, &value[1..]),
        Some(b'+') => (false, &value[1..]),
        _ => (false, value),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    let digits = &digits[..end];
    if digits.is_empty() {
        return 0;
    }
    // All-digit input only fails to parse on overflow: saturate.
    let n = digits.parse::<i64>().unwrap_or(i64::MAX);
    let n = if negative { -n } else { n };
    n.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Effective tab index of any node (-1 for non-candidates)
pub fn tab_index(doc: &Document, node: NodeId) -> i32 {
    TabbableElement::inspect(doc, node).map_or(-1, |t| t.tab_index())
}

/// Whether the node is rendered and painted
///
/// Detached nodes count as not visible. Content of a closed `<details>` is
/// hidden, except for its summary.
pub fn is_visible(doc: &Document, node: NodeId) -> bool {
    let tree = doc.tree();
    if !tree.is_being_rendered(node) || tree.computed_visibility(node) != Visibility::Visible {
        return false;
    }

    tree.ancestors(node).all(|ancestor| {
        let Some(details) = tree.element(ancestor) else {
            return true;
        };
        if !details.is("details") || details.has_attr("open") {
            return true;
        }
        first_child_element(doc, ancestor, "summary").is_some_and(|summary| tree.contains(summary, node))
    })
}

/// Disabled form control, or inside a disabled fieldset outside its legend
fn is_disabled(doc: &Document, node: NodeId) -> bool {
    let tree = doc.tree();
    let Some(element) = tree.element(node) else {
        return false;
    };
    if element.is_disabled() {
        return true;
    }
    if !matches!(element.tag_name.as_str(), "button" | "input" | "select" | "textarea") {
        return false;
    }

    tree.ancestors(node).any(|ancestor| {
        tree.element(ancestor).is_some_and(|e| e.is("fieldset") && e.has_attr("disabled"))
            && !first_child_element(doc, ancestor, "legend").is_some_and(|legend| tree.contains(legend, node))
    })
}

fn first_child_element(doc: &Document, parent: NodeId, tag: &str) -> Option<NodeId> {
    doc.tree()
        .children(parent)
        .find(|(_, node)| node.as_element().is_some_and(|e| e.is(tag)))
        .map(|(id, _)| id)
}

pub fn is_tabbable(doc: &Document, node: NodeId) -> bool {
    TabbableElement::inspect(doc, node).is_some_and(|t| t.is_tabbable())
}

/// Tabbable descendants of `root` in document order
///
/// `root` itself is not included. A missing root yields an empty list.
pub fn list_tabbables(doc: &Document, root: NodeId) -> Vec<NodeId> {
    doc.tree()
        .descendants(root)
        .filter(|&node| is_tabbable(doc, node))
        .collect()
}
