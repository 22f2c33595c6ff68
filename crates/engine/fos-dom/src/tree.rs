//! DOM Tree (arena-based allocation)
//!
//! Removed nodes stay in the arena; they are only unlinked from their
//! parent, so callers holding a `NodeId` can still read and write them.

use crate::{ComputedStyle, DomError, DomResult, ElementData, Node, NodeId, Visibility};

/// Arena-based DOM tree
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a tree holding only the document node
    pub fn new() -> Self {
        Self { nodes: vec![Node::document()] }
    }

    /// Document node
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0 as usize)
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0 as usize)
    }

    /// Number of nodes in the arena, detached ones included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(Node::as_element)
    }

    fn element_mut(&mut self, id: NodeId) -> DomResult<&mut ElementData> {
        let node = self.get_mut(id).ok_or(DomError::NotFound(id))?;
        node.as_element_mut().ok_or(DomError::NotAnElement(id))
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag_name: &str) -> NodeId {
        self.push(Node::element(tag_name))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push(Node::text(content))
    }

    /// Append `child` as the last child of `parent`, moving it if attached elsewhere
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        let parent_node = self.get(parent).ok_or(DomError::NotFound(parent))?;
        if !matches!(parent_node.data, crate::NodeData::Document | crate::NodeData::Element(_)) {
            return Err(DomError::HierarchyRequest);
        }
        if self.get(child).is_none() {
            return Err(DomError::NotFound(child));
        }
        if child == NodeId::ROOT || self.contains(child, parent) {
            return Err(DomError::HierarchyRequest);
        }

        self.detach(child);

        let last = self.nodes[parent.0 as usize].last_child;
        {
            let node = &mut self.nodes[child.0 as usize];
            node.parent = parent;
            node.prev_sibling = last;
            node.next_sibling = NodeId::NONE;
        }
        if last.is_valid() {
            self.nodes[last.0 as usize].next_sibling = child;
        } else {
            self.nodes[parent.0 as usize].first_child = child;
        }
        self.nodes[parent.0 as usize].last_child = child;
        Ok(child)
    }

    /// Remove `child` from `parent`; the node stays in the arena
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        let node = self.get(child).ok_or(DomError::NotFound(child))?;
        if node.parent != parent {
            return Err(DomError::NotAChild { parent, child });
        }
        self.detach(child);
        Ok(child)
    }

    fn detach(&mut self, id: NodeId) {
        let (parent, prev, next) = {
            let node = &self.nodes[id.0 as usize];
            (node.parent, node.prev_sibling, node.next_sibling)
        };
        if !parent.is_valid() {
            return;
        }
        if prev.is_valid() {
            self.nodes[prev.0 as usize].next_sibling = next;
        } else {
            self.nodes[parent.0 as usize].first_child = next;
        }
        if next.is_valid() {
            self.nodes[next.0 as usize].prev_sibling = prev;
        } else {
            self.nodes[parent.0 as usize].last_child = prev;
        }
        let node = &mut self.nodes[id.0 as usize];
        node.parent = NodeId::NONE;
        node.prev_sibling = NodeId::NONE;
        node.next_sibling = NodeId::NONE;
    }

    /// Parent of a node, if attached
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent.to_option())
    }

    /// Direct children in order
    pub fn children(&self, id: NodeId) -> Children<'_> {
        let next = self.get(id).map_or(NodeId::NONE, |n| n.first_child);
        Children { tree: self, next }
    }

    /// Proper ancestors, nearest first
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |&n| self.parent(n))
    }

    /// Descendants in depth-first pre-order, excluding `root`
    pub fn descendants(&self, root: NodeId) -> Descendants<'_> {
        let next = self.get(root).map_or(NodeId::NONE, |n| n.first_child);
        Descendants { tree: self, root, next }
    }

    /// Inclusive containment: `node` is `ancestor` or lies inside it
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        if self.get(node).is_none() {
            return false;
        }
        node == ancestor || self.ancestors(node).any(|a| a == ancestor)
    }

    /// Whether the node is reachable from the document node
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.contains(NodeId::ROOT, id)
    }

    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?.get_attr(name)
    }

    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.element(id).is_some_and(|e| e.has_attr(name))
    }

    /// Set an attribute, returning the previous value
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> DomResult<Option<String>> {
        Ok(self.element_mut(id)?.attrs.set_attribute(name, value))
    }

    /// Remove an attribute, returning the removed value
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> DomResult<Option<String>> {
        Ok(self.element_mut(id)?.attrs.remove_attribute(name).map(|a| a.value))
    }

    pub fn style(&self, id: NodeId) -> Option<ComputedStyle> {
        self.element(id).map(|e| e.style)
    }

    pub fn set_style(&mut self, id: NodeId, style: ComputedStyle) -> DomResult<()> {
        self.element_mut(id)?.style = style;
        Ok(())
    }

    /// Connected, and no inclusive ancestor suppresses box generation
    /// (`display: none`, the `hidden` attribute, or a hidden-type input)
    pub fn is_being_rendered(&self, id: NodeId) -> bool {
        if !self.is_connected(id) {
            return false;
        }
        std::iter::once(id)
            .chain(self.ancestors(id))
            .filter_map(|n| self.element(n))
            .all(|e| !e.style.is_display_none() && !e.has_attr("hidden") && !e.is_hidden_input())
    }

    /// Inherited `visibility`, resolved up the ancestor chain
    pub fn computed_visibility(&self, id: NodeId) -> Visibility {
        std::iter::once(id)
            .chain(self.ancestors(id))
            .filter_map(|n| self.element(n))
            .find_map(|e| e.style.visibility)
            .unwrap_or(Visibility::Visible)
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over direct children
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl<'a> Iterator for Children<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next.to_option()?;
        let node = self.tree.get(id)?;
        self.next = node.next_sibling;
        Some((id, node))
    }
}

/// Pre-order iterator over a subtree
pub struct Descendants<'a> {
    tree: &'a DomTree,
    root: NodeId,
    next: NodeId,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next.to_option()?;
        let node = self.tree.get(current)?;

        self.next = if node.first_child.is_valid() {
            node.first_child
        } else {
            let mut cursor = current;
            loop {
                if cursor == self.root {
                    break NodeId::NONE;
                }
                let Some(n) = self.tree.get(cursor) else {
                    break NodeId::NONE;
                };
                if n.next_sibling.is_valid() {
                    break n.next_sibling;
                }
                cursor = n.parent;
                if !cursor.is_valid() {
                    break NodeId::NONE;
                }
            }
        };
        Some(current)
    }
}
