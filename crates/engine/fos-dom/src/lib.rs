//! fOS DOM - Document Object Model
//!
//! Arena-based DOM tree with the pieces the accessibility layer drives:
//! attributes, a minimal computed-style model, focus state and
//! keyboard event dispatch.

mod attributes;
mod document;
mod events;
mod node;
mod operations;
mod style;
mod tree;

pub use attributes::{Attr, NamedNodeMap};
pub use document::{Document, FocusOptions};
pub use events::{EventType, KeyboardEvent, ListenerId, ListenerOptions, Listener};
pub use node::{ElementData, InteractiveKind, Node, NodeData};
pub use operations::{DomError, DomResult};
pub use style::{ComputedStyle, Display, Visibility};
pub use tree::DomTree;

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root (document) node ID
    pub const ROOT: NodeId = NodeId(0);

    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check whether this ID refers to a node
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    /// Convert to `Option`, mapping the sentinel to `None`
    #[inline]
    pub fn to_option(self) -> Option<NodeId> {
        self.is_valid().then_some(self)
    }

    /// Raw arena index
    pub fn index(self) -> u32 {
        self.0
    }
}
