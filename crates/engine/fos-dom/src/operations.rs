//! DOM Node Operations
//!
//! Error type for structural mutation: appendChild, removeChild.

use crate::NodeId;

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// Node not found in the arena
    #[error("Node not found: {0:?}")]
    NotFound(NodeId),

    /// Hierarchy error (e.g., inserting an ancestor into its descendant)
    #[error("Hierarchy request error")]
    HierarchyRequest,

    /// Operation needs an element
    #[error("Node {0:?} is not an element")]
    NotAnElement(NodeId),

    /// Node is not a child of the given parent
    #[error("Node {child:?} is not a child of {parent:?}")]
    NotAChild { parent: NodeId, child: NodeId },
}
