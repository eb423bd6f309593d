//! Micropop DOM - Host document model
//!
//! Minimal element tree the popup engine runs against: attribute get/set,
//! class-list membership, lookup by identifier, and listener registration.

mod node;
mod tree;
mod document;
mod events;

pub use node::{Node, NodeData, ElementData, Attr};
pub use tree::{Children, DomTree};
pub use document::Document;
pub use events::{EventType, InputEvent, ListenerId};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root node ID
    pub const ROOT: NodeId = NodeId(0);

    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check whether this id refers to a node at all
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }
}
