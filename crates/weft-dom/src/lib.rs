//! weft DOM - Document Object Model
//!
//! Arena-allocated DOM tree with shadow roots, simple selectors and a
//! listener table keyed by node and event name.

mod node;
mod tree;
mod document;
mod operations;
mod shadow;
mod selector;
mod classlist;
mod events;

pub use node::{Node, NodeData, ElementData, Attribute, TextData};
pub use tree::{DomTree, ChildIter};
pub use document::Document;
pub use operations::{DomError, DomResult};
pub use selector::Selector;
pub use classlist::DOMTokenList;
pub use events::ListenerTable;

use std::fmt;

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root node ID
    pub const ROOT: NodeId = NodeId(0);
    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check that this id points at a node
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    /// Arena index
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub(crate) fn option(self) -> Option<NodeId> {
        self.is_valid().then_some(self)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "#{}", self.0)
        } else {
            f.write_str("#none")
        }
    }
}
