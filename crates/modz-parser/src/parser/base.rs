//! Shared base types for the thin AST.

use serde::Serialize;

/// Index of a node in its `NodeArena`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeIndex(pub u32);

impl NodeIndex {
    pub const NONE: NodeIndex = NodeIndex(u32::MAX);

    #[inline]
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    #[inline]
    pub fn is_some(self) -> bool {
        self != Self::NONE
    }
}

impl Default for NodeIndex {
    fn default() -> Self {
        Self::NONE
    }
}

/// An ordered list of child nodes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct NodeList {
    pub nodes: Vec<NodeIndex>,
    pub has_trailing_comma: bool,
}

impl NodeList {
    pub fn new() -> NodeList {
        NodeList::default()
    }

    pub fn from_nodes(nodes: Vec<NodeIndex>) -> NodeList {
        NodeList {
            nodes,
            has_trailing_comma: false,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
