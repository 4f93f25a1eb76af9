//! Node records.
//!
//! A node's identity is its index in the node array; index 0 is always the
//! root. Children are referenced by index and are always created after
//! their parent, so the tree cannot contain cycles.

use overlay_core::{FixedArray, Rect};

use crate::callback::CallbackSlot;
use crate::style::ClassId;

/// Maximum number of nodes in one blueprint.
pub const MAX_NODES: usize = 256;

/// Maximum number of children per node.
pub const MAX_CHILDREN: usize = 4;

/// Fixed-capacity node storage.
pub type NodeArray = FixedArray<Node, MAX_NODES>;

/// Index of a node in the node array.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NodeId(pub u8);

impl NodeId {
    /// The root node.
    pub const ROOT: Self = Self(0);

    /// Returns the array index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Ordered child indices, at most [`MAX_CHILDREN`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChildSlots {
    ids: [NodeId; MAX_CHILDREN],
    len: u8,
}

impl ChildSlots {
    /// Appends a child. Returns `false` when every slot is taken.
    #[must_use]
    pub fn push(&mut self, child: NodeId) -> bool {
        let len = usize::from(self.len);
        if len == MAX_CHILDREN {
            return false;
        }
        self.ids[len] = child;
        self.len += 1;
        true
    }

    /// The children in declaration order.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[NodeId] {
        &self.ids[..usize::from(self.len)]
    }

    /// Number of children.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        usize::from(self.len)
    }

    /// Returns true if the node has no children.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Pointer interaction state of a node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NodeState {
    /// Pointer is over the node.
    pub hovered: bool,
    /// Left button latched.
    pub left_clicked: bool,
    /// Right button latched.
    pub right_clicked: bool,
    /// Middle button latched.
    pub middle_clicked: bool,
}

/// One rectangular UI element.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Node {
    /// Resolved rectangle in window coordinates.
    pub area: Rect,
    /// Child nodes.
    pub children: ChildSlots,
    /// Style class, if the declared name resolved.
    pub class: Option<ClassId>,
    /// Hook invoked on input state changes.
    pub on_state: Option<CallbackSlot>,
    /// Hook invoked once per frame.
    pub on_frame: Option<CallbackSlot>,
    /// Interaction state.
    pub state: NodeState,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_slots_bounded() {
        let mut slots = ChildSlots::default();
        for i in 1..=4 {
            assert!(slots.push(NodeId(i)));
        }

        assert!(!slots.push(NodeId(5)));
        assert_eq!(slots.as_slice(), &[NodeId(1), NodeId(2), NodeId(3), NodeId(4)]);
    }

    #[test]
    fn test_default_node_is_inert() {
        let node = Node::default();
        assert!(node.children.is_empty());
        assert!(node.class.is_none());
        assert!(node.on_state.is_none());
        assert_eq!(node.state, NodeState::default());
    }
}
