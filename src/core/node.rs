//! # Tree Nodes
//!
//! A node is one entry in the hierarchy. Nodes are built detached with the
//! `TreeNode` builder and only become part of a tree when they are handed to
//! `add_children`, at which point they move into the tree's arena and are
//! addressed by `NodeId` from then on.
//!
//! ```text
//! TreeNode<T> (detached builder)
//!     │  add_children()
//!     ▼
//! Slot<T> in Tree<T>.slots ──parent──▶ Parent::Root | Parent::Node(NodeId)
//! ```

use std::fmt;
use std::sync::Arc;

use crate::core::tree::NodeMut;

/// Handle to a node stored in a `Tree`.
///
/// Carries a generation so that an id held across a `refresh` never resolves
/// to whatever node later reuses the same slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

/// Non-owning back-reference from a node to whatever holds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parent {
    Root,
    Node(NodeId),
}

/// Caller-supplied open/close callback.
///
/// Invoked once per open/close transition with a mutable handle to the node
/// being toggled. An `on_open` hook used for lazy population is expected to
/// call `add_children` on that handle before it returns: the toggle does not
/// return until the hook does, so the very next render already sees the new
/// children. A hook that blocks stalls the caller's event loop.
pub type Hook<T> = Arc<dyn Fn(NodeMut<'_, T>) + Send + Sync>;

/// A detached node, ready to be attached with `add_children`.
pub struct TreeNode<T> {
    pub(crate) name: String,
    pub(crate) icon: String,
    pub(crate) can_have_children: bool,
    pub(crate) payload: T,
    pub(crate) on_open: Option<Hook<T>>,
    pub(crate) on_close: Option<Hook<T>>,
    pub(crate) children: Vec<TreeNode<T>>,
}

impl<T: Default> TreeNode<T> {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_payload(name, T::default())
    }
}

impl<T> TreeNode<T> {
    pub fn with_payload(name: impl Into<String>, payload: T) -> Self {
        Self {
            name: name.into(),
            icon: String::new(),
            can_have_children: false,
            payload,
            on_open: None,
            on_close: None,
            children: Vec::new(),
        }
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    /// Mark the node as a container even before it has children, so it is
    /// drawn with a collapse marker and can be toggled to trigger `on_open`.
    pub fn can_have_children(mut self, can: bool) -> Self {
        self.can_have_children = can;
        self
    }

    pub fn on_open(mut self, hook: Hook<T>) -> Self {
        self.on_open = Some(hook);
        self
    }

    pub fn on_close(mut self, hook: Hook<T>) -> Self {
        self.on_close = Some(hook);
        self
    }

    /// Attach initial children. Like `add_children` on an attached node this
    /// forces `can_have_children` on.
    pub fn children(mut self, children: impl IntoIterator<Item = TreeNode<T>>) -> Self {
        self.children.extend(children);
        self.can_have_children = true;
        self
    }
}

impl<T: fmt::Debug> fmt::Debug for TreeNode<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeNode")
            .field("name", &self.name)
            .field("icon", &self.icon)
            .field("can_have_children", &self.can_have_children)
            .field("payload", &self.payload)
            .field("children", &self.children)
            .finish_non_exhaustive()
    }
}

/// Arena storage for an attached node.
pub(crate) struct Slot<T> {
    pub(crate) name: String,
    pub(crate) icon: String,
    pub(crate) can_have_children: bool,
    pub(crate) open: bool,
    pub(crate) payload: T,
    pub(crate) parent: Parent,
    pub(crate) children: Vec<NodeId>,
    pub(crate) on_open: Option<Hook<T>>,
    pub(crate) on_close: Option<Hook<T>>,
}

/// Read-only view of an attached node.
pub struct NodeRef<'a, T> {
    pub(crate) id: NodeId,
    pub(crate) slot: &'a Slot<T>,
}

impl<'a, T> NodeRef<'a, T> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &'a str {
        &self.slot.name
    }

    pub fn icon(&self) -> &'a str {
        &self.slot.icon
    }

    pub fn can_have_children(&self) -> bool {
        self.slot.can_have_children
    }

    pub fn is_open(&self) -> bool {
        self.slot.open
    }

    pub fn payload(&self) -> &'a T {
        &self.slot.payload
    }

    pub fn parent(&self) -> Parent {
        self.slot.parent
    }

    pub fn children(&self) -> &'a [NodeId] {
        &self.slot.children
    }

    /// True when the node's children are part of the visible order.
    pub fn shows_children(&self) -> bool {
        self.slot.open && !self.slot.children.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let node: TreeNode<()> = TreeNode::new("src");
        assert_eq!(node.name, "src");
        assert!(node.icon.is_empty());
        assert!(!node.can_have_children);
        assert!(node.children.is_empty());
        assert!(node.on_open.is_none());
    }

    #[test]
    fn test_builder_children_forces_container() {
        let node: TreeNode<()> = TreeNode::new("src")
            .can_have_children(false)
            .children([TreeNode::new("main.rs")]);
        assert!(node.can_have_children);
        assert_eq!(node.children.len(), 1);
    }

    #[test]
    fn test_builder_keeps_payload() {
        let node = TreeNode::with_payload("a", 42u32).icon("*");
        assert_eq!(node.payload, 42);
        assert_eq!(node.icon, "*");
    }
}
