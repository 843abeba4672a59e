//! # Tree Aggregate
//!
//! `Tree<T>` owns every node (in an arena), the ordered top-level items, the
//! active item and the viewport. Navigation lives in `navigation.rs` and
//! rendering in `viewport.rs`; both are further `impl Tree<T>` blocks over the
//! structure defined here.
//!
//! ```text
//! Tree<T>
//! ├── slots: Vec<Entry<T>>        // arena, indexed by NodeId.index
//! ├── free: Vec<u32>              // vacant slot indices for reuse
//! ├── items: Vec<NodeId>          // top-level nodes, display order
//! ├── active: Option<NodeId>      // the selected node
//! └── viewport: Option<Viewport>  // None until the first resize
//! ```
//!
//! Structural mutation needs `&mut Tree`, so appends are serialized by the
//! borrow checker. Hosts that feed the tree from another thread share it as
//! `Arc<Mutex<Tree<T>>>`; a reader holding the lock sees a child list either
//! before or after an append, never half of one.

use log::{debug, warn};

use crate::core::node::{NodeId, NodeRef, Parent, Slot, TreeNode};
use crate::core::viewport::Viewport;

struct Entry<T> {
    generation: u32,
    slot: Option<Slot<T>>,
}

/// The "has an ordered child list, has a path, accepts new children"
/// capability shared by the root aggregate and by individual nodes.
pub trait ItemHolder<T> {
    /// Children in display order.
    fn items(&self) -> &[NodeId];

    /// Names from the top level down to this holder. Empty for the root.
    fn path(&self) -> Vec<String>;

    /// Append nodes (and any children they were built with). Returns the ids
    /// of the directly appended nodes, in order.
    fn add_children(&mut self, nodes: Vec<TreeNode<T>>) -> Vec<NodeId>;
}

pub struct Tree<T> {
    slots: Vec<Entry<T>>,
    free: Vec<u32>,
    items: Vec<NodeId>,
    pub(crate) active: Option<NodeId>,
    pub(crate) viewport: Option<Viewport>,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Tree<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            items: Vec::new(),
            active: None,
            viewport: None,
        }
    }

    /// Top-level nodes in display order.
    pub fn items(&self) -> &[NodeId] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of attached nodes, at any depth.
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_, T>> {
        self.slot(id).map(|slot| NodeRef { id, slot })
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.slot(id).is_some()
    }

    pub fn payload_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.slot_mut(id).map(|slot| &mut slot.payload)
    }

    pub fn active(&self) -> Option<NodeId> {
        self.active
    }

    pub fn active_node(&self) -> Option<NodeRef<'_, T>> {
        self.active.and_then(|id| self.get(id))
    }

    /// Make `id` the active item. Ignored (returns false) for ids that are not
    /// attached to this tree.
    pub fn set_active(&mut self, id: NodeId) -> bool {
        if !self.contains(id) {
            warn!("Ignoring activation of detached node {:?}", id);
            return false;
        }
        self.active = Some(id);
        true
    }

    /// Children of the root or of a node, in display order.
    pub fn children_of(&self, parent: Parent) -> &[NodeId] {
        match parent {
            Parent::Root => &self.items,
            Parent::Node(id) => self
                .slot(id)
                .map_or(&[][..], |slot| slot.children.as_slice()),
        }
    }

    pub fn parent_of(&self, id: NodeId) -> Option<Parent> {
        self.slot(id).map(|slot| slot.parent)
    }

    /// Mutable handle to a node, for appending children or editing its payload.
    pub fn node_mut(&mut self, id: NodeId) -> Option<NodeMut<'_, T>> {
        if self.contains(id) {
            Some(NodeMut { tree: self, id })
        } else {
            None
        }
    }

    /// Append nodes under `parent`. Appending under a node forces its
    /// `can_have_children` flag on. Appending the first top-level nodes makes
    /// the first of them active.
    pub fn append(&mut self, parent: Parent, nodes: Vec<TreeNode<T>>) -> Vec<NodeId> {
        if let Parent::Node(id) = parent
            && !self.contains(id)
        {
            warn!("Dropping {} children appended to detached node {:?}", nodes.len(), id);
            return Vec::new();
        }

        let ids: Vec<NodeId> = nodes
            .into_iter()
            .map(|node| self.insert(parent, node))
            .collect();

        match parent {
            Parent::Root => {
                self.items.extend_from_slice(&ids);
                if self.active.is_none() {
                    self.active = self.items.first().copied();
                }
            }
            Parent::Node(id) => {
                if let Some(slot) = self.slot_mut(id) {
                    slot.children.extend_from_slice(&ids);
                    slot.can_have_children = true;
                }
            }
        }
        ids
    }

    /// Flip a container's open flag and run the matching hook.
    ///
    /// No-op (returns false) for nodes that cannot have children. The hook
    /// runs after the flag flips and before this returns, so children an
    /// `on_open` hook appends are visible to the next render. Closing a node
    /// that hides the active item makes the node itself active.
    pub fn toggle_open(&mut self, id: NodeId) -> bool {
        let Some(slot) = self.slot_mut(id) else {
            return false;
        };
        if !slot.can_have_children {
            return false;
        }
        slot.open = !slot.open;
        let hook = if slot.open {
            slot.on_open.clone()
        } else {
            slot.on_close.clone()
        };
        let opened = slot.open;
        debug!("Toggled {:?} '{}' open={}", id, slot.name, opened);
        if !opened
            && let Some(active) = self.active
            && self.is_ancestor(id, active)
        {
            debug!("Active {:?} hidden by close, moving to {:?}", active, id);
            self.active = Some(id);
        }
        if let Some(hook) = hook {
            hook(NodeMut { tree: self, id });
        }
        true
    }

    /// Drop a node's children and close it, so the next open re-runs its
    /// `on_open` hook. Siblings are untouched. If the active item was inside
    /// the dropped subtree, the node itself becomes active.
    pub fn refresh(&mut self, id: NodeId) -> bool {
        let Some(slot) = self.slot_mut(id) else {
            return false;
        };
        slot.open = false;
        let children = std::mem::take(&mut slot.children);

        if let Some(active) = self.active
            && active != id
            && self.is_ancestor(id, active)
        {
            self.active = Some(id);
        }
        for child in children {
            self.remove_subtree(child);
        }
        true
    }

    /// Drop every top-level item. The tree is left empty with no active item.
    pub fn refresh_root(&mut self) {
        for id in std::mem::take(&mut self.items) {
            self.remove_subtree(id);
        }
        self.active = None;
        if let Some(viewport) = self.viewport.as_mut() {
            viewport.top = 0;
        }
    }

    /// Names from the top level down to and including `id`.
    pub fn path(&self, id: NodeId) -> Vec<String> {
        let mut path = Vec::new();
        let mut current = Parent::Node(id);
        while let Parent::Node(node) = current {
            let Some(slot) = self.slot(node) else {
                debug_assert!(false, "parent chain of {:?} reaches a detached node", id);
                break;
            };
            debug_assert!(path.len() <= self.len(), "parent chain of {:?} has a cycle", id);
            path.push(slot.name.clone());
            current = slot.parent;
        }
        path.reverse();
        path
    }

    /// Number of ancestors between `id` and the root (top-level items are 0).
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = self.parent_of(id);
        while let Some(Parent::Node(node)) = current {
            depth += 1;
            current = self.parent_of(node);
        }
        depth
    }

    /// True when `ancestor` is a strict ancestor of `id`.
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = self.parent_of(id);
        while let Some(Parent::Node(node)) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent_of(node);
        }
        false
    }

    pub(crate) fn slot(&self, id: NodeId) -> Option<&Slot<T>> {
        self.slots
            .get(id.index as usize)
            .filter(|entry| entry.generation == id.generation)
            .and_then(|entry| entry.slot.as_ref())
    }

    pub(crate) fn slot_mut(&mut self, id: NodeId) -> Option<&mut Slot<T>> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|entry| entry.generation == id.generation)
            .and_then(|entry| entry.slot.as_mut())
    }

    fn insert(&mut self, parent: Parent, node: TreeNode<T>) -> NodeId {
        let TreeNode {
            name,
            icon,
            can_have_children,
            payload,
            on_open,
            on_close,
            children,
        } = node;

        let slot = Slot {
            name,
            icon,
            can_have_children: can_have_children || !children.is_empty(),
            open: false,
            payload,
            parent,
            children: Vec::new(),
            on_open,
            on_close,
        };

        let id = match self.free.pop() {
            Some(index) => {
                let entry = &mut self.slots[index as usize];
                entry.slot = Some(slot);
                NodeId {
                    index,
                    generation: entry.generation,
                }
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Entry {
                    generation: 0,
                    slot: Some(slot),
                });
                NodeId {
                    index,
                    generation: 0,
                }
            }
        };

        let child_ids: Vec<NodeId> = children
            .into_iter()
            .map(|child| self.insert(Parent::Node(id), child))
            .collect();
        if let Some(slot) = self.slot_mut(id) {
            slot.children = child_ids;
        }
        id
    }

    fn remove_subtree(&mut self, id: NodeId) {
        let mut pending = vec![id];
        while let Some(current) = pending.pop() {
            let Some(entry) = self.slots.get_mut(current.index as usize) else {
                continue;
            };
            if entry.generation != current.generation {
                continue;
            }
            if let Some(slot) = entry.slot.take() {
                pending.extend(slot.children);
                entry.generation = entry.generation.wrapping_add(1);
                self.free.push(current.index);
            }
        }
    }
}

impl<T> ItemHolder<T> for Tree<T> {
    fn items(&self) -> &[NodeId] {
        &self.items
    }

    fn path(&self) -> Vec<String> {
        Vec::new()
    }

    fn add_children(&mut self, nodes: Vec<TreeNode<T>>) -> Vec<NodeId> {
        self.append(Parent::Root, nodes)
    }
}

/// Mutable handle to one attached node. This is what hooks receive.
pub struct NodeMut<'a, T> {
    tree: &'a mut Tree<T>,
    id: NodeId,
}

impl<'a, T> NodeMut<'a, T> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn node(&self) -> Option<NodeRef<'_, T>> {
        self.tree.get(self.id)
    }

    pub fn name(&self) -> &str {
        self.tree.slot(self.id).map_or("", |slot| slot.name.as_str())
    }

    pub fn is_open(&self) -> bool {
        self.tree.slot(self.id).is_some_and(|slot| slot.open)
    }

    pub fn payload(&self) -> Option<&T> {
        self.tree.slot(self.id).map(|slot| &slot.payload)
    }

    pub fn payload_mut(&mut self) -> Option<&mut T> {
        self.tree.payload_mut(self.id)
    }

    pub fn refresh(&mut self) -> bool {
        self.tree.refresh(self.id)
    }

    /// Read access to the rest of the tree.
    pub fn tree(&self) -> &Tree<T> {
        &*self.tree
    }
}

impl<T> ItemHolder<T> for NodeMut<'_, T> {
    fn items(&self) -> &[NodeId] {
        self.tree.children_of(Parent::Node(self.id))
    }

    fn path(&self) -> Vec<String> {
        self.tree.path(self.id)
    }

    fn add_children(&mut self, nodes: Vec<TreeNode<T>>) -> Vec<NodeId> {
        self.tree.append(Parent::Node(self.id), nodes)
    }
}
