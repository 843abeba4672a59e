//! # Navigation
//!
//! Cursor movement over the visible rows of a tree. "Visible" means reachable
//! from the top level through open nodes only; the order is a pre-order walk
//! where an open node's children follow it directly.
//!
//! ```text
//! ▾ a
//!   ▾ a1        next(a1)  = a1x   (descend first)
//!       a1x
//!     a2        next(a2)  = b     (climb until an ancestor has a next sibling)
//! ▾ b           prev(b)   = a2    (deepest last visible row above)
//!     b1
//! ```
//!
//! Every move is a no-op at the ends: there is no wraparound. The boolean
//! results let a host notice "tried to move past the end" and hand focus
//! elsewhere.

use log::warn;

use crate::core::node::{NodeId, Parent};
use crate::core::tree::Tree;

impl<T> Tree<T> {
    /// Move to the row below the active one. Returns false if there is none.
    pub fn select_next(&mut self) -> bool {
        match self.active.and_then(|id| self.next_visible(id)) {
            Some(next) => {
                self.active = Some(next);
                true
            }
            None => false,
        }
    }

    /// Move to the row above the active one. Returns false if there is none.
    pub fn select_previous(&mut self) -> bool {
        match self.active.and_then(|id| self.previous_visible(id)) {
            Some(previous) => {
                self.active = Some(previous);
                true
            }
            None => false,
        }
    }

    pub fn select_first(&mut self) -> bool {
        let first = self.items().first().copied();
        self.move_to(first)
    }

    /// Move to the last visible row of the whole tree.
    pub fn select_last(&mut self) -> bool {
        let last = self
            .items()
            .last()
            .map(|&id| self.last_visible_descendant(id));
        self.move_to(last)
    }

    /// Move down by up to `rows` rows. Returns false only if nothing moved.
    pub fn page_down(&mut self, rows: usize) -> bool {
        let mut moved = false;
        for _ in 0..rows.max(1) {
            if !self.select_next() {
                break;
            }
            moved = true;
        }
        moved
    }

    /// Move up by up to `rows` rows. Returns false only if nothing moved.
    pub fn page_up(&mut self, rows: usize) -> bool {
        let mut moved = false;
        for _ in 0..rows.max(1) {
            if !self.select_previous() {
                break;
            }
            moved = true;
        }
        moved
    }

    /// Move to the active node's parent. No-op for top-level nodes.
    pub fn select_parent(&mut self) -> bool {
        match self.active.and_then(|id| self.parent_of(id)) {
            Some(Parent::Node(parent)) => {
                self.active = Some(parent);
                true
            }
            _ => false,
        }
    }

    /// Open a closed container, or step into the first child of an open one.
    pub fn open_active(&mut self) -> bool {
        let Some(node) = self.active_node() else {
            return false;
        };
        if !node.can_have_children() {
            return false;
        }
        if !node.is_open() {
            let id = node.id();
            return self.toggle_open(id);
        }
        match node.children().first().copied() {
            Some(first) => {
                self.active = Some(first);
                true
            }
            None => false,
        }
    }

    /// Close an open container, otherwise move to the parent.
    pub fn close_active(&mut self) -> bool {
        match self.active_node() {
            Some(node) if node.is_open() => {
                let id = node.id();
                self.toggle_open(id)
            }
            Some(_) => self.select_parent(),
            None => false,
        }
    }

    /// The row directly below `id`: its first child if it is open, otherwise
    /// the next sibling of the nearest node on the way up that has one.
    pub fn next_visible(&self, id: NodeId) -> Option<NodeId> {
        let node = self.get(id)?;
        if node.shows_children() {
            return node.children().first().copied();
        }

        let mut current = id;
        loop {
            let parent = self.parent_of(current)?;
            let siblings = self.children_of(parent);
            let position = self.position_in(siblings, current)?;
            if let Some(&next) = siblings.get(position + 1) {
                return Some(next);
            }
            match parent {
                Parent::Root => return None,
                Parent::Node(up) => current = up,
            }
        }
    }

    /// The row directly above `id`: the deepest last visible descendant of
    /// its previous sibling, or its parent when it is a first child.
    pub fn previous_visible(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent_of(id)?;
        let siblings = self.children_of(parent);
        let position = self.position_in(siblings, id)?;
        if position > 0 {
            return Some(self.last_visible_descendant(siblings[position - 1]));
        }
        match parent {
            Parent::Root => None,
            Parent::Node(up) => Some(up),
        }
    }

    /// Follow last children down through open, non-empty nodes.
    pub fn last_visible_descendant(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some(node) = self.get(current) {
            match node.children().last() {
                Some(&last) if node.is_open() => current = last,
                _ => break,
            }
        }
        current
    }

    fn move_to(&mut self, target: Option<NodeId>) -> bool {
        match target {
            Some(id) if self.active != Some(id) => {
                self.active = Some(id);
                true
            }
            _ => false,
        }
    }

    fn position_in(&self, siblings: &[NodeId], id: NodeId) -> Option<usize> {
        let position = siblings.iter().position(|&sibling| sibling == id);
        if position.is_none() {
            debug_assert!(false, "{:?} is missing from its parent's children", id);
            warn!("Node {:?} not found among its parent's children", id);
        }
        position
    }
}
