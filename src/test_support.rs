//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::core::node::{NodeId, TreeNode};
use crate::core::tree::Tree;

/// A childless node with no payload.
pub fn leaf(name: &str) -> TreeNode<()> {
    TreeNode::new(name)
}

/// A container node with the given children.
pub fn dir(name: &str, children: impl IntoIterator<Item = TreeNode<()>>) -> TreeNode<()> {
    TreeNode::new(name).children(children)
}

/// `count` flat top-level nodes named `N0..N{count-1}`.
pub fn flat_tree(count: usize) -> Tree<()> {
    let mut tree = Tree::new();
    tree.append(
        crate::core::node::Parent::Root,
        (0..count).map(|i| leaf(&format!("N{i}"))).collect(),
    );
    tree
}

/// Find the first attached node with the given name, depth-first.
pub fn find<T>(tree: &Tree<T>, name: &str) -> NodeId {
    fn walk<T>(tree: &Tree<T>, ids: &[NodeId], name: &str) -> Option<NodeId> {
        for &id in ids {
            let node = tree.get(id)?;
            if node.name() == name {
                return Some(id);
            }
            if let Some(found) = walk(tree, node.children(), name) {
                return Some(found);
            }
        }
        None
    }
    walk(tree, tree.items(), name).unwrap_or_else(|| panic!("no node named {name}"))
}

/// Open every named node, in order.
pub fn open_all<T>(tree: &mut Tree<T>, names: &[&str]) {
    for name in names {
        let id = find(tree, name);
        if !tree.get(id).is_some_and(|n| n.is_open()) {
            tree.toggle_open(id);
        }
    }
}

/// Name of the active node, or "" if there is none.
pub fn active_name<T>(tree: &Tree<T>) -> String {
    tree.active_node()
        .map(|n| n.name().to_string())
        .unwrap_or_default()
}

/// A mixed tree used by the navigation tests:
///
/// ```text
/// a            (open)
/// ├── a1       (open)
/// │   ├── a1x
/// │   └── a1y  (closed, has children)
/// │       └── hidden
/// └── a2
/// b            (closed)
/// └── b1
/// c            (open)
/// ├── c1       (open)
/// │   └── c1a  (open)
/// │       └── deep
/// └── c2       (open, no children)
/// d
/// ```
pub fn mixed_tree() -> Tree<()> {
    let mut tree = Tree::new();
    tree.append(
        crate::core::node::Parent::Root,
        vec![
            dir(
                "a",
                [
                    dir("a1", [leaf("a1x"), dir("a1y", [leaf("hidden")])]),
                    leaf("a2"),
                ],
            ),
            dir("b", [leaf("b1")]),
            dir(
                "c",
                [
                    dir("c1", [dir("c1a", [leaf("deep")])]),
                    TreeNode::new("c2").can_have_children(true),
                ],
            ),
            leaf("d"),
        ],
    );
    open_all(&mut tree, &["a", "a1", "c", "c1", "c1a", "c2"]);
    tree
}
