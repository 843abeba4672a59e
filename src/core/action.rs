//! # Commands
//!
//! Everything a host can ask of a tree becomes a `Command`. The input layer
//! decodes key presses into commands; `update()` applies one to the tree and
//! reports anything the host has to act on as an `Effect`.
//!
//! ```text
//! Tree + Command  →  update()  →  Tree' + Effect
//! ```
//!
//! Every command that can move the active row also scrolls the viewport so
//! the active row stays visible.

use log::debug;

use crate::core::node::{NodeId, Parent};
use crate::core::tree::Tree;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    GoToTop,
    GoToLast,
    /// Collapse the active node, or step out to its parent.
    Back,
    /// Expand the active node, or step into its first child.
    Open,
    Toggle,
    /// Toggle a container, or report a leaf as chosen.
    Select,
    /// Re-populate the active node's parent.
    Refresh,
    Resize(u16, u16),
    Quit,
}

/// What the host has to do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Moving up was attempted on the first row.
    AtTop,
    /// Moving down was attempted on the last row.
    AtBottom,
    /// A leaf was chosen.
    Selected(NodeId),
    /// The top level was cleared and must be populated again.
    ReloadRoot,
    Quit,
}

pub fn update<T>(tree: &mut Tree<T>, command: Command) -> Effect {
    debug!("Applying {:?}", command);
    let effect = match command {
        Command::MoveUp => boundary(tree.select_previous(), Effect::AtTop),
        Command::MoveDown => boundary(tree.select_next(), Effect::AtBottom),
        Command::PageUp => boundary(tree.page_up(page_rows(tree)), Effect::AtTop),
        Command::PageDown => boundary(tree.page_down(page_rows(tree)), Effect::AtBottom),
        Command::GoToTop => {
            tree.select_first();
            Effect::None
        }
        Command::GoToLast => {
            tree.select_last();
            Effect::None
        }
        Command::Back => {
            tree.close_active();
            Effect::None
        }
        Command::Open => {
            tree.open_active();
            Effect::None
        }
        Command::Toggle => {
            if let Some(id) = tree.active() {
                tree.toggle_open(id);
            }
            Effect::None
        }
        Command::Select => select(tree),
        Command::Refresh => refresh(tree),
        Command::Resize(width, height) => {
            tree.resize(width, height);
            Effect::None
        }
        Command::Quit => Effect::Quit,
    };
    tree.scroll_to_active();
    effect
}

fn boundary(moved: bool, blocked: Effect) -> Effect {
    if moved { Effect::None } else { blocked }
}

/// Rows moved by one page: a viewport height, keeping one row of overlap.
fn page_rows<T>(tree: &Tree<T>) -> usize {
    tree.viewport()
        .map_or(1, |v| (v.height as usize).saturating_sub(1).max(1))
}

fn select<T>(tree: &mut Tree<T>) -> Effect {
    let Some(node) = tree.active_node() else {
        return Effect::None;
    };
    let id = node.id();
    if node.can_have_children() {
        tree.toggle_open(id);
        Effect::None
    } else {
        Effect::Selected(id)
    }
}

fn refresh<T>(tree: &mut Tree<T>) -> Effect {
    let Some(active) = tree.active() else {
        tree.refresh_root();
        return Effect::ReloadRoot;
    };
    match tree.parent_of(active) {
        Some(Parent::Node(parent)) => {
            tree.refresh(parent);
            tree.set_active(parent);
            Effect::None
        }
        _ => {
            tree.refresh_root();
            Effect::ReloadRoot
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::core::node::{Hook, TreeNode};
    use crate::core::tree::{ItemHolder, NodeMut};
    use crate::test_support::{active_name, find, flat_tree, leaf, mixed_tree};

    #[test]
    fn test_move_effects_at_boundaries() {
        let mut tree = flat_tree(2);
        assert_eq!(update(&mut tree, Command::MoveUp), Effect::AtTop);
        assert_eq!(update(&mut tree, Command::MoveDown), Effect::None);
        assert_eq!(update(&mut tree, Command::MoveDown), Effect::AtBottom);
        assert_eq!(active_name(&tree), "N1");
    }

    #[test]
    fn test_page_moves_by_viewport_height() {
        let mut tree = flat_tree(20);
        update(&mut tree, Command::Resize(30, 5));
        update(&mut tree, Command::PageDown);
        assert_eq!(active_name(&tree), "N4");
        assert_eq!(tree.viewport().unwrap().top, 0);
        update(&mut tree, Command::PageDown);
        assert_eq!(active_name(&tree), "N8");
        assert_eq!(tree.viewport().unwrap().top, 4);
        update(&mut tree, Command::PageUp);
        assert_eq!(active_name(&tree), "N4");
        assert_eq!(tree.viewport().unwrap().top, 4);
    }

    #[test]
    fn test_page_without_viewport_moves_one_row() {
        let mut tree = flat_tree(5);
        update(&mut tree, Command::PageDown);
        assert_eq!(active_name(&tree), "N1");
    }

    #[test]
    fn test_go_to_last_scrolls_window() {
        let mut tree = flat_tree(10);
        update(&mut tree, Command::Resize(30, 3));
        update(&mut tree, Command::GoToLast);
        assert_eq!(active_name(&tree), "N9");
        assert_eq!(tree.viewport().unwrap().top, 7);
        update(&mut tree, Command::GoToTop);
        assert_eq!(tree.viewport().unwrap().top, 0);
    }

    #[test]
    fn test_select_toggles_containers_and_reports_leaves() {
        let mut tree = mixed_tree();
        tree.set_active(find(&tree, "b"));
        assert_eq!(update(&mut tree, Command::Select), Effect::None);
        assert!(tree.get(find(&tree, "b")).unwrap().is_open());

        let b1 = find(&tree, "b1");
        tree.set_active(b1);
        assert_eq!(update(&mut tree, Command::Select), Effect::Selected(b1));
    }

    #[test]
    fn test_toggle_on_leaf_is_noop() {
        let mut tree = flat_tree(1);
        assert_eq!(update(&mut tree, Command::Toggle), Effect::None);
        assert!(!tree.active_node().unwrap().is_open());
    }

    #[test]
    fn test_refresh_nested_reloads_parent_via_hook() {
        let hook: Hook<()> = Arc::new(|mut node: NodeMut<'_, ()>| {
            if node.items().is_empty() {
                node.add_children(vec![leaf("fresh")]);
            }
        });
        let mut tree: Tree<()> = Tree::new();
        tree.add_children(vec![
            TreeNode::new("dir").can_have_children(true).on_open(hook),
        ]);
        let dir = find(&tree, "dir");
        update(&mut tree, Command::Open);
        update(&mut tree, Command::Open);
        assert_eq!(active_name(&tree), "fresh");

        assert_eq!(update(&mut tree, Command::Refresh), Effect::None);
        assert_eq!(tree.active(), Some(dir));
        assert!(!tree.get(dir).unwrap().is_open());
        assert!(tree.get(dir).unwrap().children().is_empty());

        update(&mut tree, Command::Toggle);
        assert_eq!(tree.get(dir).unwrap().children().len(), 1);
    }

    #[test]
    fn test_refresh_top_level_asks_for_reload() {
        let mut tree = flat_tree(3);
        assert_eq!(update(&mut tree, Command::Refresh), Effect::ReloadRoot);
        assert!(tree.is_empty());
        assert_eq!(tree.active(), None);
    }

    #[test]
    fn test_quit() {
        let mut tree = flat_tree(1);
        assert_eq!(update(&mut tree, Command::Quit), Effect::Quit);
    }

    #[test]
    fn test_back_and_open_round_trip() {
        let mut tree = mixed_tree();
        tree.set_active(find(&tree, "a1x"));
        update(&mut tree, Command::Back);
        assert_eq!(active_name(&tree), "a1");
        update(&mut tree, Command::Open);
        assert_eq!(active_name(&tree), "a1x");
    }
}
