use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use arbor::core::{
    Command, Effect, Hook, ItemHolder, NodeId, NodeMut, Symbols, Tree, TreeNode, update,
};

// ============================================================================
// Helper Functions
// ============================================================================

fn plain_symbols() -> Symbols {
    Symbols {
        open: "v".to_string(),
        closed: ">".to_string(),
        leaf: "-".to_string(),
        cursor: "*".to_string(),
        indent: "  ".to_string(),
    }
}

fn names<T>(tree: &Tree<T>, ids: impl IntoIterator<Item = NodeId>) -> Vec<String> {
    ids.into_iter()
        .map(|id| tree.get(id).unwrap().name().to_string())
        .collect()
}

/// Item 1..4 with nested A/B/C children; Item 1 and its A1 child start open.
fn items_tree() -> Tree<()> {
    let mut tree = Tree::new();
    for i in 1..=4 {
        tree.add_children(vec![
            TreeNode::new(format!("Item {i}")).children([
                TreeNode::new(format!("A{i}")).children([
                    TreeNode::new("AA"),
                    TreeNode::new("BB"),
                    TreeNode::new("CC"),
                ]),
                TreeNode::new(format!("B{i}")),
                TreeNode::new(format!("C{i}")),
            ]),
        ]);
    }
    let item1 = tree.items()[0];
    tree.toggle_open(item1);
    let a1 = tree.get(item1).unwrap().children()[0];
    tree.toggle_open(a1);
    tree
}

// ============================================================================
// Navigation and Rendering
// ============================================================================

#[test]
fn test_walk_down_and_back_up_visits_same_rows() {
    let mut tree = items_tree();
    let mut down = vec![tree.active().unwrap()];
    while tree.select_next() {
        down.push(tree.active().unwrap());
    }
    assert_eq!(
        names(&tree, down.clone()),
        ["Item 1", "A1", "AA", "BB", "CC", "B1", "C1", "Item 2", "Item 3", "Item 4"]
    );

    let mut up = vec![tree.active().unwrap()];
    while tree.select_previous() {
        up.push(tree.active().unwrap());
    }
    up.reverse();
    assert_eq!(up, down);
}

#[test]
fn test_view_scrolls_with_cursor() {
    let mut tree = items_tree();
    update(&mut tree, Command::Resize(40, 4));
    assert_eq!(
        tree.view(&plain_symbols()),
        "*v Item 1\n   v A1\n     - AA\n     - BB"
    );

    for _ in 0..7 {
        update(&mut tree, Command::MoveDown);
    }
    assert_eq!(
        tree.view(&plain_symbols()),
        "     - CC\n   - B1\n   - C1\n*> Item 2"
    );
}

#[test]
fn test_path_of_nested_node() {
    let tree = items_tree();
    let item1 = tree.items()[0];
    let a1 = tree.get(item1).unwrap().children()[0];
    let bb = tree.get(a1).unwrap().children()[1];
    assert_eq!(tree.path(bb), ["Item 1", "A1", "BB"]);
}

// ============================================================================
// Lazy Loading
// ============================================================================

#[test]
fn test_lazy_children_load_once_and_reload_after_refresh() {
    let loads = Arc::new(AtomicUsize::new(0));
    let counter = loads.clone();
    let hook: Hook<()> = Arc::new(move |mut node: NodeMut<'_, ()>| {
        if node.items().is_empty() {
            counter.fetch_add(1, Ordering::SeqCst);
            let prefix = node.path().join("/");
            node.add_children(vec![
                TreeNode::new(format!("{prefix}/x")),
                TreeNode::new(format!("{prefix}/y")),
            ]);
        }
    });

    let mut tree: Tree<()> = Tree::new();
    tree.add_children(vec![
        TreeNode::new("root").can_have_children(true).on_open(hook),
        TreeNode::new("after"),
    ]);

    update(&mut tree, Command::Toggle);
    update(&mut tree, Command::Toggle);
    update(&mut tree, Command::Toggle);
    assert_eq!(loads.load(Ordering::SeqCst), 1);

    update(&mut tree, Command::MoveDown);
    assert_eq!(tree.active_node().unwrap().name(), "root/x");

    assert_eq!(update(&mut tree, Command::Refresh), Effect::None);
    assert_eq!(tree.active_node().unwrap().name(), "root");
    update(&mut tree, Command::Select);
    assert_eq!(loads.load(Ordering::SeqCst), 2);
    assert_eq!(tree.get(tree.items()[0]).unwrap().children().len(), 2);
}

// ============================================================================
// Sharing Between Threads
// ============================================================================

#[test]
fn test_shared_tree_appends_are_atomic_to_readers() {
    let tree: Arc<Mutex<Tree<()>>> = Arc::new(Mutex::new(Tree::new()));
    tree.lock().unwrap().resize(20, 10);

    let writer = {
        let tree = tree.clone();
        thread::spawn(move || {
            for batch in 0..25 {
                let nodes = (0..3).map(|i| TreeNode::new(format!("{batch}-{i}"))).collect();
                tree.lock().unwrap().add_children(nodes);
            }
        })
    };

    for _ in 0..25 {
        let guard = tree.lock().unwrap();
        assert_eq!(guard.items().len() % 3, 0);
        assert!(guard.render().len() <= 10);
    }
    writer.join().unwrap();

    let guard = tree.lock().unwrap();
    assert_eq!(guard.items().len(), 75);
    assert_eq!(guard.render().len(), 10);
}
