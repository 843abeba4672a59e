//! # File Browser Source
//!
//! Lazily populates a tree from the file system. Only one directory level is
//! read at a time: directories are attached closed and childless, carrying a
//! shared `on_open` hook that reads their entries the first time they are
//! opened (and again after a refresh has emptied them).
//!
//! ```text
//! populate_root(tree)            reads  <root>/
//!   toggle "src"  → dir_hook     reads  <root>/src/       (node.path() = ["src"])
//!   toggle "core" → dir_hook     reads  <root>/src/core/  (node.path() = ["src", "core"])
//! ```

use std::cmp::Ordering;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Local};
use log::{debug, info, warn};

use crate::core::{Hook, ItemHolder, NodeMut, Symbols, Tree, TreeNode};

// Material Design glyphs from the Nerd Font symbol set.
pub const ICON_FOLDER: &str = "\u{F024B}";
pub const ICON_FILE: &str = "\u{F0214}";
pub const ICON_RUST: &str = "\u{F1617}";
pub const ICON_LINK: &str = "\u{F0337}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    File,
    Dir,
    Symlink,
}

/// Payload attached to every node the browser creates.
#[derive(Debug, Clone)]
pub struct FileEntry {
    pub path: PathBuf,
    pub kind: FileKind,
    pub size: u64,
    pub modified: Option<DateTime<Local>>,
}

impl FileEntry {
    pub fn is_rust_source(&self) -> bool {
        self.kind == FileKind::File && self.path.extension().is_some_and(|ext| ext == "rs")
    }

    pub fn icon(&self) -> &'static str {
        match self.kind {
            FileKind::Dir => ICON_FOLDER,
            FileKind::Symlink => ICON_LINK,
            FileKind::File if self.is_rust_source() => ICON_RUST,
            FileKind::File => ICON_FILE,
        }
    }
}

/// What to read and how to order it.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub root: PathBuf,
    pub show_hidden: bool,
    pub dirs_first: bool,
}

/// Fill the top level of `tree` from `options.root`.
pub fn populate_root(tree: &mut Tree<FileEntry>, options: &Arc<LoadOptions>) -> io::Result<usize> {
    let count = populate(tree, &options.root, options)?;
    info!("Loaded {} entries from {}", count, options.root.display());
    Ok(count)
}

/// Append one node per entry of `dir` to `holder`. Does not recurse.
pub fn populate(
    holder: &mut dyn ItemHolder<FileEntry>,
    dir: &Path,
    options: &Arc<LoadOptions>,
) -> io::Result<usize> {
    let mut entries: Vec<Listed> = read_entries(dir, options.show_hidden)?
        .into_iter()
        .map(|(name, entry)| {
            let is_dir = opens_as_dir(&entry);
            (name, entry, is_dir)
        })
        .collect();
    entries.sort_by(|a, b| compare_entries(a, b, options.dirs_first));

    let hook = dir_hook(options.clone());
    let nodes: Vec<TreeNode<FileEntry>> = entries
        .into_iter()
        .map(|(name, entry, is_dir)| {
            let icon = entry.icon();
            let node = TreeNode::with_payload(name, entry).icon(icon);
            if is_dir {
                node.can_have_children(true).on_open(hook.clone())
            } else {
                node
            }
        })
        .collect();

    let count = nodes.len();
    holder.add_children(nodes);
    Ok(count)
}

/// The shared `on_open` hook for directory nodes. Reads the directory only
/// when the node has no children yet, so reopening keeps the loaded list.
///
/// The directory comes from the payload's path. Node names are lossy for
/// non-UTF-8 file names and can't be joined back into a real path.
pub fn dir_hook(options: Arc<LoadOptions>) -> Hook<FileEntry> {
    Arc::new(move |mut node: NodeMut<'_, FileEntry>| {
        if !node.items().is_empty() {
            return;
        }
        let Some(dir) = node.payload().map(|entry| entry.path.clone()) else {
            warn!("Directory node {:?} has no payload", node.name());
            return;
        };
        debug!("Lazily loading {}", dir.display());
        if let Err(e) = populate(&mut node, &dir, &options) {
            warn!("Failed to read {}: {}", dir.display(), e);
        }
    })
}

/// Plain-text listing of the top level of `options.root`, one row per entry.
pub fn listing(options: &Arc<LoadOptions>, symbols: &Symbols, width: u16) -> io::Result<String> {
    let mut tree = Tree::new();
    populate_root(&mut tree, options)?;
    let rows = u16::try_from(tree.visible_rows().len()).unwrap_or(u16::MAX);
    tree.resize(width, rows);
    Ok(tree.view(symbols))
}

fn opens_as_dir(entry: &FileEntry) -> bool {
    match entry.kind {
        FileKind::Dir => true,
        FileKind::Symlink => fs::metadata(&entry.path).is_ok_and(|m| m.is_dir()),
        FileKind::File => false,
    }
}

fn read_entries(dir: &Path, show_hidden: bool) -> io::Result<Vec<(String, FileEntry)>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                debug!("Skipping unreadable entry in {}: {}", dir.display(), e);
                continue;
            }
        };
        let name = entry.file_name().to_string_lossy().into_owned();
        if !show_hidden && name.starts_with('.') {
            continue;
        }
        let metadata = match entry.metadata() {
            Ok(m) => m,
            Err(e) => {
                debug!("Skipping {}: {}", entry.path().display(), e);
                continue;
            }
        };
        let file_type = metadata.file_type();
        let kind = if file_type.is_symlink() {
            FileKind::Symlink
        } else if file_type.is_dir() {
            FileKind::Dir
        } else {
            FileKind::File
        };
        let modified = metadata.modified().ok().map(DateTime::<Local>::from);
        entries.push((
            name,
            FileEntry {
                path: entry.path(),
                kind,
                size: metadata.len(),
                modified,
            },
        ));
    }
    Ok(entries)
}

/// Name, entry, and whether it opens like a directory.
type Listed = (String, FileEntry, bool);

/// Symlinks to directories sort with the directories.
fn compare_entries(a: &Listed, b: &Listed, dirs_first: bool) -> Ordering {
    let by_kind = if dirs_first {
        b.2.cmp(&a.2)
    } else {
        Ordering::Equal
    };
    by_kind
        .then_with(|| a.0.to_lowercase().cmp(&b.0.to_lowercase()))
        .then_with(|| a.0.cmp(&b.0))
}
