//! # Viewport Rendering
//!
//! Maps the visible part of a tree onto a fixed number of rows.
//!
//! Rendering is a depth-first walk in display order that threads a running
//! row counter, `topline`, through every call. The caller seeds it with the
//! negated scroll offset, so rows scrolled above the window are counted at
//! negative positions and produce no output:
//!
//! ```text
//! topline  row
//!   -2     N0      counted, not emitted
//!   -1     N1      counted, not emitted
//!    0     N2  ┐
//!    1     N3  │
//!    2     N4  │   emitted: 0 <= topline < bottomline
//!    3     N5  │
//!    4     N6  ┘
//!    5     N7      bottomline reached, walk stops here
//! ```
//!
//! Once `topline` reaches `bottomline` nothing further is visited: not the
//! rest of the current node's children, and not any later sibling.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::node::{NodeId, NodeRef, Parent};
use crate::core::tree::Tree;

/// Material Design glyphs from the Nerd Font symbol set.
pub const CHEVRON_RIGHT: &str = "\u{F0142}";
pub const CHEVRON_DOWN: &str = "\u{F0140}";

/// Scroll offset and size of the visible window, in rows and columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub top: usize,
    pub width: u16,
    pub height: u16,
}

/// Expand/collapse marker drawn before a node's label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Open,
    Closed,
    Leaf,
}

/// One visible row of a render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Row {
    pub id: NodeId,
    pub depth: usize,
    pub marker: Marker,
    pub focused: bool,
}

/// Glyphs used to compose plain-text rows. Opaque to the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbols {
    pub open: String,
    pub closed: String,
    pub leaf: String,
    /// Prefix of the focused row. Other rows get blank padding of equal width.
    pub cursor: String,
    /// Inserted once per depth level.
    pub indent: String,
}

impl Default for Symbols {
    fn default() -> Self {
        Self {
            open: CHEVRON_DOWN.to_string(),
            closed: CHEVRON_RIGHT.to_string(),
            leaf: " ".to_string(),
            cursor: "▌".to_string(),
            indent: "  ".to_string(),
        }
    }
}

impl Symbols {
    pub fn marker(&self, marker: Marker) -> &str {
        match marker {
            Marker::Open => &self.open,
            Marker::Closed => &self.closed,
            Marker::Leaf => &self.leaf,
        }
    }
}

impl Marker {
    pub fn of<T>(node: &NodeRef<'_, T>) -> Self {
        if !node.can_have_children() {
            Marker::Leaf
        } else if node.is_open() {
            Marker::Open
        } else {
            Marker::Closed
        }
    }
}

impl Row {
    /// Plain-text form: cursor, indentation, marker, icon and label.
    pub fn text<T>(&self, tree: &Tree<T>, symbols: &Symbols) -> String {
        let Some(node) = tree.get(self.id) else {
            return String::new();
        };
        let mut line = if self.focused {
            symbols.cursor.clone()
        } else {
            " ".repeat(symbols.cursor.width())
        };
        line.push_str(&symbols.indent.repeat(self.depth));
        line.push_str(symbols.marker(self.marker));
        line.push(' ');
        if !node.icon().is_empty() {
            line.push_str(node.icon());
            line.push(' ');
        }
        line.push_str(node.name());
        line
    }
}

impl<T> Tree<T> {
    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    /// Record a new window size and keep the active row inside it.
    pub fn resize(&mut self, width: u16, height: u16) {
        let top = self.viewport.map_or(0, |v| v.top);
        self.viewport = Some(Viewport { top, width, height });
        self.scroll_to_active();
    }

    /// Rows of the current window. Empty until the first `resize`.
    pub fn render(&self) -> Vec<Row> {
        match self.viewport {
            Some(viewport) if viewport.height > 0 => {
                let topline = -(viewport.top as isize);
                self.render_window(topline, viewport.height as isize).1
            }
            _ => Vec::new(),
        }
    }

    /// The current window as text, one row per line, each clipped to the
    /// viewport width.
    pub fn view(&self, symbols: &Symbols) -> String {
        let width = self.viewport.map_or(0, |v| v.width as usize);
        self.render()
            .iter()
            .map(|row| clip_to_width(&row.text(self, symbols), width))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Render the top-level items, starting the row counter at `topline`.
    /// Returns the counter after the last visited row along with the rows
    /// that fell inside `0..bottomline`.
    pub fn render_window(&self, topline: isize, bottomline: isize) -> (isize, Vec<Row>) {
        let mut rows = Vec::new();
        let mut topline = topline;
        for &id in self.items() {
            if topline >= bottomline {
                break;
            }
            topline = self.render_into(id, 0, topline, bottomline, &mut rows);
        }
        (topline, rows)
    }

    /// Render one node and its visible descendants. `depth` only affects the
    /// rows produced, not the counting.
    pub fn render_node(
        &self,
        id: NodeId,
        depth: usize,
        topline: isize,
        bottomline: isize,
    ) -> (isize, Vec<Row>) {
        let mut rows = Vec::new();
        let topline = self.render_into(id, depth, topline, bottomline, &mut rows);
        (topline, rows)
    }

    fn render_into(
        &self,
        id: NodeId,
        depth: usize,
        mut topline: isize,
        bottomline: isize,
        rows: &mut Vec<Row>,
    ) -> isize {
        if topline >= bottomline {
            return topline;
        }
        let Some(node) = self.get(id) else {
            return topline;
        };

        if topline >= 0 {
            rows.push(Row {
                id,
                depth,
                marker: Marker::of(&node),
                focused: self.active == Some(id),
            });
        }
        topline += 1;

        if node.shows_children() {
            for &child in node.children() {
                if topline >= bottomline {
                    break;
                }
                topline = self.render_into(child, depth + 1, topline, bottomline, rows);
            }
        }
        topline
    }

    /// Every visible node with its depth, in display order.
    pub fn visible_rows(&self) -> Vec<(NodeId, usize)> {
        let mut rows = Vec::new();
        let mut stack: Vec<(NodeId, usize)> =
            self.items().iter().rev().map(|&id| (id, 0)).collect();
        while let Some((id, depth)) = stack.pop() {
            let Some(node) = self.get(id) else {
                continue;
            };
            rows.push((id, depth));
            if node.shows_children() {
                stack.extend(node.children().iter().rev().map(|&child| (child, depth + 1)));
            }
        }
        rows
    }

    /// Row index of `id` in display order, or None if it is hidden inside a
    /// closed ancestor.
    pub fn visible_index(&self, id: NodeId) -> Option<usize> {
        let mut ancestor = self.parent_of(id)?;
        while let Parent::Node(up) = ancestor {
            if !self.get(up)?.is_open() {
                return None;
            }
            ancestor = self.parent_of(up)?;
        }
        self.visible_rows().iter().position(|&(row, _)| row == id)
    }

    /// Adjust the scroll offset so the active row is on screen, and so the
    /// window does not hang past the last row when it does not have to.
    pub fn scroll_to_active(&mut self) {
        let Some(mut viewport) = self.viewport else {
            return;
        };
        let height = viewport.height as usize;
        let total = self.visible_rows().len();

        if let Some(index) = self.active.and_then(|id| self.visible_index(id))
            && height > 0
        {
            if index < viewport.top {
                viewport.top = index;
            } else if index >= viewport.top + height {
                viewport.top = index + 1 - height;
            }
        }
        viewport.top = viewport.top.min(total.saturating_sub(height));
        self.viewport = Some(viewport);
    }
}

/// Truncate `text` to at most `width` terminal columns.
pub fn clip_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut used = 0;
    let mut clipped = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        clipped.push(ch);
    }
    clipped
}
