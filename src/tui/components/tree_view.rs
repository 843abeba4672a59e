//! # TreeView Component
//!
//! Draws the rows of `Tree::render()` as styled ratatui lines.
//!
//! ## Responsibilities
//!
//! - Keep the tree's viewport the same size as the area it is drawn into
//! - Style each row: cursor, indentation, marker, icon, label
//! - Highlight the focused row
//!
//! The core decides *which* rows are visible; this component only decides
//! how they look. Horizontal overflow is clipped by the `Paragraph`.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::browser::{FileEntry, FileKind};
use crate::core::{Row, Symbols, Tree};
use crate::tui::component::Component;

const FOLDER_COLOR: Color = Color::Rgb(0xFF, 0xCF, 0x48);
const RUST_COLOR: Color = Color::Rgb(0xDE, 0xA5, 0x84);
const FILE_COLOR: Color = Color::Rgb(0x98, 0xFB, 0x98);
const LINK_COLOR: Color = Color::Cyan;

/// Scroll-clipped view of a tree.
///
/// # Props
///
/// - `tree`: the tree to draw; its viewport is resized to the render area
/// - `symbols`: marker, cursor and indent glyphs
/// - `icon_style`: colour for a node's icon, chosen from its payload
pub struct TreeView<'a, T> {
    pub tree: &'a mut Tree<T>,
    pub symbols: &'a Symbols,
    pub icon_style: fn(&T) -> Style,
}

impl<'a, T> TreeView<'a, T> {
    pub fn new(tree: &'a mut Tree<T>, symbols: &'a Symbols, icon_style: fn(&T) -> Style) -> Self {
        Self {
            tree,
            symbols,
            icon_style,
        }
    }

    fn row_line(&self, row: &Row) -> Line<'static> {
        let Some(node) = self.tree.get(row.id) else {
            return Line::default();
        };
        let cursor = if row.focused {
            Span::styled(self.symbols.cursor.clone(), Style::default().fg(Color::Cyan))
        } else {
            Span::raw(" ".repeat(self.symbols.cursor.width()))
        };
        let mut spans = vec![
            cursor,
            Span::raw(self.symbols.indent.repeat(row.depth)),
            Span::styled(
                self.symbols.marker(row.marker).to_string(),
                Style::default().fg(Color::DarkGray),
            ),
            Span::raw(" "),
        ];
        if !node.icon().is_empty() {
            spans.push(Span::styled(
                node.icon().to_string(),
                (self.icon_style)(node.payload()),
            ));
            spans.push(Span::raw(" "));
        }
        let label = if row.focused {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        spans.push(Span::styled(node.name().to_string(), label));

        let line = Line::from(spans);
        if row.focused {
            line.style(Style::default().bg(Color::DarkGray))
        } else {
            line
        }
    }
}

impl<T> Component for TreeView<'_, T> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let resized = self
            .tree
            .viewport()
            .is_none_or(|v| v.width != area.width || v.height != area.height);
        if resized {
            self.tree.resize(area.width, area.height);
        }

        let lines: Vec<Line> = self
            .tree
            .render()
            .iter()
            .map(|row| self.row_line(row))
            .collect();
        frame.render_widget(Paragraph::new(lines), area);
    }
}

/// Icon colour for file-browser payloads.
pub fn file_icon_style(entry: &FileEntry) -> Style {
    let color = match entry.kind {
        FileKind::Dir => FOLDER_COLOR,
        FileKind::Symlink => LINK_COLOR,
        FileKind::File if entry.is_rust_source() => RUST_COLOR,
        FileKind::File => FILE_COLOR,
    };
    Style::default().fg(color)
}
