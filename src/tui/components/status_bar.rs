//! # StatusBar Component
//!
//! Bottom line describing the active entry: its path on the left, size and
//! modification time on the right. A transient message (e.g. "Selected
//! src/main.rs") replaces the path until the next key press.

use chrono::{DateTime, Local};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Span;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::browser::{FileEntry, FileKind};
use crate::tui::component::Component;

pub struct StatusBar {
    pub left: String,
    pub right: String,
}

impl StatusBar {
    /// Describe the active entry, or show `message` when it is set.
    pub fn for_entry(entry: Option<&FileEntry>, message: &str) -> Self {
        let left = if !message.is_empty() {
            message.to_string()
        } else {
            entry.map_or_else(String::new, |e| e.path.display().to_string())
        };
        let right = entry.map_or_else(String::new, |e| {
            let size = match e.kind {
                FileKind::Dir => "dir".to_string(),
                _ => format_size(e.size),
            };
            match e.modified {
                Some(modified) => format!("{}  {}", size, format_modified(&modified)),
                None => size,
            }
        });
        Self { left, right }
    }
}

impl Component for StatusBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let right_width = (self.right.width() as u16).min(area.width);
        let [left_area, right_area] = Layout::horizontal([
            Constraint::Min(0),
            Constraint::Length(right_width),
        ])
        .areas(area);

        // Leave a space between the two halves.
        let room = (left_area.width as usize).saturating_sub(1);
        frame.render_widget(Span::raw(truncate_str(&self.left, room)), left_area);
        frame.render_widget(
            Span::styled(self.right.clone(), Style::default().fg(Color::DarkGray)),
            right_area,
        );
    }
}

/// Human-readable size in binary units.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KiB", "MiB", "GiB", "TiB"];
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", value, UNITS[unit])
}

pub fn format_modified(modified: &DateTime<Local>) -> String {
    modified.format("%Y-%m-%d %H:%M").to_string()
}

/// Truncate to `max_width` columns, ending with "..." when cut.
fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let mut out = String::new();
    let mut width = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if width + w > max_width - 3 {
            break;
        }
        out.push(c);
        width += w;
    }
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn entry(kind: FileKind, size: u64) -> FileEntry {
        FileEntry {
            path: "/srv/project/src/main.rs".into(),
            kind,
            size,
            modified: Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).single(),
        }
    }

    fn draw(status_bar: &mut StatusBar, width: u16) -> String {
        let backend = TestBackend::new(width, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                status_bar.render(f, f.area());
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1023), "1023 B");
        assert_eq!(format_size(1536), "1.5 KiB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0 MiB");
    }

    #[test]
    fn test_describes_file() {
        let file = entry(FileKind::File, 2048);
        let status = StatusBar::for_entry(Some(&file), "");
        assert_eq!(status.left, "/srv/project/src/main.rs");
        assert_eq!(status.right, "2.0 KiB  2024-03-09 14:05");
    }

    #[test]
    fn test_directory_has_no_size() {
        let dir = entry(FileKind::Dir, 4096);
        let status = StatusBar::for_entry(Some(&dir), "");
        assert!(status.right.starts_with("dir  "));
    }

    #[test]
    fn test_message_replaces_path() {
        let file = entry(FileKind::File, 10);
        let status = StatusBar::for_entry(Some(&file), "Selected src/main.rs");
        assert_eq!(status.left, "Selected src/main.rs");
        assert_eq!(status.right, "10 B  2024-03-09 14:05");
    }

    #[test]
    fn test_empty_tree_renders_blank() {
        let mut status = StatusBar::for_entry(None, "");
        assert_eq!(draw(&mut status, 20).trim(), "");
    }

    #[test]
    fn test_long_path_is_truncated() {
        let file = entry(FileKind::File, 10);
        let mut status = StatusBar::for_entry(Some(&file), "");
        let text = draw(&mut status, 36);
        assert!(text.contains("..."));
        assert!(text.ends_with("10 B  2024-03-09 14:05"));
    }

    #[test]
    fn test_truncate_str_counts_columns() {
        assert_eq!(truncate_str("short", 10), "short");
        assert_eq!(truncate_str("abcdefgh", 6), "abc...");
        assert_eq!(truncate_str("日本語のパス", 7), "日本...");
        assert_eq!(truncate_str("abcdef", 2), "..");
    }
}
