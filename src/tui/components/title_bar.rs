//! # TitleBar Component
//!
//! Top bar showing the browsed root and a key hint.
//!
//! ## Design Decisions
//!
//! ### Stateless Component
//!
//! TitleBar is purely presentational. It receives all data as props and has
//! no internal state:
//!
//! ```rust,ignore
//! let mut title_bar = TitleBar::new(root.display().to_string(), keymap.help());
//! title_bar.render(frame, area);
//! ```
//!
//! ### Narrow Terminals
//!
//! The root is always shown. The hint is right-aligned and dropped when it
//! would not leave room for the root.

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

/// Top bar component.
///
/// # Props
///
/// - `root`: the directory being browsed
/// - `hint`: short key summary (e.g. "j/k move  space toggle")
pub struct TitleBar {
    pub root: String,
    pub hint: String,
}

impl TitleBar {
    pub fn new(root: String, hint: String) -> Self {
        Self { root, hint }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title = Line::from(vec![
            Span::styled("Arbor", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" | "),
            Span::raw(self.root.clone()),
        ]);

        let hint_width = self.hint.width() as u16;
        if title.width() as u16 + hint_width + 1 > area.width {
            frame.render_widget(title, area);
            return;
        }

        let [title_area, hint_area] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(hint_width)]).areas(area);
        frame.render_widget(title, title_area);
        frame.render_widget(
            Span::styled(self.hint.clone(), Style::default().fg(Color::DarkGray)),
            hint_area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(title_bar: &mut TitleBar, width: u16) -> String {
        let backend = TestBackend::new(width, 1);
        let mut terminal = Terminal::new(backend).unwrap();

        terminal
            .draw(|f| {
                title_bar.render(f, f.area());
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_title_bar_new() {
        let title_bar = TitleBar::new("/tmp".to_string(), "q quit".to_string());

        assert_eq!(title_bar.root, "/tmp");
        assert_eq!(title_bar.hint, "q quit");
    }

    #[test]
    fn test_title_bar_shows_root_and_hint() {
        let mut title_bar = TitleBar::new("/home/user/src".to_string(), "q quit".to_string());
        let text = draw(&mut title_bar, 60);

        assert!(text.starts_with("Arbor | /home/user/src"));
        assert!(text.trim_end().ends_with("q quit"));
    }

    #[test]
    fn test_title_bar_drops_hint_when_narrow() {
        let mut title_bar =
            TitleBar::new("/home/user/src".to_string(), "j/k move  q quit".to_string());
        let text = draw(&mut title_bar, 30);

        assert!(text.contains("/home/user/src"));
        assert!(!text.contains("quit"));
    }
}
