use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};

use crate::tui::BrowserState;
use crate::tui::component::Component;
use crate::tui::components::{StatusBar, TitleBar, TreeView, file_icon_style};

/// Rows taken by the title and status bars.
pub const CHROME_ROWS: u16 = 2;

/// Split the screen into title, tree and status areas.
pub fn areas(area: Rect) -> [Rect; 3] {
    use Constraint::{Length, Min};
    Layout::vertical([Length(1), Min(0), Length(1)]).areas(area)
}

pub fn draw_ui(frame: &mut Frame, state: &mut BrowserState) {
    let [title_area, tree_area, status_area] = areas(frame.area());

    TitleBar::new(state.options.root.display().to_string(), state.keymap.help())
        .render(frame, title_area);

    TreeView::new(&mut state.tree, &state.symbols, file_icon_style).render(frame, tree_area);

    let active = state.tree.active_node().map(|node| node.payload());
    StatusBar::for_entry(active, &state.status_message).render(frame, status_area);
}
