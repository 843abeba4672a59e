//! # TUI Components
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: browsed root and key hint
//! - `StatusBar`: active entry's path, size and modification time
//!
//! ### Tree-Bound Components
//!
//! - `TreeView`: borrows the `Tree` mutably for the duration of a frame so it
//!   can size the viewport to its area before rendering rows
//!
//! ### Props-Based Data Flow
//!
//! Components receive external data as props, not by reaching into global
//! state. This keeps dependencies explicit and components testable:
//!
//! ```rust,ignore
//! // Good: dependencies are explicit
//! StatusBar::for_entry(active_payload, &state.status_message).render(frame, area);
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs     (top bar)
//! ├── tree_view.rs     (scroll-clipped tree rows)
//! └── status_bar.rs    (bottom bar)
//! ```

mod status_bar;
mod title_bar;
mod tree_view;

pub use status_bar::StatusBar;
pub use title_bar::TitleBar;
pub use tree_view::{TreeView, file_icon_style};
