//! # Core Tree Logic
//!
//! The tree model, its navigation and its scroll-clipped rendering.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Tree (arena + state) │
//!                    │  • Command (input)      │
//!                    │  • update() (reducer)   │
//!                    │  • render() (rows)      │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │  Browser   │      │ Plain text │
//!     │  Adapter   │      │  (lazy fs  │      │  Tree::    │
//!     │ (ratatui)  │      │  loading)  │      │  view()    │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`node`]: `TreeNode` builder, `NodeId`, hooks
//! - [`tree`]: the `Tree` aggregate and the `ItemHolder` capability
//! - [`navigation`]: next/previous and friends
//! - [`viewport`]: windowed rendering and scrolling
//! - [`action`]: the `Command` enum and `update()`
//! - [`config`]: settings file and override resolution

pub mod action;
pub mod config;
pub mod navigation;
pub mod node;
pub mod tree;
pub mod viewport;

pub use action::{Command, Effect, update};
pub use node::{Hook, NodeId, NodeRef, Parent, TreeNode};
pub use tree::{ItemHolder, NodeMut, Tree};
pub use viewport::{Marker, Row, Symbols, Viewport};
