//! Arbor: a lazily loaded, keyboard-driven tree view with a file browser
//! built on top of it.

pub mod browser;
pub mod core;
pub mod tui;

#[cfg(test)]
pub mod test_support;
