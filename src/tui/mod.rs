//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates key presses into `core::Command` values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Loop
//!
//! ```text
//! crossterm event → KeyMap → Command → core::update() → Effect
//!                                                        │
//!          ReloadRoot: repopulate top level ◄────────────┤
//!          Selected:   status message       ◄────────────┤
//!          Quit:       leave the loop       ◄────────────┘
//! ```
//!
//! The loop only redraws after an event was handled. Pending events are
//! drained before the next frame so held-down keys don't lag behind.

mod component;
mod components;
mod event;
pub mod keymap;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::Arc;
use std::time::Duration;

use crossterm::cursor::{Hide, Show};
use crossterm::event::KeyEvent;
use crossterm::execute;

use crate::browser::{self, FileEntry, LoadOptions};
use crate::core::config::ResolvedConfig;
use crate::core::{Command, Effect, Symbols, Tree, update};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::keymap::KeyMap;

/// Everything the browser screen needs between frames.
pub struct BrowserState {
    pub tree: Tree<FileEntry>,
    pub options: Arc<LoadOptions>,
    pub symbols: Symbols,
    pub keymap: KeyMap,
    /// Transient message shown in the status bar; cleared on the next key.
    pub status_message: String,
}

impl BrowserState {
    pub fn new(config: ResolvedConfig) -> Self {
        Self {
            tree: Tree::new(),
            options: Arc::new(LoadOptions {
                root: config.root,
                show_hidden: config.show_hidden,
                dirs_first: config.dirs_first,
            }),
            symbols: config.symbols,
            keymap: KeyMap::from_config(&config.keys),
            status_message: String::new(),
        }
    }

    /// Populate the top level. Failures end up in the status bar.
    pub fn load(&mut self) {
        if let Err(e) = browser::populate_root(&mut self.tree, &self.options) {
            warn!("Failed to read {}: {}", self.options.root.display(), e);
            self.status_message = format!("Cannot read {}: {}", self.options.root.display(), e);
        }
    }

    /// Handle one key press. Returns true when the browser should exit.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        match self.keymap.command_for(key) {
            Some(command) => self.apply(command),
            None => false,
        }
    }

    /// Apply a command and act on its effect. Returns true on quit.
    pub fn apply(&mut self, command: Command) -> bool {
        self.status_message.clear();
        match update(&mut self.tree, command) {
            Effect::None => {}
            Effect::AtTop => self.status_message = "Top".to_string(),
            Effect::AtBottom => self.status_message = "Bottom".to_string(),
            Effect::Selected(id) => {
                let path = self.tree.path(id).join("/");
                info!("Selected {}", path);
                self.status_message = format!("Selected {}", path);
            }
            Effect::ReloadRoot => {
                debug!("Reloading {}", self.options.root.display());
                self.load();
            }
            Effect::Quit => return true,
        }
        false
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), Hide)?;
        info!("Terminal modes enabled (hidden cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), Show);
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let mut state = BrowserState::new(config);
    state.load();

    let mut terminal = ratatui::init();
    let result = TerminalModeGuard::new()
        .and_then(|_terminal_mode_guard| event_loop(&mut terminal, &mut state));
    ratatui::restore();
    result
}

fn event_loop(
    terminal: &mut ratatui::DefaultTerminal,
    state: &mut BrowserState,
) -> std::io::Result<()> {
    let mut needs_redraw = true; // Force first frame

    loop {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, state))?;
            needs_redraw = false;
        }

        let Some(first_event) = poll_event_timeout(Duration::from_millis(500))? else {
            continue;
        };
        needs_redraw = true;

        let mut next = Some(first_event);
        while let Some(event) = next {
            let should_quit = match event {
                TuiEvent::Key(key) => state.handle_key(&key),
                TuiEvent::Resize(width, height) => {
                    state.apply(Command::Resize(width, height.saturating_sub(ui::CHROME_ROWS)))
                }
            };
            if should_quit {
                info!("Quit requested");
                return Ok(());
            }
            next = poll_event_immediate()?;
        }
    }
}
