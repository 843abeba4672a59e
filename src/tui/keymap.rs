//! # Key Bindings
//!
//! Maps key presses to core `Command`s. Every command has a default set of
//! keys; `[keys]` in the config file replaces them per command.
//!
//! Key names are written the way they read: `"j"`, `"G"`, `"space"`,
//! `"enter"`, `"pgdown"`, `"ctrl+n"`, `"alt+left"`.

use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::warn;

use crate::core::Command;
use crate::core::config::KeysConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    /// Parse a key name such as `"ctrl+n"`. Returns `None` for unknown names.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        // A lone "+" is the plus key, not a separator.
        let (prefix, key) = match text.rsplit_once('+') {
            Some((prefix, "")) if prefix.is_empty() || prefix.ends_with('+') => {
                (prefix.trim_end_matches('+'), "+")
            }
            Some((prefix, key)) => (prefix, key),
            None => ("", text),
        };

        let mut modifiers = KeyModifiers::NONE;
        for part in prefix.split('+').filter(|p| !p.is_empty()) {
            modifiers |= match part.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => KeyModifiers::CONTROL,
                "alt" | "meta" => KeyModifiers::ALT,
                "shift" => KeyModifiers::SHIFT,
                _ => return None,
            };
        }

        let mut chars = key.chars();
        let code = match (chars.next(), chars.next()) {
            (Some(c), None) => {
                if modifiers.contains(KeyModifiers::SHIFT) {
                    modifiers.remove(KeyModifiers::SHIFT);
                    KeyCode::Char(c.to_ascii_uppercase())
                } else {
                    KeyCode::Char(c)
                }
            }
            _ => match key.to_ascii_lowercase().as_str() {
                "space" => KeyCode::Char(' '),
                "enter" | "return" => KeyCode::Enter,
                "esc" | "escape" => KeyCode::Esc,
                "tab" => KeyCode::Tab,
                "backspace" => KeyCode::Backspace,
                "up" => KeyCode::Up,
                "down" => KeyCode::Down,
                "left" => KeyCode::Left,
                "right" => KeyCode::Right,
                "home" => KeyCode::Home,
                "end" => KeyCode::End,
                "pgup" | "pageup" => KeyCode::PageUp,
                "pgdown" | "pagedown" => KeyCode::PageDown,
                _ => return None,
            },
        };
        Some(Self { code, modifiers })
    }

    /// Whether a key event is this binding. Shift is ignored for character
    /// keys since it is already part of the character.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        let mut modifiers =
            event.modifiers & (KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT);
        if matches!(event.code, KeyCode::Char(_)) {
            modifiers.remove(KeyModifiers::SHIFT);
        }
        event.code == self.code && modifiers == self.modifiers
    }
}

impl fmt::Display for KeyBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            write!(f, "ctrl+")?;
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            write!(f, "alt+")?;
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            write!(f, "shift+")?;
        }
        match self.code {
            KeyCode::Char(' ') => write!(f, "space"),
            KeyCode::Char(c) => write!(f, "{c}"),
            KeyCode::Enter => write!(f, "enter"),
            KeyCode::Esc => write!(f, "esc"),
            KeyCode::Tab => write!(f, "tab"),
            KeyCode::Backspace => write!(f, "backspace"),
            KeyCode::Up => write!(f, "up"),
            KeyCode::Down => write!(f, "down"),
            KeyCode::Left => write!(f, "left"),
            KeyCode::Right => write!(f, "right"),
            KeyCode::Home => write!(f, "home"),
            KeyCode::End => write!(f, "end"),
            KeyCode::PageUp => write!(f, "pgup"),
            KeyCode::PageDown => write!(f, "pgdown"),
            other => write!(f, "{other:?}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct KeyMap {
    bindings: Vec<(Command, Vec<KeyBinding>)>,
}

const DEFAULTS: &[(Command, &[&str])] = &[
    (Command::MoveUp, &["k", "up", "ctrl+p"]),
    (Command::MoveDown, &["j", "down", "ctrl+n"]),
    (Command::PageUp, &["K", "pgup"]),
    (Command::PageDown, &["J", "pgdown"]),
    (Command::GoToTop, &["g", "home"]),
    (Command::GoToLast, &["G", "end"]),
    (Command::Back, &["h", "left", "backspace", "esc"]),
    (Command::Open, &["l", "right"]),
    (Command::Toggle, &["space"]),
    (Command::Select, &["enter"]),
    (Command::Refresh, &["r"]),
    (Command::Quit, &["q", "ctrl+c"]),
];

impl Default for KeyMap {
    fn default() -> Self {
        Self::from_config(&KeysConfig::default())
    }
}

impl KeyMap {
    /// Defaults with any configured lists swapped in. Unknown key names are
    /// logged and skipped.
    pub fn from_config(keys: &KeysConfig) -> Self {
        let bindings = DEFAULTS
            .iter()
            .map(|&(command, defaults)| {
                let names: Vec<String> = match configured(keys, command) {
                    Some(list) => list.clone(),
                    None => defaults.iter().map(|s| s.to_string()).collect(),
                };
                let parsed = names
                    .iter()
                    .filter_map(|name| {
                        let binding = KeyBinding::parse(name);
                        if binding.is_none() {
                            warn!("Ignoring unknown key {:?} for {:?}", name, command);
                        }
                        binding
                    })
                    .collect();
                (command, parsed)
            })
            .collect();
        Self { bindings }
    }

    pub fn command_for(&self, event: &KeyEvent) -> Option<Command> {
        self.bindings
            .iter()
            .find(|(_, keys)| keys.iter().any(|k| k.matches(event)))
            .map(|(command, _)| *command)
    }

    pub fn keys_for(&self, command: Command) -> &[KeyBinding] {
        self.bindings
            .iter()
            .find(|(c, _)| *c == command)
            .map_or(&[][..], |(_, keys)| keys.as_slice())
    }

    /// One-line summary of the most used keys.
    pub fn help(&self) -> String {
        let first = |command: Command| {
            self.keys_for(command)
                .first()
                .map_or_else(|| "-".to_string(), |k| k.to_string())
        };
        format!(
            "{}/{} move  {} toggle  {} refresh  {} quit",
            first(Command::MoveDown),
            first(Command::MoveUp),
            first(Command::Toggle),
            first(Command::Refresh),
            first(Command::Quit),
        )
    }
}

fn configured(keys: &KeysConfig, command: Command) -> Option<&Vec<String>> {
    match command {
        Command::MoveUp => keys.up.as_ref(),
        Command::MoveDown => keys.down.as_ref(),
        Command::PageUp => keys.page_up.as_ref(),
        Command::PageDown => keys.page_down.as_ref(),
        Command::GoToTop => keys.top.as_ref(),
        Command::GoToLast => keys.last.as_ref(),
        Command::Back => keys.back.as_ref(),
        Command::Open => keys.open.as_ref(),
        Command::Toggle => keys.toggle.as_ref(),
        Command::Select => keys.select.as_ref(),
        Command::Refresh => keys.refresh.as_ref(),
        Command::Quit => keys.quit.as_ref(),
        Command::Resize(..) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_parse_named_and_modified_keys() {
        assert_eq!(
            KeyBinding::parse("ctrl+n"),
            Some(KeyBinding {
                code: KeyCode::Char('n'),
                modifiers: KeyModifiers::CONTROL
            })
        );
        assert_eq!(KeyBinding::parse("space").unwrap().code, KeyCode::Char(' '));
        assert_eq!(KeyBinding::parse("PgDown").unwrap().code, KeyCode::PageDown);
        assert_eq!(KeyBinding::parse("shift+g").unwrap().code, KeyCode::Char('G'));
        assert_eq!(KeyBinding::parse("+").unwrap().code, KeyCode::Char('+'));
        assert_eq!(KeyBinding::parse("ctrl++").unwrap().modifiers, KeyModifiers::CONTROL);
        assert_eq!(KeyBinding::parse("hyper+x"), None);
        assert_eq!(KeyBinding::parse("f13"), None);
    }

    #[test]
    fn test_display_round_trips_parse() {
        for name in ["ctrl+n", "space", "G", "alt+left", "pgup"] {
            assert_eq!(KeyBinding::parse(name).unwrap().to_string(), name);
        }
    }

    #[test]
    fn test_default_bindings() {
        let keymap = KeyMap::default();
        let none = KeyModifiers::NONE;
        assert_eq!(keymap.command_for(&press(KeyCode::Char('j'), none)), Some(Command::MoveDown));
        assert_eq!(keymap.command_for(&press(KeyCode::Up, none)), Some(Command::MoveUp));
        assert_eq!(keymap.command_for(&press(KeyCode::Char(' '), none)), Some(Command::Toggle));
        assert_eq!(keymap.command_for(&press(KeyCode::Enter, none)), Some(Command::Select));
        assert_eq!(keymap.command_for(&press(KeyCode::Char('x'), none)), None);
    }

    #[test]
    fn test_shifted_letters_match_uppercase_bindings() {
        let keymap = KeyMap::default();
        let shifted = press(KeyCode::Char('G'), KeyModifiers::SHIFT);
        assert_eq!(keymap.command_for(&shifted), Some(Command::GoToLast));
        let plain = press(KeyCode::Char('g'), KeyModifiers::NONE);
        assert_eq!(keymap.command_for(&plain), Some(Command::GoToTop));
    }

    #[test]
    fn test_ctrl_is_not_ignored() {
        let keymap = KeyMap::default();
        let ctrl_c = press(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(keymap.command_for(&ctrl_c), Some(Command::Quit));
        let ctrl_j = press(KeyCode::Char('j'), KeyModifiers::CONTROL);
        assert_eq!(keymap.command_for(&ctrl_j), None);
    }

    #[test]
    fn test_config_replaces_defaults_per_command() {
        let keys = KeysConfig {
            down: Some(vec!["ctrl+n".to_string(), "bogus-key".to_string()]),
            ..Default::default()
        };
        let keymap = KeyMap::from_config(&keys);
        let ctrl_n = press(KeyCode::Char('n'), KeyModifiers::CONTROL);
        assert_eq!(keymap.command_for(&ctrl_n), Some(Command::MoveDown));
        assert_eq!(keymap.command_for(&press(KeyCode::Char('j'), KeyModifiers::NONE)), None);
        assert_eq!(keymap.keys_for(Command::MoveDown).len(), 1);
        // Untouched commands keep their defaults.
        assert_eq!(
            keymap.command_for(&press(KeyCode::Char('k'), KeyModifiers::NONE)),
            Some(Command::MoveUp)
        );
    }

    #[test]
    fn test_help_uses_first_binding() {
        assert_eq!(KeyMap::default().help(), "j/k move  space toggle  r refresh  q quit");
    }
}
