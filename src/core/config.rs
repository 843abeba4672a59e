//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.arbor/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::viewport::Symbols;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ArborConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub symbols: SymbolsConfig,
    #[serde(default)]
    pub keys: KeysConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub show_hidden: Option<bool>,
    pub dirs_first: Option<bool>,
    pub log_level: Option<String>,
    pub log_file: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SymbolsConfig {
    pub open: Option<String>,
    pub closed: Option<String>,
    pub leaf: Option<String>,
    pub cursor: Option<String>,
    pub indent: Option<String>,
}

/// Key overrides, one list of key names per action. An action that is set
/// replaces its default keys entirely.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct KeysConfig {
    pub up: Option<Vec<String>>,
    pub down: Option<Vec<String>>,
    pub page_up: Option<Vec<String>>,
    pub page_down: Option<Vec<String>>,
    pub top: Option<Vec<String>>,
    pub last: Option<Vec<String>>,
    pub back: Option<Vec<String>>,
    pub open: Option<Vec<String>>,
    pub toggle: Option<Vec<String>>,
    pub select: Option<Vec<String>>,
    pub refresh: Option<Vec<String>>,
    pub quit: Option<Vec<String>>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_LOG_FILE: &str = "arbor.log";
pub const DEFAULT_LOG_LEVEL: &str = "debug";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub root: PathBuf,
    pub show_hidden: bool,
    pub dirs_first: bool,
    pub log_level: String,
    pub log_file: PathBuf,
    pub symbols: Symbols,
    pub keys: KeysConfig,
    /// Rejected settings, held until the logger is running.
    pub warnings: Vec<String>,
}

/// Settings given on the command line. `None` = not specified.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub root: Option<PathBuf>,
    pub show_hidden: Option<bool>,
    pub log_file: Option<PathBuf>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.arbor/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".arbor").join("config.toml"))
}

/// Where the settings came from. Config is loaded before the logger exists,
/// so this is reported once logging is up.
#[derive(Debug)]
pub enum ConfigSource {
    File(PathBuf),
    Generated(PathBuf),
    GenerateFailed(PathBuf, std::io::Error),
    NoHome,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::File(p) => write!(f, "loaded config from {}", p.display()),
            ConfigSource::Generated(p) => {
                write!(f, "no config file found, generated default at {}", p.display())
            }
            ConfigSource::GenerateFailed(p, e) => {
                write!(f, "failed to write default config to {}: {e}", p.display())
            }
            ConfigSource::NoHome => write!(f, "could not determine home directory, using defaults"),
        }
    }
}

/// Load config from `~/.arbor/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `ArborConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<(ArborConfig, ConfigSource), ConfigError> {
    let Some(path) = config_path() else {
        return Ok((ArborConfig::default(), ConfigSource::NoHome));
    };

    if !path.exists() {
        let source = match generate_default_config(&path) {
            Ok(()) => ConfigSource::Generated(path),
            Err(e) => ConfigSource::GenerateFailed(path, e),
        };
        return Ok((ArborConfig::default(), source));
    }

    let config = load_config_from(&path)?;
    Ok((config, ConfigSource::File(path)))
}

/// Load and parse a specific config file.
pub fn load_config_from(path: &Path) -> Result<ArborConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    toml::from_str(&contents).map_err(ConfigError::Parse)
}

/// Writes a commented-out default config file at the given path.
fn generate_default_config(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, DEFAULT_CONFIG)
}

/// Commented-out template listing every setting with its default value.
const DEFAULT_CONFIG: &str = r#"# Arbor Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# show_hidden = false                # Or set ARBOR_SHOW_HIDDEN=1
# dirs_first = true
# log_level = "debug"                # "error", "warn", "info", "debug", "trace", "off"
# log_file = "arbor.log"             # Or set ARBOR_LOG_FILE

# [symbols]
# open = "\U000F0140"                # Nerd Font chevron-down
# closed = "\U000F0142"              # Nerd Font chevron-right
# leaf = " "
# cursor = "▌"
# indent = "  "

# [keys]
# up = ["k", "up", "ctrl+p"]
# down = ["j", "down", "ctrl+n"]
# page_up = ["K", "pgup"]
# page_down = ["J", "pgdown"]
# top = ["g", "home"]
# last = ["G", "end"]
# back = ["h", "left", "backspace", "esc"]
# open = ["l", "right"]
# toggle = ["space"]
# select = ["enter"]
# refresh = ["r"]
# quit = ["q", "ctrl+c"]
"#;

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &ArborConfig, cli: &CliOverrides) -> ResolvedConfig {
    let mut warnings = Vec::new();

    // Root directory: CLI → env → current directory
    let root = cli
        .root
        .clone()
        .or_else(|| std::env::var("ARBOR_ROOT").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."));

    // Hidden files: CLI → env → config → default
    let show_hidden = cli
        .show_hidden
        .or_else(|| env_flag("ARBOR_SHOW_HIDDEN", &mut warnings))
        .or(config.general.show_hidden)
        .unwrap_or(false);

    let dirs_first = config.general.dirs_first.unwrap_or(true);

    // Log level: env → config → default
    let mut log_level = std::env::var("ARBOR_LOG_LEVEL")
        .ok()
        .or_else(|| config.general.log_level.clone())
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());
    if log_level.parse::<log::LevelFilter>().is_err() {
        warnings.push(format!("Unknown log level {log_level:?}, using {DEFAULT_LOG_LEVEL}"));
        log_level = DEFAULT_LOG_LEVEL.to_string();
    }

    // Log file: CLI → env → config → default
    let log_file = cli
        .log_file
        .clone()
        .or_else(|| std::env::var("ARBOR_LOG_FILE").ok().map(PathBuf::from))
        .or_else(|| config.general.log_file.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

    ResolvedConfig {
        root,
        show_hidden,
        dirs_first,
        log_level,
        log_file,
        symbols: resolve_symbols(&config.symbols),
        keys: config.keys.clone(),
        warnings,
    }
}

fn resolve_symbols(config: &SymbolsConfig) -> Symbols {
    let defaults = Symbols::default();
    Symbols {
        open: config.open.clone().unwrap_or(defaults.open),
        closed: config.closed.clone().unwrap_or(defaults.closed),
        leaf: config.leaf.clone().unwrap_or(defaults.leaf),
        cursor: config.cursor.clone().unwrap_or(defaults.cursor),
        indent: config.indent.clone().unwrap_or(defaults.indent),
    }
}

/// Reads a boolean env var: "1"/"true"/"yes" or "0"/"false"/"no".
fn env_flag(name: &str, warnings: &mut Vec<String>) -> Option<bool> {
    let value = std::env::var(name).ok()?;
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        other => {
            warnings.push(format!("Ignoring {name}={other:?}: expected a boolean"));
            None
        }
    }
}

/// Maps a configured level name to a `log` filter. Unknown names fall back
/// to `Debug`; `resolve` has already recorded a warning for them.
pub fn level_filter(level: &str) -> log::LevelFilter {
    level.parse().unwrap_or(log::LevelFilter::Debug)
}
