//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.pigeon/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::directory::DEFAULT_USER_COUNT;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PigeonConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub user_count: Option<usize>,
    pub seed: Option<u64>,
    pub snapshot_file: Option<String>,
    pub autosave: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UiConfig {
    pub notice_ms: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_NOTICE_MS: u64 = 1000;
pub const DEFAULT_AUTOSAVE: bool = false;

// ============================================================================
// Resolved Config (concrete values)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub user_count: usize,
    pub seed: Option<u64>,
    /// True when `user_count` or `seed` was set by the CLI, env or config
    /// file rather than left at its default.
    pub directory_requested: bool,
    /// `None` unless a snapshot was asked for. Nothing is persisted otherwise.
    pub snapshot_path: Option<PathBuf>,
    pub autosave: bool,
    pub notice_ms: u64,
}

/// Values given on the command line. `None` = not specified.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub user_count: Option<usize>,
    pub seed: Option<u64>,
    pub snapshot: Option<PathBuf>,
    /// `Some(true)` for `--autosave`, `Some(false)` for `--no-autosave`.
    pub autosave: Option<bool>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.pigeon/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".pigeon").join("config.toml"))
}

/// Load config from `~/.pigeon/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `PigeonConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<PigeonConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(PigeonConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<PigeonConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(PigeonConfig::default());
    }

    let contents = fs::read_to_string(path)?;
    let config: PigeonConfig = toml::from_str(&contents)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Pigeon Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults, then this file, then env vars, then CLI flags.

# [general]
# user_count = 5                     # Or set PIGEON_USER_COUNT
# seed = 42                          # Fixed seed for a reproducible directory (PIGEON_SEED)
# snapshot_file = "snapshot.json"    # Path relative to ~/.pigeon/ (PIGEON_SNAPSHOT)
# autosave = false                   # Save the session on quit (needs a snapshot file)

# [ui]
# notice_ms = 1000                   # How long "Conversation created!" stays up
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &PigeonConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

fn resolve_with_env(
    config: &PigeonConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // User count: CLI → env → config → default
    let requested_count = cli
        .user_count
        .or_else(|| parse_env(&env, "PIGEON_USER_COUNT"))
        .or(config.general.user_count);

    // Seed: CLI → env → config → random
    let seed = cli
        .seed
        .or_else(|| parse_env(&env, "PIGEON_SEED"))
        .or(config.general.seed);

    // Snapshot: CLI → env → config (relative to ~/.pigeon/), else none
    let snapshot_path = cli
        .snapshot
        .clone()
        .or_else(|| env("PIGEON_SNAPSHOT").map(PathBuf::from))
        .or_else(|| {
            config
                .general
                .snapshot_file
                .as_deref()
                .map(resolve_snapshot_file)
        });

    let autosave = cli
        .autosave
        .or(config.general.autosave)
        .unwrap_or(DEFAULT_AUTOSAVE);
    if autosave && snapshot_path.is_none() {
        warn!("Autosave is on but no snapshot file is set, nothing will be saved");
    }

    ResolvedConfig {
        user_count: requested_count.unwrap_or(DEFAULT_USER_COUNT),
        seed,
        directory_requested: requested_count.is_some() || seed.is_some(),
        snapshot_path,
        autosave,
        notice_ms: config.ui.notice_ms.unwrap_or(DEFAULT_NOTICE_MS),
    }
}

fn parse_env<T: std::str::FromStr>(env: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = env(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring {}: cannot parse {:?}", key, raw);
            None
        }
    }
}

fn resolve_snapshot_file(file: &str) -> PathBuf {
    let path = PathBuf::from(file);
    if path.is_absolute() {
        return path;
    }
    match dirs::home_dir() {
        Some(home) => home.join(".pigeon").join(path),
        None => path,
    }
}
