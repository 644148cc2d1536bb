//! Configuration file management for oneshot.
//!
//! Provides a TOML-based config file at `~/.config/oneshot/config.toml` and a
//! resolution chain: CLI flag > env var > config file > default.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Address the server binds to when nothing else is configured.
pub const DEFAULT_BIND: &str = "0.0.0.0";

/// Port the server listens on when nothing else is configured.
pub const DEFAULT_PORT: u16 = 5000;

// -----------------------------------------------------------------------
// Config file types
// -----------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize)]
pub struct ConfigFile {
    pub server: ServerSection,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ServerSection {
    pub bind: String,
    pub port: u16,
}

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the oneshot config directory.
///
/// Always uses XDG layout: `$XDG_CONFIG_HOME/oneshot` or `~/.config/oneshot`.
/// We intentionally ignore `dirs::config_dir()`, which returns
/// `~/Library/Application Support` on macOS.
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("oneshot");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("oneshot")
}

/// Return the path to the oneshot config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

// -----------------------------------------------------------------------
// Read / write
// -----------------------------------------------------------------------

/// Load and parse the config file. Returns an error if it does not exist.
pub fn load_config() -> Result<ConfigFile> {
    let path = config_path();
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&contents).context("failed to parse config file")?;
    Ok(config)
}

/// Serialize and write the config file, creating parent dirs as needed.
pub fn save_config(config: &ConfigFile) -> Result<()> {
    let path = config_path();
    let dir = config_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create config directory {}", dir.display()))?;

    let contents = toml::to_string_pretty(config).context("failed to serialize config")?;
    std::fs::write(&path, &contents)
        .with_context(|| format!("failed to write config file at {}", path.display()))?;

    Ok(())
}

// -----------------------------------------------------------------------
// Resolved config
// -----------------------------------------------------------------------

/// Fully resolved server configuration, ready for use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneshotConfig {
    pub bind: String,
    pub port: u16,
}

impl OneshotConfig {
    /// Resolve configuration using the chain: CLI flag > env var > config file > default.
    ///
    /// - Bind: `cli_bind` > `ONESHOT_BIND` env > `server.bind` > [`DEFAULT_BIND`]
    /// - Port: `cli_port` > `ONESHOT_PORT` env > `server.port` > [`DEFAULT_PORT`]
    pub fn resolve(cli_bind: Option<&str>, cli_port: Option<u16>) -> Result<Self> {
        let file_config = load_config().ok();

        let bind = if let Some(bind) = cli_bind {
            bind.to_string()
        } else if let Ok(bind) = std::env::var("ONESHOT_BIND") {
            bind
        } else if let Some(ref cfg) = file_config {
            cfg.server.bind.clone()
        } else {
            DEFAULT_BIND.to_string()
        };

        let port = if let Some(port) = cli_port {
            port
        } else if let Ok(raw) = std::env::var("ONESHOT_PORT") {
            raw.parse::<u16>()
                .with_context(|| format!("ONESHOT_PORT is not a valid port: {raw:?}"))?
        } else if let Some(ref cfg) = file_config {
            cfg.server.port
        } else {
            DEFAULT_PORT
        };

        Ok(Self { bind, port })
    }
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------
