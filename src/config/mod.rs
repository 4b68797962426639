//! Configuration for the presenter and the contact backend
//!
//! Configuration is loaded in order of precedence:
//! 1. Command-line flags (applied by `cli`)
//! 2. Environment variables
//! 3. Config file (~/.config/pitchdeck/config.toml)
//! 4. Built-in defaults (lowest priority)

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod contact;
mod observability;
mod serialization;


pub use contact::{
    ContactConfig, FileContact, FileServer, ServerConfig, TransportKind, DEFAULT_BIND,
    DEFAULT_DB_PATH, DEFAULT_ENDPOINT,
};
pub use observability::{FileLogging, LogRotation, LoggingConfig};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_THEME: &str = "light";

/// Environment variable names
pub mod env {
    pub const THEME: &str = "PITCHDECK_THEME";
    pub const DECK: &str = "PITCHDECK_DECK";
    pub const CONTACT_ENDPOINT: &str = "PITCHDECK_CONTACT_ENDPOINT";
    pub const TRANSPORT: &str = "PITCHDECK_TRANSPORT";
    pub const BIND: &str = "PITCHDECK_BIND";
    pub const DB: &str = "PITCHDECK_DB";
}

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Theme name: "light" or "dark"
    pub theme: String,

    /// Deck file to present; `None` uses the bundled deck
    pub deck: Option<PathBuf>,

    /// Contact form submission
    pub contact: ContactConfig,

    /// Contact backend (`pitchdeck serve`)
    pub server: ServerConfig,

    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_string(),
            deck: None,
            contact: ContactConfig::default(),
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure; every key optional
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub theme: Option<String>,
    pub deck: Option<String>,

    /// Optional [contact] section
    pub contact: Option<FileContact>,

    /// Optional [server] section
    pub server: Option<FileServer>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/pitchdeck/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("pitchdeck").join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        // Don't overwrite existing config
        if path.exists() {
            return;
        }

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Config is optional
            }
        }

        if let Err(e) = std::fs::write(&path, Self::default().to_toml()) {
            tracing::debug!("Could not write default config {}: {}", path.display(), e);
        }
    }

    /// Parse a config file; a missing file yields defaults
    fn load_file_config(path: &Path) -> Result<FileConfig> {
        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).with_context(|| {
                format!(
                    "Failed to parse config file {}\n  \
                     Check for missing quotes, invalid booleans or typos in section names.\n  \
                     To reset, run `pitchdeck config --reset`.",
                    path.display()
                )
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FileConfig::default()),
            Err(e) => {
                Err(e).with_context(|| format!("Cannot read config file {}", path.display()))
            }
        }
    }

    /// Load configuration: env > file > defaults
    pub fn load() -> Result<Self> {
        let file = match Self::config_path() {
            Some(path) => Self::load_file_config(&path)?,
            None => FileConfig::default(),
        };
        Self::from_sources(file, |key| std::env::var(key).ok())
    }

    /// Merge a parsed file with an environment lookup
    pub(crate) fn from_sources(
        file: FileConfig,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        // Theme: env > file > default
        let theme = non_empty(env::THEME)
            .or(file.theme)
            .unwrap_or_else(|| DEFAULT_THEME.to_string());

        // Deck: env > file > bundled
        let deck = non_empty(env::DECK).or(file.deck).map(PathBuf::from);

        // [contact]: env overrides individual keys
        let mut contact = ContactConfig::from_file(file.contact);
        if let Some(endpoint) = non_empty(env::CONTACT_ENDPOINT) {
            contact.endpoint = endpoint;
        }
        if let Some(transport) = non_empty(env::TRANSPORT) {
            contact.transport = TransportKind::from_name(&transport);
        }

        // [server]
        let file_server = file.server.unwrap_or_default();
        let bind_str = non_empty(env::BIND)
            .or(file_server.bind_addr)
            .unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind_addr = bind_str
            .parse()
            .with_context(|| format!("Invalid bind address '{}'", bind_str))?;
        let db_path = non_empty(env::DB)
            .or(file_server.db_path)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH));
        let server = ServerConfig { bind_addr, db_path };

        let logging = LoggingConfig::from_file(file.logging);

        Ok(Self {
            theme,
            deck,
            contact,
            server,
            logging,
        })
    }
}
