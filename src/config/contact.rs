//! Contact submission and backend configuration
//!
//! - [contact]: where the presenter sends form submissions
//! - [server]: where `pitchdeck serve` listens and stores requests

use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000";
pub const DEFAULT_BIND: &str = "127.0.0.1:5000";
pub const DEFAULT_DB_PATH: &str = "./data/contacts.db";

// ─────────────────────────────────────────────────────────────────────────────
// [contact]
// ─────────────────────────────────────────────────────────────────────────────

/// Which transport the presenter submits through
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TransportKind {
    /// POST to the configured endpoint
    #[default]
    Http,
    /// Answer locally, nothing leaves the process
    Mock,
}

impl TransportKind {
    /// Parse from config; unknown values fall back to http
    pub fn from_name(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "mock" => Self::Mock,
            _ => Self::Http,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Mock => "mock",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContactConfig {
    /// Base URL of the contact backend (no trailing path)
    pub endpoint: String,
    pub transport: TransportKind,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            transport: TransportKind::Http,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileContact {
    pub endpoint: Option<String>,
    pub transport: Option<String>,
}

impl ContactConfig {
    pub fn from_file(file: Option<FileContact>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            endpoint: file.endpoint.unwrap_or(defaults.endpoint),
            transport: file
                .transport
                .map(|s| TransportKind::from_name(&s))
                .unwrap_or(defaults.transport),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// [server]
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// SQLite file for received contact requests
    pub db_path: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            db_path: PathBuf::from(DEFAULT_DB_PATH),
        }
    }
}

/// Bind address stays a string here; parsing happens once env is merged in
#[derive(Debug, Deserialize, Default)]
pub struct FileServer {
    pub bind_addr: Option<String>,
    pub db_path: Option<String>,
}
