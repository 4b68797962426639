// CLI module - command-line argument parsing and handlers
//
// Subcommands:
// - present (default): run the slide deck in the terminal
// - serve: run the contact backend
// - contacts: list stored contact requests
// - check-deck: validate a deck file
// - config --show/--path/--reset: configuration management

use crate::config::{Config, TransportKind, VERSION};
use crate::deck::Deck;
use crate::storage::ContactStore;
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io::Write;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Pitchdeck - terminal slide deck with a contact form
#[derive(Parser)]
#[command(name = "pitchdeck")]
#[command(version = VERSION)]
#[command(about = "Terminal slide deck with a contact form", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Present the deck (default)
    Present(PresentArgs),

    /// Run the contact backend
    Serve(ServeArgs),

    /// List stored contact requests
    Contacts {
        /// Number of requests to show, newest first
        #[arg(long, default_value_t = 20)]
        limit: usize,

        /// Database path (defaults to [server] db_path)
        #[arg(long)]
        db: Option<PathBuf>,
    },

    /// Parse and validate a deck file
    CheckDeck {
        /// Deck TOML file
        path: PathBuf,
    },

    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,
    },
}

#[derive(Args, Default)]
pub struct PresentArgs {
    /// Deck TOML file (defaults to the bundled deck)
    #[arg(long)]
    pub deck: Option<PathBuf>,

    /// Simulate submissions locally instead of posting them
    #[arg(long, conflicts_with = "endpoint")]
    pub mock: bool,

    /// Contact backend base URL
    #[arg(long)]
    pub endpoint: Option<String>,
}

impl PresentArgs {
    /// CLI flags win over env and file values
    pub fn apply(self, config: &mut Config) {
        if let Some(deck) = self.deck {
            config.deck = Some(deck);
        }
        if let Some(endpoint) = self.endpoint {
            config.contact.endpoint = endpoint;
            config.contact.transport = TransportKind::Http;
        }
        if self.mock {
            config.contact.transport = TransportKind::Mock;
        }
    }
}

#[derive(Args, Default)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long)]
    pub bind: Option<SocketAddr>,

    /// SQLite database path
    #[arg(long)]
    pub db: Option<PathBuf>,
}

impl ServeArgs {
    pub fn apply(self, config: &mut Config) {
        if let Some(bind) = self.bind {
            config.server.bind_addr = bind;
        }
        if let Some(db) = self.db {
            config.server.db_path = db;
        }
    }
}

pub fn parse() -> Cli {
    Cli::parse()
}

// ─────────────────────────────────────────────────────────────────────────────
// Offline commands (no TUI, no server)
// ─────────────────────────────────────────────────────────────────────────────

pub fn handle_contacts(config: &Config, limit: usize, db: Option<PathBuf>) -> Result<()> {
    let db_path = db.unwrap_or_else(|| config.server.db_path.clone());
    if !db_path.exists() {
        println!("No contact database at {}", db_path.display());
        return Ok(());
    }

    let store = ContactStore::open(&db_path)?;
    let total = store.count()?;
    let records = store.recent(limit)?;

    println!(
        "{} contact request(s) in {} (showing {})",
        total,
        db_path.display(),
        records.len()
    );
    for record in records {
        println!();
        println!(
            "#{} {}  {} <{}>",
            record.id,
            record.created_at.format("%Y-%m-%d %H:%M"),
            record.name.as_deref().unwrap_or("(no name)"),
            record.email
        );
        for line in record.message.lines() {
            println!("    {}", line);
        }
    }
    Ok(())
}

pub fn handle_check_deck(path: &Path) -> Result<()> {
    let deck = Deck::load(path).with_context(|| format!("Deck check failed: {}", path.display()))?;

    println!("{}: {} slides", deck.title(), deck.len());
    for (index, slide) in deck.slides().iter().enumerate() {
        let marker = if slide.is_contact() { " [contact]" } else { "" };
        println!("  {:>2}. {:<24} {}{}", index + 1, slide.id, slide.title, marker);
    }
    if !deck.slides().iter().any(|s| s.is_contact()) {
        println!("  (no contact slide: the form will never show)");
    }
    Ok(())
}

/// `config` subcommand; prints usage when no flag is given
pub fn handle_config(show: bool, path: bool, reset: bool) -> Result<()> {
    if path {
        handle_config_path()
    } else if show {
        handle_config_show()
    } else if reset {
        handle_config_reset()
    } else {
        // No flag provided, show help
        println!("Usage: pitchdeck config [--show|--path|--reset]");
        println!();
        println!("Options:");
        println!("  --show    Display effective configuration");
        println!("  --path    Show config file path");
        println!("  --reset   Reset config file to defaults");
        Ok(())
    }
}

fn handle_config_path() -> Result<()> {
    let path = Config::config_path().context("Could not determine config path")?;
    println!("{}", path.display());
    Ok(())
}

fn handle_config_show() -> Result<()> {
    let config = Config::load()?;

    println!("# Effective configuration (env > file > defaults)");
    println!();
    print!("{}", config.to_toml());

    // Show source info
    println!();
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("# Source: {}", path.display());
        } else {
            println!("# Source: defaults (no config file)");
        }
    }
    Ok(())
}

fn handle_config_reset() -> Result<()> {
    let path = Config::config_path().context("Could not determine config path")?;

    // Confirm if file exists
    if path.exists() {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        std::io::stderr().flush()?;

        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Error creating directory {}", parent.display()))?;
    }

    // Write the default config (using Config's single source of truth)
    std::fs::write(&path, Config::default().to_toml())
        .with_context(|| format!("Error writing config {}", path.display()))?;

    println!("Config reset to defaults: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_present() {
        let cli = Cli::try_parse_from(["pitchdeck"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn present_flags_override_config() {
        let cli = Cli::try_parse_from([
            "pitchdeck",
            "present",
            "--deck",
            "talk.toml",
            "--endpoint",
            "http://contact.local:8080",
        ])
        .unwrap();
        let Some(Commands::Present(args)) = cli.command else {
            panic!("expected present");
        };

        let mut config = Config::default();
        config.contact.transport = TransportKind::Mock;
        args.apply(&mut config);

        assert_eq!(config.deck, Some(PathBuf::from("talk.toml")));
        assert_eq!(config.contact.endpoint, "http://contact.local:8080");
        assert_eq!(config.contact.transport, TransportKind::Http);
    }

    #[test]
    fn mock_and_endpoint_conflict() {
        let result = Cli::try_parse_from([
            "pitchdeck",
            "present",
            "--mock",
            "--endpoint",
            "http://x",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn serve_rejects_bad_bind_address() {
        assert!(Cli::try_parse_from(["pitchdeck", "serve", "--bind", "nowhere"]).is_err());

        let cli = Cli::try_parse_from(["pitchdeck", "serve", "--bind", "0.0.0.0:9000"]).unwrap();
        let Some(Commands::Serve(args)) = cli.command else {
            panic!("expected serve");
        };
        let mut config = Config::default();
        args.apply(&mut config);
        assert_eq!(config.server.bind_addr.port(), 9000);
    }

    #[test]
    fn contacts_limit_defaults_to_twenty() {
        let cli = Cli::try_parse_from(["pitchdeck", "contacts"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Contacts { limit: 20, db: None })
        ));
    }
}
