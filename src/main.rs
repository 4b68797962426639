// Pitchdeck - terminal slide deck with a contact form
//
// Presents a company pitch deck in the terminal with animated slide
// transitions, a progress gauge, and a contact form on the last slide.
//
// Architecture:
// - Deck: slides, navigation, progress, transition timing (pure state)
// - Contact: form validation and submission transports (HTTP or mock)
// - TUI (ratatui): renders the deck and routes input
// - Server (axum): optional contact backend that stores requests in SQLite
// - Event system: mpsc channel reports background submissions to the TUI

mod cli;
mod config;
mod contact;
mod deck;
mod events;
mod logging;
mod server;
mod startup;
mod storage;
mod tui;
mod util;

use anyhow::{Context, Result};
use cli::{Commands, PresentArgs, ServeArgs};
use config::{Config, TransportKind};
use contact::transport::{ContactTransport, HttpTransport, MockTransport};
use deck::Deck;
use logging::{LogBuffer, LogSink};
use std::time::Duration;
use storage::ContactStore;

/// Simulated round trip for the mock transport, long enough to see "Sending..."
const MOCK_LATENCY: Duration = Duration::from_millis(600);

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::parse();

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    match cli.command {
        None => present(PresentArgs::default()).await,
        Some(Commands::Present(args)) => present(args).await,
        Some(Commands::Serve(args)) => serve(args).await,
        Some(Commands::Contacts { limit, db }) => {
            let config = Config::load()?;
            cli::handle_contacts(&config, limit, db)
        }
        Some(Commands::CheckDeck { path }) => cli::handle_check_deck(&path),
        Some(Commands::Config { show, path, reset }) => cli::handle_config(show, path, reset),
    }
}

/// Run the presenter TUI
async fn present(args: PresentArgs) -> Result<()> {
    let mut config = Config::load()?;
    args.apply(&mut config);

    // Logs go to the buffer; stdout belongs to the terminal UI.
    // The guard must outlive the presenter so file logs flush.
    let log_buffer = LogBuffer::new();
    let _file_guard = logging::init(&config.logging, LogSink::Buffer(log_buffer.clone()));

    let deck = load_deck(&config)?;
    let transport = build_transport(&config)?;

    startup::log_startup(&config, &deck, &transport.describe());

    tui::run_tui(deck, config, transport, log_buffer).await
}

/// Run the contact backend until Ctrl+C
async fn serve(args: ServeArgs) -> Result<()> {
    let mut config = Config::load()?;
    args.apply(&mut config);

    let _file_guard = logging::init(&config.logging, LogSink::Stdout);

    startup::print_server_banner(&config);

    let store = ContactStore::open(&config.server.db_path)?;

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => tracing::info!("Received Ctrl+C, shutting down"),
            Err(e) => tracing::error!("Failed to listen for Ctrl+C: {}", e),
        }
        shutdown_tx.send(()).ok();
    });

    server::start_server(config.server.bind_addr, store, shutdown_rx).await
}

fn load_deck(config: &Config) -> Result<Deck> {
    match &config.deck {
        Some(path) => {
            let deck = Deck::load(path)?;
            tracing::info!(path = %path.display(), slides = deck.len().get(), "Loaded deck");
            Ok(deck)
        }
        None => Deck::bundled().context("Bundled deck is invalid"),
    }
}

fn build_transport(config: &Config) -> Result<ContactTransport> {
    Ok(match config.contact.transport {
        TransportKind::Http => {
            ContactTransport::Http(HttpTransport::new(&config.contact.endpoint)?)
        }
        TransportKind::Mock => {
            ContactTransport::Mock(MockTransport::succeeding().with_delay(MOCK_LATENCY))
        }
    })
}
