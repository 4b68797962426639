// Startup module - banner and module status
//
// `pitchdeck serve` prints a banner to stdout before logs start. The
// presenter owns the screen, so it writes the same information into the
// log buffer instead (visible with F2).

use crate::config::{Config, TransportKind, VERSION};
use crate::deck::Deck;

/// ANSI color codes for terminal output
mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GREEN: &str = "\x1b[32m";
    pub const MAGENTA: &str = "\x1b[35m";
}

/// Module loading result for display
pub struct ModuleStatus {
    pub name: &'static str,
    pub enabled: bool,
    pub description: String,
}

/// Banner for `pitchdeck serve`
pub fn print_server_banner(config: &Config) {
    use colors::*;

    println!();
    println!("  {BOLD}{CYAN}pitchdeck{RESET} {DIM}v{VERSION}{RESET}");
    println!("  {DIM}Contact backend{RESET}");
    println!();

    print_config_source();

    println!("  {DIM}Loading modules...{RESET}");
    for module in server_modules(config) {
        print_module_status(&module);
    }
    println!();

    println!(
        "  {MAGENTA}▸{RESET} Listening on {BOLD}http://{}{RESET}",
        config.server.bind_addr
    );
    println!(
        "  {MAGENTA}▸{RESET} Storing requests in {BOLD}{}{RESET}",
        config.server.db_path.display()
    );
    println!();
}

fn print_config_source() {
    use colors::*;

    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("  {DIM}Config:{RESET} {GREEN}✓{RESET} {}", path.display());
        } else {
            println!("  {DIM}Config:{RESET} {DIM}(using defaults){RESET}");
        }
    }
    println!();
}

fn server_modules(config: &Config) -> Vec<ModuleStatus> {
    vec![
        ModuleStatus {
            name: "http",
            enabled: true,
            description: "POST /api/contact, GET /api/health".to_string(),
        },
        ModuleStatus {
            name: "storage",
            enabled: true,
            description: format!("SQLite ({})", config.server.db_path.display()),
        },
        ModuleStatus {
            name: "file-logs",
            enabled: config.logging.file_enabled,
            description: format!("JSON logs in {}", config.logging.file_dir.display()),
        },
    ]
}

fn presenter_modules(config: &Config, deck: &Deck, transport: &str) -> Vec<ModuleStatus> {
    vec![
        ModuleStatus {
            name: "deck",
            enabled: true,
            description: format!("{} ({} slides)", deck.title(), deck.len()),
        },
        ModuleStatus {
            name: "contact",
            enabled: deck.slides().iter().any(|s| s.is_contact()),
            description: format!("submits via {}", transport),
        },
        ModuleStatus {
            name: "mock",
            enabled: config.contact.transport == TransportKind::Mock,
            description: "local answers, nothing sent".to_string(),
        },
        ModuleStatus {
            name: "file-logs",
            enabled: config.logging.file_enabled,
            description: format!("JSON logs in {}", config.logging.file_dir.display()),
        },
    ]
}

/// Print a single module's status
fn print_module_status(module: &ModuleStatus) {
    use colors::*;

    let (icon, style) = if module.enabled {
        (format!("{GREEN}✓{RESET}"), "")
    } else {
        (format!("{DIM}○{RESET}"), DIM)
    };

    println!(
        "    {icon} {style}{:<12}{RESET} {DIM}{}{RESET}",
        module.name, module.description
    );
}

/// Startup messages for the presenter's log overlay
pub fn log_startup(config: &Config, deck: &Deck, transport: &str) {
    tracing::info!("══════════════════════════════");
    tracing::info!("  pitchdeck v{}", VERSION);
    tracing::info!("══════════════════════════════");

    for module in presenter_modules(config, deck, transport) {
        let icon = if module.enabled { "✓" } else { "○" };
        tracing::info!("  {} {} - {}", icon, module.name, module.description);
    }

    tracing::info!("Ready. ← → to navigate, F1 for help");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presenter_modules_reflect_config() {
        let deck = Deck::bundled().unwrap();
        let mut config = Config::default();
        config.contact.transport = TransportKind::Mock;

        let modules = presenter_modules(&config, &deck, "mock (local)");
        let mock = modules.iter().find(|m| m.name == "mock").unwrap();
        assert!(mock.enabled);

        let contact = modules.iter().find(|m| m.name == "contact").unwrap();
        assert!(contact.enabled);
        assert_eq!(contact.description, "submits via mock (local)");

        let deck_line = modules.iter().find(|m| m.name == "deck").unwrap();
        assert!(deck_line.description.contains("16 slides"));
    }
}
