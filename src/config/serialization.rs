//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;

/// Quote a string as a TOML basic string
fn quoted(s: &str) -> String {
    toml::Value::String(s.to_string()).to_string()
}

impl Config {
    /// Render the full config file, with comments
    pub fn to_toml(&self) -> String {
        let deck_line = match &self.deck {
            Some(path) => format!("deck = {}", quoted(&path.display().to_string())),
            None => "# deck = \"./my-deck.toml\"   # unset: bundled deck".to_string(),
        };

        format!(
            r#"# pitchdeck configuration
#
# Precedence: command-line flags > PITCHDECK_* env vars > this file > defaults

# Theme: light, dark
theme = {theme}

# Deck file to present (TOML, see decks/neurobotix.toml)
{deck_line}

# Contact form submission
[contact]
# Base URL of the contact backend; the form posts to {{endpoint}}/api/contact
endpoint = {endpoint}
# Transport: http (post to endpoint), mock (answer locally)
transport = {transport}

# Contact backend (`pitchdeck serve`)
[server]
bind_addr = {bind}
db_path = {db_path}

# Logging configuration (RUST_LOG env var overrides level)
[logging]
level = {log_level}
# JSON file logging (in addition to TUI buffer or stdout)
file_enabled = {log_file_enabled}
file_dir = {log_file_dir}
file_rotation = {log_file_rotation}  # hourly, daily, never
file_prefix = {log_file_prefix}
"#,
            theme = quoted(&self.theme),
            deck_line = deck_line,
            endpoint = quoted(&self.contact.endpoint),
            transport = quoted(self.contact.transport.as_str()),
            bind = quoted(&self.server.bind_addr.to_string()),
            db_path = quoted(&self.server.db_path.display().to_string()),
            log_level = quoted(&self.logging.level),
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = quoted(&self.logging.file_dir.display().to_string()),
            log_file_rotation = quoted(self.logging.file_rotation.as_str()),
            log_file_prefix = quoted(&self.logging.file_prefix),
        )
    }
}
