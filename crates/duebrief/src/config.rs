//! Run-time configuration.
//!
//! All parameters — API credentials, board identifiers, SMTP settings,
//! and the member-to-email recipient mapping — come from one JSON file
//! read once at startup. The digest core never sees any of this.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, ensure};
use serde::Deserialize;

/// Environment variable overriding the config file location.
const CONFIG_ENV: &str = "DUEBRIEF_CONFIG";

/// Security/encryption mode for the SMTP connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Security {
    /// No encryption (not recommended).
    None,
    /// Implicit TLS (connect directly with TLS).
    #[default]
    Tls,
    /// STARTTLS upgrade after plaintext connect.
    StartTls,
}

impl Security {
    /// Default submission port for the security mode.
    #[must_use]
    pub const fn default_port(self) -> u16 {
        match self {
            Self::None => 25,
            Self::StartTls => 587,
            Self::Tls => 465,
        }
    }
}

/// Trello API access and the boards to poll.
#[derive(Debug, Clone, Deserialize)]
pub struct TrelloConfig {
    /// API key (opaque).
    pub key: String,
    /// API token (opaque).
    pub token: String,
    /// Board identifiers to poll.
    pub boards: Vec<String>,
}

/// SMTP submission settings.
#[derive(Debug, Clone, Deserialize)]
pub struct SmtpConfig {
    /// Server hostname.
    pub host: String,
    /// Server port; 0 picks the default for the security mode.
    #[serde(default)]
    pub port: u16,
    /// Security mode.
    #[serde(default)]
    pub security: Security,
    /// Username for authentication.
    pub username: String,
    /// Password for authentication.
    pub password: String,
    /// Sender address.
    pub from: String,
    /// Sender display name.
    #[serde(default = "default_from_name")]
    pub from_name: String,
}

impl SmtpConfig {
    /// Effective port, falling back to the security-mode default.
    #[must_use]
    pub const fn port(&self) -> u16 {
        if self.port == 0 {
            self.security.default_port()
        } else {
            self.port
        }
    }
}

fn default_from_name() -> String {
    "Trello Bot".to_string()
}

/// One digest recipient: a Trello member and their email address.
#[derive(Debug, Clone, Deserialize)]
pub struct Recipient {
    /// Trello member identifier.
    pub member_id: String,
    /// Email address to deliver the digest to.
    pub email: String,
}

/// Full run-time configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Trello access and board set.
    pub trello: TrelloConfig,
    /// SMTP submission settings.
    pub smtp: SmtpConfig,
    /// Digest recipients.
    pub recipients: Vec<Recipient>,
}

impl Config {
    /// Loads the configuration from `$DUEBRIEF_CONFIG` or the per-user
    /// config directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable, malformed,
    /// or names no boards.
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::path()?;
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("reading config at {}", path.display()))?;
        let config: Self = serde_json::from_str(&raw)
            .with_context(|| format!("parsing config at {}", path.display()))?;
        ensure!(
            !config.trello.boards.is_empty(),
            "config names no Trello boards to poll"
        );
        Ok(config)
    }

    /// Resolves a member's configured email address.
    #[must_use]
    pub fn email_for(&self, member_id: &str) -> Option<&str> {
        self.recipients
            .iter()
            .find(|recipient| recipient.member_id == member_id)
            .map(|recipient| recipient.email.as_str())
    }

    fn path() -> anyhow::Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Ok(PathBuf::from(path));
        }
        dirs::config_dir()
            .map(|dir| dir.join("duebrief").join("config.json"))
            .context("could not determine a configuration directory")
    }
}
