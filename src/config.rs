//! Configuration management for termchat.
//!
//! Configuration is loaded from `~/.config/termchat/config.toml` unless a path
//! is given on the command line. Every field has a default, so a missing file
//! or a partial one is fine.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// URL scheme of the completion server: `http` or `https`.
    #[serde(default = "default_protocol")]
    pub protocol: String,
    /// Completion server address as `host:port`.
    #[serde(default = "default_host")]
    pub host: String,
    /// Maximum number of tokens to predict per reply.
    #[serde(default = "default_limit")]
    pub limit: u32,
    /// Animation shown while waiting (typing, docker-style, speedtest, messenger-typing).
    #[serde(default = "default_animation_style")]
    pub animation_style: String,
    /// Name shown on the user's prompt.
    #[serde(default = "default_user_name")]
    pub user_name: String,
    /// Name shown on replies.
    #[serde(default = "default_interlocutor_name")]
    pub interlocutor_name: String,
    /// Text placed before every turn sent to the server.
    #[serde(default = "default_preamble")]
    pub preamble: String,
    /// HTTP request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            protocol: default_protocol(),
            host: default_host(),
            limit: default_limit(),
            animation_style: default_animation_style(),
            user_name: default_user_name(),
            interlocutor_name: default_interlocutor_name(),
            preamble: default_preamble(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_protocol() -> String {
    "http".to_string()
}

fn default_host() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_limit() -> u32 {
    256
}

fn default_animation_style() -> String {
    "typing".to_string()
}

fn default_user_name() -> String {
    "User".to_string()
}

fn default_interlocutor_name() -> String {
    "Assistant".to_string()
}

fn default_preamble() -> String {
    "This is a conversation between User and Assistant, a friendly and helpful \
     assistant. Assistant answers briefly and precisely."
        .to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

impl Config {
    /// Get the config directory path.
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join("termchat"))
            .context("Could not determine config directory")
    }

    /// Get the default config file path.
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load configuration from `path`, or the default location.
    /// Falls back to defaults if the file does not exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::config_path()?,
        };
        let config: Config = if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?
        } else {
            Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Reject settings the client cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.protocol != "http" && self.protocol != "https" {
            bail!("Protocol must be 'http' or 'https' (got '{}')", self.protocol);
        }
        if self.host.trim().is_empty() {
            bail!("Host must not be empty");
        }
        Ok(())
    }

    /// Full URL of the completion endpoint.
    pub fn completion_url(&self) -> String {
        format!("{}://{}/completion", self.protocol, self.host)
    }
}
