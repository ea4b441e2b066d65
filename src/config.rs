//! Global configuration parsing, validation, and credential loading.

use std::env;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use crate::{AppError, Result};

/// Keyring service name under which credentials are stored.
const KEYRING_SERVICE: &str = "lc-herald";

/// Upstream question-service settings.
///
/// The session cookie is loaded at runtime via OS keychain or environment
/// variable, never from the TOML config file.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct UpstreamConfig {
    /// GraphQL endpoint URL.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Session cookie sent with every request (populated at runtime).
    #[serde(skip)]
    pub session_cookie: String,
}

fn default_endpoint() -> String {
    "https://leetcode.com/graphql".into()
}

/// Discord connectivity settings.
///
/// The bot token is loaded at runtime via OS keychain or environment
/// variable, never from the TOML config file.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct DiscordConfig {
    /// Guild the bot serves.
    pub guild_id: u64,
    /// Channel where question threads are published.
    pub channel_id: u64,
    /// Single-character prefix for text commands.
    #[serde(default = "default_command_prefix")]
    pub command_prefix: String,
    /// Bot token used for gateway login and HTTP calls (populated at runtime).
    #[serde(skip)]
    pub bot_token: String,
}

fn default_command_prefix() -> String {
    "?".into()
}

/// Per-user command cooldown settings.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct CooldownConfig {
    /// Hours a user must wait between invocations of the same command.
    #[serde(default = "default_cooldown_hours")]
    pub per_command_hours: u64,
}

fn default_cooldown_hours() -> u64 {
    24
}

/// Timeout values (seconds) for remote calls.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct TimeoutConfig {
    /// Upstream request timeout.
    #[serde(default = "default_request_seconds")]
    pub request_seconds: u64,
}

fn default_request_seconds() -> u64 {
    30
}

/// Global configuration parsed from `config.toml`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct GlobalConfig {
    /// Upstream question-service settings.
    #[serde(default)]
    pub upstream: UpstreamConfig,
    /// Discord connectivity settings.
    pub discord: DiscordConfig,
    /// Per-user command cooldown settings.
    #[serde(default)]
    pub cooldown: CooldownConfig,
    /// Remote-call timeouts.
    #[serde(default)]
    pub timeouts: TimeoutConfig,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            session_cookie: String::new(),
        }
    }
}

impl Default for CooldownConfig {
    fn default() -> Self {
        Self {
            per_command_hours: default_cooldown_hours(),
        }
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_seconds: default_request_seconds(),
        }
    }
}

impl GlobalConfig {
    /// Load and validate configuration from a TOML file path.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the file cannot be read or contains
    /// invalid TOML, or if validation fails.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|err| AppError::Config(format!("failed to read config: {err}")))?;
        Self::from_toml_str(&raw)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if parsing or validation fails.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load credentials from OS keychain with env-var fallback.
    ///
    /// Tries the `lc-herald` keyring service first, then falls back to
    /// `LC_COOKIE` / `DISCORD_BOT_TOKEN` environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if neither keychain nor env vars provide
    /// a required credential.
    pub async fn load_credentials(&mut self) -> Result<()> {
        self.upstream.session_cookie = load_credential("lc_session_cookie", "LC_COOKIE").await?;
        self.discord.bot_token = load_credential("discord_bot_token", "DISCORD_BOT_TOKEN").await?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if !self.upstream.endpoint.starts_with("http") {
            return Err(AppError::Config(
                "upstream.endpoint must be an http(s) URL".into(),
            ));
        }

        if self.discord.guild_id == 0 {
            return Err(AppError::Config("discord.guild_id must be set".into()));
        }

        if self.discord.channel_id == 0 {
            return Err(AppError::Config("discord.channel_id must be set".into()));
        }

        let mut prefix_chars = self.discord.command_prefix.chars();
        match (prefix_chars.next(), prefix_chars.next()) {
            (Some(c), None) if !c.is_alphanumeric() => {}
            _ => {
                return Err(AppError::Config(
                    "discord.command_prefix must be a single non-alphanumeric character".into(),
                ));
            }
        }

        if self.cooldown.per_command_hours == 0 {
            return Err(AppError::Config(
                "cooldown.per_command_hours must be greater than zero".into(),
            ));
        }

        if self.timeouts.request_seconds == 0 {
            return Err(AppError::Config(
                "timeouts.request_seconds must be greater than zero".into(),
            ));
        }

        Ok(())
    }
}

/// Load a single credential from OS keychain with env-var fallback.
async fn load_credential(keyring_key: &str, env_key: &str) -> Result<String> {
    let key = keyring_key.to_owned();

    // Try OS keychain first via spawn_blocking (keyring is synchronous I/O).
    let keychain_result = tokio::task::spawn_blocking(move || {
        keyring::Entry::new(KEYRING_SERVICE, &key).and_then(|entry| entry.get_password())
    })
    .await
    .map_err(|err| AppError::Config(format!("keychain task panicked: {err}")))?;

    match keychain_result {
        Ok(value) if !value.is_empty() => return Ok(value),
        Ok(_) => {
            warn!(key = keyring_key, "keychain entry is empty, trying env var");
        }
        Err(err) => {
            warn!(
                key = keyring_key,
                ?err,
                "keychain lookup failed, trying env var"
            );
        }
    }

    // Fallback to environment variable.
    env::var(env_key).map_err(|_| {
        AppError::Config(format!(
            "credential {keyring_key} not found in keychain or {env_key} env var"
        ))
    })
}
