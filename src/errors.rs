//! Error types shared across the application.

use std::fmt::{Display, Formatter};

/// Shared application result type.
pub type Result<T> = std::result::Result<T, AppError>;

/// Top-level error enumeration for process bootstrap and gateway wiring.
#[derive(Debug)]
pub enum AppError {
    /// Configuration parsing, validation, or credential-loading failure.
    Config(String),
    /// Discord gateway connection or event-loop failure.
    Gateway(String),
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Gateway(msg) => write!(f, "gateway: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(format!("invalid config: {err}"))
    }
}

/// Classified failure from the remote question service.
///
/// `NotFound` and `Malformed` are deterministic for a given input;
/// `Transport` is worth a single immediate retry; `Unauthorized` means the
/// session cookie is dead and every subsequent call will fail identically
/// until credentials are refreshed.
#[derive(Debug)]
pub enum FetchError {
    /// Session cookie is missing, rejected, or expired.
    Unauthorized(String),
    /// Network-level failure or timeout reaching the endpoint.
    Transport(String),
    /// Response shape did not match the expected schema.
    Malformed(String),
    /// The requested slug does not exist upstream.
    NotFound(String),
}

impl FetchError {
    /// Whether a single immediate retry is worthwhile for this failure.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

impl Display for FetchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthorized(msg) => write!(f, "unauthorized: {msg}"),
            Self::Transport(msg) => write!(f, "transport: {msg}"),
            Self::Malformed(msg) => write!(f, "malformed: {msg}"),
            Self::NotFound(msg) => write!(f, "not found: {msg}"),
        }
    }
}

impl std::error::Error for FetchError {}

/// Failure while placing artifacts into the discussion platform.
///
/// None of these are retried automatically; all are surfaced to the
/// invoking user.
#[derive(Debug)]
pub enum PublishError {
    /// The target channel does not exist or is not visible to the bot.
    ChannelNotFound(String),
    /// The invoking user may not create threads in the target channel.
    PermissionDenied(String),
    /// Any other error from the host platform API.
    PlatformError(String),
}

impl Display for PublishError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ChannelNotFound(msg) => write!(f, "channel not found: {msg}"),
            Self::PermissionDenied(msg) => write!(f, "permission denied: {msg}"),
            Self::PlatformError(msg) => write!(f, "platform error: {msg}"),
        }
    }
}

impl std::error::Error for PublishError {}
