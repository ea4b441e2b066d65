//! Platform port for thread listing, creation, and posting.

use std::future::Future;
use std::pin::Pin;

use crate::errors::PublishError;
use crate::models::{Artifact, ThreadHandle};

/// One message read back from a thread's history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadMessage {
    /// Platform identifier of the message.
    pub id: u64,
    /// Whether this bot authored the message.
    pub from_bot: bool,
    /// Plain-text content.
    pub content: String,
    /// Jump link to the message.
    pub jump_link: String,
}

/// Minimal host-platform surface the publisher needs.
///
/// Implementations map host API failures onto [`PublishError`]; none of
/// these operations are retried by the publisher.
pub trait ThreadSurface: Send + Sync {
    /// List the active threads hanging off `channel`.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::ChannelNotFound`] when the channel does not
    /// exist, or [`PublishError::PlatformError`] for other host failures.
    fn active_threads(
        &self,
        channel: u64,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<ThreadHandle>, PublishError>> + Send + '_>>;

    /// Whether `user` may create threads under `channel`.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::ChannelNotFound`] or
    /// [`PublishError::PlatformError`] when the lookup fails.
    fn can_create_threads(
        &self,
        channel: u64,
        user: u64,
    ) -> Pin<Box<dyn Future<Output = Result<bool, PublishError>> + Send + '_>>;

    /// Create a public thread named `name` under `channel`.
    ///
    /// # Errors
    ///
    /// Returns the mapped [`PublishError`] when creation fails.
    fn create_thread(
        &self,
        channel: u64,
        name: &str,
    ) -> Pin<Box<dyn Future<Output = Result<ThreadHandle, PublishError>> + Send + '_>>;

    /// Post one artifact into `thread` as a rich card.
    ///
    /// # Errors
    ///
    /// Returns the mapped [`PublishError`] when the post fails.
    fn post_artifact(
        &self,
        thread: u64,
        artifact: &Artifact,
    ) -> Pin<Box<dyn Future<Output = Result<(), PublishError>> + Send + '_>>;

    /// Post a plain-text note into `thread`.
    ///
    /// # Errors
    ///
    /// Returns the mapped [`PublishError`] when the post fails.
    fn post_note(
        &self,
        thread: u64,
        text: &str,
    ) -> Pin<Box<dyn Future<Output = Result<(), PublishError>> + Send + '_>>;

    /// Fetch up to `limit` of the most recent messages in `thread`.
    ///
    /// # Errors
    ///
    /// Returns the mapped [`PublishError`] when the read fails.
    fn recent_messages(
        &self,
        thread: u64,
        limit: u8,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<ThreadMessage>, PublishError>> + Send + '_>>;
}
