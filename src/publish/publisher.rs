//! Resolve/reuse/create state machine for deduplicated threads.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{info, warn};

use crate::errors::PublishError;
use crate::models::{Artifact, ThreadHandle};
use crate::publish::surface::ThreadSurface;

/// Rolling reuse window. A thread whose age is strictly less than this is
/// reused; at exactly the boundary a new thread is created.
const REUSE_WINDOW_HOURS: i64 = 24;

/// How many recent thread messages the reuse path searches for a prior
/// confirmation.
const HISTORY_SEARCH_LIMIT: u8 = 100;

/// Marker the create path embeds in its confirmation note and the reuse
/// path searches for.
pub const CONFIRMATION_MARKER: &str = "Summary posted";

/// Terminal result of one publish invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    /// A new thread was created and all artifacts were posted into it.
    Created(ThreadHandle),
    /// An equivalent thread already existed within the reuse window;
    /// nothing was posted again.
    Reused {
        /// The existing thread.
        handle: ThreadHandle,
        /// Jump link to the prior confirmation, when the history search
        /// found one.
        jump_link: Option<String>,
    },
}

impl PublishOutcome {
    /// The thread this invocation resolved to.
    #[must_use]
    pub fn handle(&self) -> &ThreadHandle {
        match self {
            Self::Created(handle) | Self::Reused { handle, .. } => handle,
        }
    }
}

/// Places artifacts into a deduplicated, time-windowed discussion thread.
pub struct ThreadPublisher {
    surface: Arc<dyn ThreadSurface>,
}

impl ThreadPublisher {
    /// Build a publisher over the given platform surface.
    #[must_use]
    pub fn new(surface: Arc<dyn ThreadSurface>) -> Self {
        Self { surface }
    }

    /// Publish `artifacts` into a thread named `title` under `channel`.
    ///
    /// Resolve: an existing thread with the exact name, created within the
    /// rolling 24-hour window, is reused without reposting. Otherwise a new
    /// thread is created (after verifying `invoker` holds thread-creation
    /// capability), the artifacts are posted in array order, and a trailing
    /// confirmation note marks the thread for later reuse lookups. The
    /// window is evaluated against wall-clock time at check time, not the
    /// invocation's calendar day.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::PermissionDenied`] when the invoker may not
    /// create threads, [`PublishError::ChannelNotFound`] when the channel
    /// is missing, or [`PublishError::PlatformError`] for other host
    /// failures. None are retried.
    pub async fn publish(
        &self,
        channel: u64,
        invoker: u64,
        title: &str,
        artifacts: &[Artifact],
    ) -> Result<PublishOutcome, PublishError> {
        let threads = self.surface.active_threads(channel).await?;
        let existing = threads
            .into_iter()
            .find(|thread| thread.name == title && within_reuse_window(thread));

        if let Some(handle) = existing {
            let jump_link = self.find_confirmation(handle.id).await;
            info!(
                thread = handle.id,
                name = %handle.name,
                found_confirmation = jump_link.is_some(),
                "reusing existing thread"
            );
            return Ok(PublishOutcome::Reused { handle, jump_link });
        }

        if !self.surface.can_create_threads(channel, invoker).await? {
            return Err(PublishError::PermissionDenied(
                "invoking user may not create threads in the target channel".into(),
            ));
        }

        let handle = self.surface.create_thread(channel, title).await?;
        for artifact in artifacts {
            self.surface.post_artifact(handle.id, artifact).await?;
        }
        self.surface
            .post_note(handle.id, &format!("✅ {CONFIRMATION_MARKER} — {title}"))
            .await?;

        info!(
            thread = handle.id,
            name = %handle.name,
            artifacts = artifacts.len(),
            "created thread and posted artifacts"
        );
        Ok(PublishOutcome::Created(handle))
    }

    /// Best-effort search for the bot's prior confirmation note. Thread
    /// indexing can lag, so a failed or empty search reports existence
    /// without a jump link instead of erroring.
    async fn find_confirmation(&self, thread: u64) -> Option<String> {
        match self
            .surface
            .recent_messages(thread, HISTORY_SEARCH_LIMIT)
            .await
        {
            Ok(messages) => messages
                .into_iter()
                .find(|message| message.from_bot && message.content.contains(CONFIRMATION_MARKER))
                .map(|message| message.jump_link),
            Err(err) => {
                warn!(thread, %err, "confirmation search failed; reporting without link");
                None
            }
        }
    }
}

fn within_reuse_window(thread: &ThreadHandle) -> bool {
    Utc::now().signed_duration_since(thread.created_at) < Duration::hours(REUSE_WINDOW_HOURS)
}
