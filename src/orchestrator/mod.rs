//! Binds user commands to the fetch → compose → publish pipeline.
//!
//! The orchestrator applies the per-user cooldown before any remote work,
//! sequences the primary fetch ahead of the dependent fetches, degrades
//! dependent failures to placeholder artifacts, and converts every
//! failure into a single user-visible message. Full detail stays in
//! operator logs under a correlation id and is never echoed to end users.

pub mod cooldown;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};
use uuid::Uuid;

use crate::compose;
use crate::errors::FetchError;
use crate::models::Artifact;
use crate::publish::{PublishOutcome, ThreadPublisher};
use crate::remote::QuestionSource;

pub use cooldown::CooldownLedger;

/// User-visible outcome of one command invocation.
pub type UserReply = String;

const DAILY_COMMAND: &str = "daily";
const QUESTION_COMMAND: &str = "question";

/// The one message end users see for any fetch-side failure.
const GENERIC_FAILURE: &str =
    "Couldn't put together the question summary right now. Please try again later.";

/// Runs the aggregation-and-publish pipeline for user commands.
///
/// Constructed once at startup with its collaborators injected; lifetime
/// is the process lifetime.
pub struct CommandOrchestrator {
    source: Arc<dyn QuestionSource>,
    publisher: ThreadPublisher,
    channel: u64,
    cooldowns: CooldownLedger,
}

impl CommandOrchestrator {
    /// Wire up the orchestrator with its collaborators.
    #[must_use]
    pub fn new(
        source: Arc<dyn QuestionSource>,
        publisher: ThreadPublisher,
        channel: u64,
        cooldown_window: Duration,
    ) -> Self {
        Self {
            source,
            publisher,
            channel,
            cooldowns: CooldownLedger::new(cooldown_window),
        }
    }

    /// Run the `daily` command: publish today's challenge.
    pub async fn run_daily(&self, invoker: u64) -> UserReply {
        if let Some(remaining) = self.cooldowns.remaining(invoker, DAILY_COMMAND) {
            return cooldown_reply(remaining);
        }
        let correlation = Uuid::new_v4();

        let daily = match fetch_with_retry(|| self.source.fetch_daily()).await {
            Ok(daily) => daily,
            Err(err) => return self.fetch_failure(correlation, DAILY_COMMAND, &err),
        };

        let title = format!("Daily LC — {}", daily.date);
        let primary = compose::daily_artifact(&daily);
        self.finish(invoker, correlation, DAILY_COMMAND, primary, &daily.question.slug, &title)
            .await
    }

    /// Run the `question <slug>` command: publish a specific question.
    pub async fn run_question(&self, invoker: u64, slug: &str) -> UserReply {
        if let Some(remaining) = self.cooldowns.remaining(invoker, QUESTION_COMMAND) {
            return cooldown_reply(remaining);
        }
        let correlation = Uuid::new_v4();

        let question = match fetch_with_retry(|| self.source.fetch_question(slug)).await {
            Ok(question) => question,
            Err(err) => return self.fetch_failure(correlation, QUESTION_COMMAND, &err),
        };

        let title = format!("LC — {}", question.title);
        let primary = compose::question_artifact(&question);
        self.finish(invoker, correlation, QUESTION_COMMAND, primary, &question.slug, &title)
            .await
    }

    /// Dependent fetches, composition, publish, and cooldown arming —
    /// common to both pipeline commands. The dependent fetches run
    /// independently of each other and degrade to placeholders on failure.
    async fn finish(
        &self,
        invoker: u64,
        correlation: Uuid,
        command: &'static str,
        primary: Artifact,
        slug: &str,
        title: &str,
    ) -> UserReply {
        let (stats, similar) = tokio::join!(
            fetch_with_retry(|| self.source.fetch_company_stats(slug)),
            fetch_with_retry(|| self.source.fetch_similar(slug)),
        );

        let stats = stats.unwrap_or_else(|err| {
            self.log_fetch_failure(correlation, command, &err);
            warn!(%correlation, slug, "degrading to company-stats placeholder");
            None
        });
        let similar = similar.unwrap_or_else(|err| {
            self.log_fetch_failure(correlation, command, &err);
            warn!(%correlation, slug, "degrading to similar-questions placeholder");
            Vec::new()
        });

        let artifacts = [
            primary,
            compose::company_artifact(stats.as_ref()),
            compose::similar_artifact(&similar),
        ];

        match self
            .publisher
            .publish(self.channel, invoker, title, &artifacts)
            .await
        {
            Ok(outcome) => {
                self.cooldowns.arm(invoker, command);
                info!(%correlation, command, title, "pipeline complete");
                publish_reply(title, &outcome)
            }
            Err(err) => {
                error!(%correlation, command, %err, "publish failed");
                format!("Couldn't publish the summary — {err}.")
            }
        }
    }

    /// Map a primary-fetch failure to the generic user reply.
    fn fetch_failure(&self, correlation: Uuid, command: &str, err: &FetchError) -> UserReply {
        self.log_fetch_failure(correlation, command, err);
        GENERIC_FAILURE.into()
    }

    fn log_fetch_failure(&self, correlation: Uuid, command: &str, err: &FetchError) {
        match err {
            // Operator alert: the session is dead for every future call.
            FetchError::Unauthorized(_) => {
                error!(%correlation, command, %err, "upstream session rejected");
            }
            _ => warn!(%correlation, command, %err, "fetch failed"),
        }
    }
}

/// Retry a fetch at most once, and only for transport failures. No
/// backoff: calls are interactive and user-triggered.
async fn fetch_with_retry<T, F, Fut>(fetch: F) -> Result<T, FetchError>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, FetchError>>,
{
    match fetch().await {
        Err(err) if err.is_transient() => {
            warn!(%err, "transient fetch failure; retrying once");
            fetch().await
        }
        other => other,
    }
}

fn cooldown_reply(remaining: Duration) -> UserReply {
    let minutes_total = remaining.as_secs().div_ceil(60);
    let hours = minutes_total / 60;
    let minutes = minutes_total % 60;
    format!("You've already run this command recently. Try again in {hours}h {minutes}m.")
}

fn publish_reply(title: &str, outcome: &PublishOutcome) -> UserReply {
    match outcome {
        PublishOutcome::Created(handle) => {
            format!("Posted **{title}** — see <#{}>.", handle.id)
        }
        PublishOutcome::Reused {
            jump_link: Some(link),
            ..
        } => format!("A thread for **{title}** already exists: {link}"),
        PublishOutcome::Reused { handle, .. } => format!(
            "A thread for **{title}** already exists in <#{}> (created within the last 24 hours).",
            handle.id
        ),
    }
}
