//! Thin Discord gateway adapter.
//!
//! Logs in with the bot token, parses the configurable command prefix,
//! and dispatches inbound commands to the orchestrator. Each inbound
//! event runs on its own task via serenity's dispatch, so one user's slow
//! invocation never blocks another's.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serenity::async_trait;
use serenity::model::channel::Message;
use serenity::model::gateway::{GatewayIntents, Ready};
use serenity::prelude::{Client, Context, EventHandler};
use tracing::{error, info};

use crate::config::GlobalConfig;
use crate::orchestrator::CommandOrchestrator;
use crate::{AppError, Result};

/// Inbound command kinds, dispatched through one fixed match.
#[derive(Debug, Clone, PartialEq, Eq)]
enum BotCommand {
    /// Publish today's challenge.
    Daily,
    /// Publish a specific question.
    Question(String),
    /// `question` invoked without a slug.
    QuestionUsage,
    /// Liveness probe.
    Ping,
}

/// Parse a prefix-stripped message into a command. Unknown commands are
/// `None` and get no reply.
fn parse_command(rest: &str) -> Option<BotCommand> {
    let mut parts = rest.split_whitespace();
    match parts.next()? {
        "daily" => Some(BotCommand::Daily),
        "ping" => Some(BotCommand::Ping),
        "question" => Some(parts.next().map_or(BotCommand::QuestionUsage, |slug| {
            BotCommand::Question(slug.to_owned())
        })),
        _ => None,
    }
}

struct Handler {
    orchestrator: Arc<CommandOrchestrator>,
    prefix: String,
    started_at: DateTime<Utc>,
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!(user = %ready.user.name, "logged in");
    }

    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }
        // Gateway replays can deliver messages from before this process
        // started; those commands were answered by the previous run.
        let sent = DateTime::from_timestamp(msg.timestamp.unix_timestamp(), 0).unwrap_or_default();
        if sent < self.started_at {
            return;
        }
        let Some(rest) = msg.content.strip_prefix(&self.prefix) else {
            return;
        };
        let Some(command) = parse_command(rest) else {
            return;
        };

        let invoker = msg.author.id.get();
        let reply = match command {
            BotCommand::Ping => ping_reply(&msg),
            BotCommand::Daily => self.orchestrator.run_daily(invoker).await,
            BotCommand::Question(slug) => self.orchestrator.run_question(invoker, &slug).await,
            BotCommand::QuestionUsage => format!("Usage: {}question <slug>", self.prefix),
        };

        if let Err(err) = msg.channel_id.say(&ctx.http, reply).await {
            error!(%err, channel = msg.channel_id.get(), "failed to send reply");
        }
    }
}

/// Round-trip latency from the inbound message's snowflake timestamp.
fn ping_reply(msg: &Message) -> String {
    let sent_ms = msg.id.created_at().unix_timestamp_nanos() / 1_000_000;
    let now_ms = i128::from(Utc::now().timestamp_millis());
    format!("Pong! In {}ms", (now_ms - sent_ms).max(0))
}

/// Connect to the gateway and dispatch events until shutdown.
///
/// Installs a ctrl-c/SIGTERM handler that shuts the shards down
/// gracefully.
///
/// # Errors
///
/// Returns `AppError::Gateway` if the client cannot be built or the
/// gateway connection fails.
pub async fn run(config: &GlobalConfig, orchestrator: Arc<CommandOrchestrator>) -> Result<()> {
    let intents =
        GatewayIntents::GUILDS | GatewayIntents::GUILD_MESSAGES | GatewayIntents::MESSAGE_CONTENT;
    let handler = Handler {
        orchestrator,
        prefix: config.discord.command_prefix.clone(),
        started_at: Utc::now(),
    };

    let mut client = Client::builder(&config.discord.bot_token, intents)
        .event_handler(handler)
        .await
        .map_err(|err| AppError::Gateway(format!("failed to build gateway client: {err}")))?;

    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        info!("shutdown signal received");
        shard_manager.shutdown_all().await;
    });

    client
        .start()
        .await
        .map_err(|err| AppError::Gateway(format!("gateway exited: {err}")))
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();

    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => {}
                    _ = sigterm.recv() => {}
                }
            }
            Err(err) => {
                tracing::warn!(%err, "failed to register SIGTERM handler, using ctrl-c only");
                let _ = ctrl_c.await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        if let Err(err) = ctrl_c.await {
            tracing::error!(%err, "ctrl-c signal handler failed");
        }
    }
}
