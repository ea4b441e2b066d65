#![forbid(unsafe_code)]

//! `lc-herald` bot binary.
//!
//! Bootstraps configuration and credentials, wires the remote question
//! client, the thread publisher, and the orchestrator into a service
//! context, then runs the Discord gateway until shutdown.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use lc_herald::config::GlobalConfig;
use lc_herald::discord::{gateway, DiscordSurface};
use lc_herald::orchestrator::CommandOrchestrator;
use lc_herald::publish::ThreadPublisher;
use lc_herald::remote::RemoteQuestionClient;
use lc_herald::{AppError, Result};

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "lc-herald", about = "LeetCode question herald for Discord", version, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long)]
    config: PathBuf,

    /// Log output format (text or json).
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.log_format)?;
    info!("lc-herald bootstrap");

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|err| AppError::Config(format!("failed to build tokio runtime: {err}")))?
        .block_on(run(args))
}

async fn run(args: Cli) -> Result<()> {
    let mut config = GlobalConfig::load_from_path(&args.config)?;
    config.load_credentials().await?;
    info!("configuration loaded");

    let client = RemoteQuestionClient::new(
        config.upstream.endpoint.clone(),
        config.upstream.session_cookie.clone(),
        Duration::from_secs(config.timeouts.request_seconds),
    )?;

    let http = Arc::new(serenity::http::Http::new(&config.discord.bot_token));
    let surface = DiscordSurface::new(http, config.discord.guild_id);
    let publisher = ThreadPublisher::new(Arc::new(surface));

    let orchestrator = Arc::new(CommandOrchestrator::new(
        Arc::new(client),
        publisher,
        config.discord.channel_id,
        Duration::from_secs(config.cooldown.per_command_hours * 60 * 60),
    ));

    info!("service context wired; starting gateway");
    gateway::run(&config, orchestrator).await?;
    info!("lc-herald shut down");

    Ok(())
}

fn init_tracing(log_format: LogFormat) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = fmt().with_env_filter(env_filter);

    match log_format {
        LogFormat::Text => subscriber
            .try_init()
            .map_err(|err| AppError::Config(format!("failed to init tracing: {err}")))?,
        LogFormat::Json => subscriber
            .json()
            .try_init()
            .map_err(|err| AppError::Config(format!("failed to init tracing: {err}")))?,
    }

    Ok(())
}
