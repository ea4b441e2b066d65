//! Discord implementation of the publisher's thread surface.
//!
//! Adapts serenity's HTTP client: guild active-thread listing filtered by
//! parent channel, public-thread creation, one embed per artifact, bounded
//! history reads, and the invoking member's thread-creation permission.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serenity::builder::{CreateEmbed, CreateMessage, CreateThread, GetMessages};
use serenity::http::{Http, HttpError};
use serenity::model::channel::{AutoArchiveDuration, ChannelType, GuildChannel};
use serenity::model::id::{ChannelId, GuildId, UserId};
use serenity::model::Timestamp;

use crate::errors::PublishError;
use crate::models::{Artifact, ThreadHandle};
use crate::publish::{ThreadMessage, ThreadSurface};

/// Thread surface backed by serenity's HTTP client for one guild.
pub struct DiscordSurface {
    http: Arc<Http>,
    guild: GuildId,
}

impl DiscordSurface {
    /// Build a surface over the given HTTP handle and guild.
    #[must_use]
    pub fn new(http: Arc<Http>, guild_id: u64) -> Self {
        Self {
            http,
            guild: GuildId::new(guild_id),
        }
    }

    fn jump_link(&self, channel: u64, message: u64) -> String {
        format!(
            "https://discord.com/channels/{}/{channel}/{message}",
            self.guild.get()
        )
    }

    fn handle_from_channel(&self, thread: &GuildChannel) -> ThreadHandle {
        // Thread metadata carries the creation time; fall back to the
        // snowflake timestamp when the platform omits it.
        let created = thread
            .thread_metadata
            .as_ref()
            .and_then(|metadata| metadata.create_timestamp)
            .unwrap_or_else(|| thread.id.created_at());
        ThreadHandle {
            id: thread.id.get(),
            name: thread.name.clone(),
            created_at: to_chrono(created),
            parent_channel: thread.parent_id.map(ChannelId::get).unwrap_or_default(),
        }
    }
}

impl ThreadSurface for DiscordSurface {
    fn active_threads(
        &self,
        channel: u64,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<ThreadHandle>, PublishError>> + Send + '_>> {
        Box::pin(async move {
            let data = self
                .guild
                .get_active_threads(&*self.http)
                .await
                .map_err(|err| map_platform_error("failed to list active threads", &err))?;
            let parent = ChannelId::new(channel);
            Ok(data
                .threads
                .iter()
                .filter(|thread| thread.parent_id == Some(parent))
                .map(|thread| self.handle_from_channel(thread))
                .collect())
        })
    }

    fn can_create_threads(
        &self,
        channel: u64,
        user: u64,
    ) -> Pin<Box<dyn Future<Output = Result<bool, PublishError>> + Send + '_>> {
        Box::pin(async move {
            let guild = self
                .guild
                .to_partial_guild(&*self.http)
                .await
                .map_err(|err| map_platform_error("failed to fetch guild", &err))?;
            let member = guild
                .member(&*self.http, UserId::new(user))
                .await
                .map_err(|err| map_platform_error("failed to fetch member", &err))?;
            let channel = ChannelId::new(channel)
                .to_channel(&*self.http)
                .await
                .map_err(|err| map_platform_error("failed to fetch channel", &err))?
                .guild()
                .ok_or_else(|| {
                    PublishError::ChannelNotFound("target is not a guild channel".into())
                })?;
            let permissions = guild.user_permissions_in(&channel, &member);
            Ok(permissions.create_public_threads())
        })
    }

    fn create_thread(
        &self,
        channel: u64,
        name: &str,
    ) -> Pin<Box<dyn Future<Output = Result<ThreadHandle, PublishError>> + Send + '_>> {
        let name = name.to_owned();
        Box::pin(async move {
            let builder = CreateThread::new(name)
                .kind(ChannelType::PublicThread)
                .auto_archive_duration(AutoArchiveDuration::OneDay);
            let thread = ChannelId::new(channel)
                .create_thread(&*self.http, builder)
                .await
                .map_err(|err| map_platform_error("failed to create thread", &err))?;
            Ok(self.handle_from_channel(&thread))
        })
    }

    fn post_artifact(
        &self,
        thread: u64,
        artifact: &Artifact,
    ) -> Pin<Box<dyn Future<Output = Result<(), PublishError>> + Send + '_>> {
        let embed = artifact_embed(artifact);
        Box::pin(async move {
            ChannelId::new(thread)
                .send_message(&*self.http, CreateMessage::new().embed(embed))
                .await
                .map_err(|err| map_platform_error("failed to post artifact", &err))?;
            Ok(())
        })
    }

    fn post_note(
        &self,
        thread: u64,
        text: &str,
    ) -> Pin<Box<dyn Future<Output = Result<(), PublishError>> + Send + '_>> {
        let text = text.to_owned();
        Box::pin(async move {
            ChannelId::new(thread)
                .say(&*self.http, text)
                .await
                .map_err(|err| map_platform_error("failed to post note", &err))?;
            Ok(())
        })
    }

    fn recent_messages(
        &self,
        thread: u64,
        limit: u8,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<ThreadMessage>, PublishError>> + Send + '_>> {
        Box::pin(async move {
            let messages = ChannelId::new(thread)
                .messages(&*self.http, GetMessages::new().limit(limit))
                .await
                .map_err(|err| map_platform_error("failed to read thread history", &err))?;
            Ok(messages
                .into_iter()
                .map(|message| ThreadMessage {
                    id: message.id.get(),
                    from_bot: message.author.bot,
                    content: message.content,
                    jump_link: self.jump_link(thread, message.id.get()),
                })
                .collect())
        })
    }
}

/// Render an artifact as a Discord embed.
fn artifact_embed(artifact: &Artifact) -> CreateEmbed {
    let mut builder = CreateEmbed::new().title(&artifact.title);
    if let Some(description) = &artifact.description {
        builder = builder.description(description);
    }
    for field in &artifact.fields {
        builder = builder.field(&field.name, &field.value, field.inline);
    }
    builder
}

/// Map a serenity failure onto the publish taxonomy.
fn map_platform_error(context: &str, err: &serenity::Error) -> PublishError {
    if let serenity::Error::Http(HttpError::UnsuccessfulRequest(response)) = err {
        match response.status_code.as_u16() {
            403 => return PublishError::PermissionDenied(format!("{context}: {err}")),
            404 => return PublishError::ChannelNotFound(format!("{context}: {err}")),
            _ => {}
        }
    }
    PublishError::PlatformError(format!("{context}: {err}"))
}

fn to_chrono(timestamp: Timestamp) -> DateTime<Utc> {
    DateTime::from_timestamp(timestamp.unix_timestamp(), 0).unwrap_or_default()
}
