// SPDX-FileCopyrightText: 2026 Banter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway event handler: validity filtering and relay hand-off.
//!
//! A message is relayed only when it arrives in a watched channel, from a
//! human author without an ignored role, and the bot may write to that
//! channel. Reply permission (`READ_MESSAGE_HISTORY`) is resolved here and
//! passed along so the first fragment can go out as a quiet reply.

use std::sync::Arc;

use serenity::all::{Context, EventHandler, Message, Permissions, Ready, RoleId};
use serenity::async_trait;
use tracing::{debug, error, info, warn};

use banter_core::UserId;
use banter_relay::Relay;

use crate::normalize::normalize_content;
use crate::port::DiscordChat;

/// Serenity event handler driving the relay pipeline.
pub struct RelayHandler {
    relay: Arc<Relay>,
    channels: Vec<u64>,
    ignored_roles: Vec<u64>,
}

impl RelayHandler {
    pub fn new(relay: Arc<Relay>, channels: Vec<u64>, ignored_roles: Vec<u64>) -> Self {
        Self {
            relay,
            channels,
            ignored_roles,
        }
    }
}

/// Whether the channel is on the configured allow-list.
///
/// An empty allow-list watches nothing.
pub fn is_watched_channel(channel_id: u64, watched: &[u64]) -> bool {
    watched.contains(&channel_id)
}

/// Whether any of the author's roles is configured as ignored.
pub fn has_ignored_role(roles: &[RoleId], ignored: &[u64]) -> bool {
    roles.iter().any(|role| ignored.contains(&role.get()))
}

/// Resolves the bot's effective permissions in the message's channel.
///
/// Returns `None` outside guilds or when the cache has not seen the
/// guild, channel, or own member yet.
fn channel_permissions(ctx: &Context, msg: &Message) -> Option<Permissions> {
    let me = ctx.cache.current_user().id;
    let guild = msg.guild(&ctx.cache)?;
    let channel = guild.channels.get(&msg.channel_id)?;
    let member = guild.members.get(&me)?;
    Some(guild.user_permissions_in(channel, member))
}

#[async_trait]
impl EventHandler for RelayHandler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!(user = %ready.user.name, "discord gateway connected");
    }

    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }
        if !is_watched_channel(msg.channel_id.get(), &self.channels) {
            return;
        }
        if let Some(member) = &msg.member
            && has_ignored_role(&member.roles, &self.ignored_roles)
        {
            debug!(user = %msg.author.id, "author carries an ignored role");
            return;
        }

        // Cache lookups stay in this sync call; permission bits are copied
        // out before any await point.
        let Some(perms) = channel_permissions(&ctx, &msg) else {
            warn!(channel = %msg.channel_id, "could not resolve channel permissions");
            return;
        };
        if !perms.contains(Permissions::SEND_MESSAGES) {
            debug!(channel = %msg.channel_id, "missing send permission, skipping");
            return;
        }
        let can_reply = perms.contains(Permissions::READ_MESSAGE_HISTORY);

        let text = normalize_content(&msg.content);
        if text.is_empty() {
            debug!(user = %msg.author.id, "message is empty after normalization");
            return;
        }

        let user_id = UserId(msg.author.id.get().to_string());
        let chat = Arc::new(DiscordChat::new(ctx.http.clone(), msg.channel_id, msg.id));

        if let Err(e) = self
            .relay
            .handle_message(&user_id, &text, chat, can_reply)
            .await
        {
            error!(error = %e, user = %user_id, "failed to relay message");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn watched_channel_matches_allow_list() {
        assert!(is_watched_channel(111, &[111, 222]));
        assert!(!is_watched_channel(333, &[111, 222]));
    }

    #[test]
    fn empty_allow_list_watches_nothing() {
        assert!(!is_watched_channel(111, &[]));
    }

    #[test]
    fn ignored_role_is_detected() {
        let roles = vec![RoleId::new(5), RoleId::new(9)];
        assert!(has_ignored_role(&roles, &[9]));
        assert!(!has_ignored_role(&roles, &[7]));
        assert!(!has_ignored_role(&[], &[9]));
    }
}
