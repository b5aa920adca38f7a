// SPDX-FileCopyrightText: 2026 Banter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! [`ChatPort`] implementation backed by the Discord HTTP API.

use std::sync::Arc;

use async_trait::async_trait;
use serenity::all::{
    ChannelId, CreateAllowedMentions, CreateMessage, Http, MessageId as DiscordMessageId,
    MessageReference,
};

use banter_core::{BanterError, ChatPort, MessageId, SendOptions};

/// A chat port bound to one Discord channel and the message that
/// triggered the exchange.
pub struct DiscordChat {
    http: Arc<Http>,
    channel_id: ChannelId,
    reply_to: DiscordMessageId,
}

impl DiscordChat {
    pub fn new(http: Arc<Http>, channel_id: ChannelId, reply_to: DiscordMessageId) -> Self {
        Self {
            http,
            channel_id,
            reply_to,
        }
    }
}

#[async_trait]
impl ChatPort for DiscordChat {
    async fn send_typing(&self) -> Result<(), BanterError> {
        self.channel_id
            .broadcast_typing(&self.http)
            .await
            .map_err(|e| BanterError::Channel {
                message: format!("failed to send typing indicator: {e}"),
                source: Some(Box::new(e)),
            })
    }

    async fn send_message(
        &self,
        text: &str,
        opts: SendOptions,
    ) -> Result<MessageId, BanterError> {
        let mut builder = CreateMessage::new().content(text);
        if opts.reply_to_original {
            builder = builder
                .reference_message(MessageReference::from((self.channel_id, self.reply_to)));
            if opts.suppress_mention {
                builder =
                    builder.allowed_mentions(CreateAllowedMentions::new().replied_user(false));
            }
        }

        let sent = self
            .channel_id
            .send_message(&self.http, builder)
            .await
            .map_err(|e| BanterError::Channel {
                message: format!("failed to send message: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(MessageId(sent.id.get().to_string()))
    }
}
