// SPDX-FileCopyrightText: 2026 Banter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Discord channel adapter for the banter relay.
//!
//! Connects to the Discord gateway via serenity, filters inbound guild
//! messages against the configured allow-list, normalizes their content,
//! and hands them to the [`banter_relay::Relay`] pipeline. Outbound
//! delivery goes through [`port::DiscordChat`].

pub mod handler;
pub mod normalize;
pub mod port;

use std::sync::Arc;

use serenity::all::{Client, GatewayIntents};
use tracing::info;

use banter_config::model::DiscordConfig;
use banter_core::BanterError;
use banter_relay::Relay;

use crate::handler::RelayHandler;

/// Connects to the Discord gateway and runs until shutdown.
///
/// Blocks for the lifetime of the gateway connection. A Ctrl-C shuts the
/// shards down gracefully.
pub async fn run(config: &DiscordConfig, relay: Arc<Relay>) -> Result<(), BanterError> {
    let token = config
        .bot_token
        .clone()
        .ok_or_else(|| BanterError::Config("discord.bot_token is required".to_string()))?;

    let intents =
        GatewayIntents::GUILDS | GatewayIntents::GUILD_MESSAGES | GatewayIntents::MESSAGE_CONTENT;
    let handler = RelayHandler::new(
        relay,
        config.channels.clone(),
        config.ignored_roles.clone(),
    );

    let mut client = Client::builder(&token, intents)
        .event_handler(handler)
        .await
        .map_err(|e| BanterError::Channel {
            message: format!("failed to build discord client: {e}"),
            source: Some(Box::new(e)),
        })?;

    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutdown signal received, stopping discord shards");
            shard_manager.shutdown_all().await;
        }
    });

    info!(channels = config.channels.len(), "starting discord gateway");
    client.start().await.map_err(|e| BanterError::Channel {
        message: format!("discord gateway error: {e}"),
        source: Some(Box::new(e)),
    })
}
