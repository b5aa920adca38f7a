// SPDX-FileCopyrightText: 2026 Banter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `banter serve` command implementation.
//!
//! Wires the Botpress converse client, the cooldown gate with its sweeper,
//! and the relay pipeline together, then hands control to the Discord
//! gateway until shutdown.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use banter_botpress::{ConverseClient, CooldownGate};
use banter_config::BanterConfig;
use banter_core::{BanterError, BotId};
use banter_dispatch::Pacing;
use banter_relay::Relay;

/// How often the cooldown sweeper evicts expired entries.
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Runs the `banter serve` command.
pub async fn run_serve(config: BanterConfig) -> Result<(), BanterError> {
    init_tracing(&config.agent.log_level);

    info!(agent = %config.agent.name, "starting banter serve");

    if config.botpress.bot_id.trim().is_empty() {
        return Err(BanterError::Config(
            "botpress.bot_id is required to serve".to_string(),
        ));
    }

    let client = Arc::new(ConverseClient::from_config(&config.botpress)?);
    let gate = Arc::new(CooldownGate::new(Duration::from_secs(
        config.botpress.cooldown_minutes * 60,
    )));
    let _sweeper = gate.spawn_sweeper(SWEEP_INTERVAL);

    let relay = Arc::new(Relay::new(
        client,
        gate,
        BotId(config.botpress.bot_id.clone()),
        config.botpress.confidence_threshold,
        Pacing::from_config(&config.pacing),
    ));

    banter_discord::run(&config.discord, relay).await
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("banter={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
