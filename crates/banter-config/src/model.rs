// SPDX-FileCopyrightText: 2026 Banter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the banter relay.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level banter configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BanterConfig {
    /// Agent identity and logging settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Botpress NLU service settings.
    #[serde(default)]
    pub botpress: BotpressConfig,

    /// Discord integration settings.
    #[serde(default)]
    pub discord: DiscordConfig,

    /// Typing-simulation pacing for multi-message replies.
    #[serde(default)]
    pub pacing: PacingConfig,
}

/// Agent identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the agent.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_agent_name() -> String {
    "banter".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Botpress NLU service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BotpressConfig {
    /// Host (and optional port) of the Botpress server, without scheme.
    #[serde(default = "default_domain")]
    pub domain: String,

    /// Login email for the secured converse API. `None` requires env override.
    #[serde(default)]
    pub email: Option<String>,

    /// Login password for the secured converse API.
    #[serde(default)]
    pub password: Option<String>,

    /// Identifier of the bot to converse with.
    #[serde(default)]
    pub bot_id: String,

    /// Minimum NLU intent confidence required to deliver a reply (0.0-1.0).
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f64,

    /// Per-(bot,user) dedup window in minutes.
    #[serde(default = "default_cooldown_minutes")]
    pub cooldown_minutes: u64,
}

impl Default for BotpressConfig {
    fn default() -> Self {
        Self {
            domain: default_domain(),
            email: None,
            password: None,
            bot_id: String::new(),
            confidence_threshold: default_confidence_threshold(),
            cooldown_minutes: default_cooldown_minutes(),
        }
    }
}

fn default_domain() -> String {
    "localhost:3000".to_string()
}

fn default_confidence_threshold() -> f64 {
    0.5
}

fn default_cooldown_minutes() -> u64 {
    5
}

/// Discord integration configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DiscordConfig {
    /// Discord bot token. `None` disables the Discord adapter.
    #[serde(default)]
    pub bot_token: Option<String>,

    /// Channel IDs the relay listens on. Messages elsewhere are ignored.
    #[serde(default)]
    pub channels: Vec<u64>,

    /// Role IDs whose members are never relayed.
    #[serde(default)]
    pub ignored_roles: Vec<u64>,
}

/// Typing-simulation pacing configuration.
///
/// Delays stack per reply fragment: a fixed reaction delay, then a typing
/// duration proportional to fragment length, clamped at the cap.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PacingConfig {
    /// Delay before the typing indicator appears, in milliseconds.
    #[serde(default = "default_react_delay_ms")]
    pub react_delay_ms: u64,

    /// Simulated typing time per character, in milliseconds.
    #[serde(default = "default_per_char_delay_ms")]
    pub per_char_delay_ms: u64,

    /// Upper bound on the simulated typing time, in milliseconds.
    #[serde(default = "default_typing_cap_ms")]
    pub typing_cap_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            react_delay_ms: default_react_delay_ms(),
            per_char_delay_ms: default_per_char_delay_ms(),
            typing_cap_ms: default_typing_cap_ms(),
        }
    }
}

fn default_react_delay_ms() -> u64 {
    1000
}

fn default_per_char_delay_ms() -> u64 {
    75
}

fn default_typing_cap_ms() -> u64 {
    7000
}
