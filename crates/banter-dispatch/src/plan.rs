// SPDX-FileCopyrightText: 2026 Banter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pure computation of the typing-paced delivery plan.
//!
//! Offsets are computed eagerly against a single origin so that actual
//! send latency never shifts later fragments: fragment i+1 stacks on
//! fragment i's computed completion offset, not its wall-clock completion.

use std::time::Duration;

use banter_config::model::PacingConfig;

/// Typing-simulation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    /// Delay before the typing indicator appears.
    pub react_delay: Duration,
    /// Simulated typing time per character.
    pub per_char_delay: Duration,
    /// Upper bound on the simulated typing time per fragment.
    pub typing_cap: Duration,
}

impl Pacing {
    /// Builds pacing from the `[pacing]` config section.
    pub fn from_config(config: &PacingConfig) -> Self {
        Self {
            react_delay: Duration::from_millis(config.react_delay_ms),
            per_char_delay: Duration::from_millis(config.per_char_delay_ms),
            typing_cap: Duration::from_millis(config.typing_cap_ms),
        }
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self::from_config(&PacingConfig::default())
    }
}

/// One scheduled reply fragment with its absolute offsets from dispatch start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryStep {
    pub text: String,
    /// When the typing indicator fires.
    pub typing_at: Duration,
    /// When the message send fires; always `>= typing_at`.
    pub deliver_at: Duration,
    /// The first fragment may be sent as a reply to the triggering message.
    pub is_first: bool,
}

/// Computes the delivery plan for an ordered fragment sequence.
///
/// For each fragment: the typing indicator fires `react_delay` after the
/// previous fragment's delivery, types for `min(typing_cap, chars *
/// per_char_delay)`, then the message is delivered. Deliveries are strictly
/// sequential and never overlap.
pub fn plan_delivery(fragments: &[String], pacing: &Pacing) -> Vec<DeliveryStep> {
    let mut offset = Duration::ZERO;
    fragments
        .iter()
        .enumerate()
        .map(|(i, fragment)| {
            let typing_at = offset + pacing.react_delay;
            let typing_for = pacing
                .typing_cap
                .min(pacing.per_char_delay * fragment.chars().count() as u32);
            let deliver_at = typing_at + typing_for;
            offset = deliver_at;
            DeliveryStep {
                text: fragment.clone(),
                typing_at,
                deliver_at,
                is_first: i == 0,
            }
        })
        .collect()
}
