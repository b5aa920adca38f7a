// SPDX-FileCopyrightText: 2026 Banter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The inbound message pipeline.
//!
//! Control flow per message: cooldown gate -> converse -> confidence
//! filter (inside the client) -> delivery plan -> timer dispatch. Every
//! failure is logged and the message dropped; no error reply is ever sent
//! to the channel.

use std::sync::Arc;

use metrics::counter;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use banter_botpress::{ConverseClient, ConverseOutcome, CooldownGate};
use banter_core::{BanterError, BotId, ChatPort, UserId};
use banter_dispatch::{Pacing, dispatch, plan_delivery};

/// What became of one inbound message.
#[derive(Debug)]
pub enum RelayOutcome {
    /// A delivery plan was dispatched; the handle resolves once every
    /// fragment has fired.
    Dispatched(JoinHandle<()>),
    /// The (bot, user) pair already interacted within the cooldown window.
    CooldownSuppressed,
    /// NLU confidence was below the threshold, or the utterance ambiguous.
    ConfidenceSuppressed,
    /// The service answered with zero text fragments.
    EmptyReply,
}

/// Relays admitted user messages to the NLU service and schedules the
/// paced delivery of its replies.
pub struct Relay {
    client: Arc<ConverseClient>,
    gate: Arc<CooldownGate>,
    bot_id: BotId,
    confidence_threshold: f64,
    pacing: Pacing,
}

impl Relay {
    pub fn new(
        client: Arc<ConverseClient>,
        gate: Arc<CooldownGate>,
        bot_id: BotId,
        confidence_threshold: f64,
        pacing: Pacing,
    ) -> Self {
        Self {
            client,
            gate,
            bot_id,
            confidence_threshold,
            pacing,
        }
    }

    /// Runs one message through the pipeline.
    ///
    /// Returns without blocking on delivery: scheduled sends fire on their
    /// own timers after this call resolves.
    pub async fn handle_message(
        &self,
        user_id: &UserId,
        text: &str,
        chat: Arc<dyn ChatPort>,
        can_reply: bool,
    ) -> Result<RelayOutcome, BanterError> {
        counter!("banter_messages_total").increment(1);

        if !self.gate.admit(&self.bot_id, user_id) {
            debug!(user = %user_id, "user is within the cooldown window");
            counter!("banter_cooldown_suppressed_total").increment(1);
            return Ok(RelayOutcome::CooldownSuppressed);
        }

        let outcome = match self
            .client
            .converse(&self.bot_id, user_id, text, self.confidence_threshold)
            .await
        {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(error = %e, user = %user_id, "converse call failed");
                counter!("banter_relay_failures_total").increment(1);
                return Err(e);
            }
        };

        let fragments = match outcome {
            ConverseOutcome::Suppressed => {
                counter!("banter_replies_suppressed_total").increment(1);
                return Ok(RelayOutcome::ConfidenceSuppressed);
            }
            ConverseOutcome::Replies(fragments) => fragments,
        };

        if fragments.is_empty() {
            warn!(user = %user_id, "service reply carried no text fragments");
            return Ok(RelayOutcome::EmptyReply);
        }

        counter!("banter_fragments_delivered_total").increment(fragments.len() as u64);
        info!(user = %user_id, fragments = fragments.len(), "dispatching paced reply");

        let plan = plan_delivery(&fragments, &self.pacing);
        Ok(RelayOutcome::Dispatched(dispatch(chat, plan, can_reply)))
    }
}
