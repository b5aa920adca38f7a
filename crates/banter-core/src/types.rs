// SPDX-FileCopyrightText: 2026 Banter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared across the banter workspace.

use serde::{Deserialize, Serialize};

/// Identifier of a Botpress bot, as it appears in the converse URL path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BotId(pub String);

impl std::fmt::Display for BotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a chat-platform user, used both as the converse session
/// key and as half of the cooldown key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a delivered chat message, as reported by the platform.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub String);

/// Delivery options for an outbound chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SendOptions {
    /// Send as a reply to the message that triggered this exchange.
    pub reply_to_original: bool,
    /// When replying, do not ping the replied-to user.
    pub suppress_mention: bool,
}

impl SendOptions {
    /// Options for a reply to the triggering message that does not
    /// mention its author.
    pub fn quiet_reply() -> Self {
        Self {
            reply_to_original: true,
            suppress_mention: true,
        }
    }

    /// Options for a plain channel message.
    pub fn plain() -> Self {
        Self::default()
    }
}
