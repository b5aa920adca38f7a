// SPDX-FileCopyrightText: 2026 Banter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outbound chat primitives consumed by the response dispatcher.

use async_trait::async_trait;

use crate::error::BanterError;
use crate::types::{MessageId, SendOptions};

/// The two send primitives the dispatcher needs from a chat platform.
///
/// An implementation is bound to one target channel; the dispatcher never
/// addresses channels itself. Both calls are best-effort from the
/// scheduler's point of view: a failure is logged by the caller and never
/// cancels later scheduled entries.
#[async_trait]
pub trait ChatPort: Send + Sync {
    /// Emits a "typing…" indicator on the bound channel.
    async fn send_typing(&self) -> Result<(), BanterError>;

    /// Sends a text message on the bound channel.
    async fn send_message(&self, text: &str, opts: SendOptions)
    -> Result<MessageId, BanterError>;
}
