// SPDX-FileCopyrightText: 2026 Banter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock chat port for deterministic testing.
//!
//! `MockChat` implements [`ChatPort`] and records every typing indicator
//! and send attempt with a `tokio::time::Instant` timestamp, so paused-
//! clock tests can assert exact delivery offsets.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use banter_core::{BanterError, ChatPort, MessageId, SendOptions};

/// One observed side effect on the mock channel.
#[derive(Debug, Clone)]
pub enum ChatEvent {
    Typing {
        at: tokio::time::Instant,
    },
    Message {
        text: String,
        opts: SendOptions,
        at: tokio::time::Instant,
    },
}

/// A mock chat channel that captures outbound side effects.
pub struct MockChat {
    events: Arc<Mutex<Vec<ChatEvent>>>,
    fail_sends: Arc<Mutex<bool>>,
}

impl MockChat {
    /// Creates a mock channel with an empty event log.
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
            fail_sends: Arc::new(Mutex::new(false)),
        }
    }

    /// When set, `send_message` returns an error; the attempt is still
    /// recorded in the event log.
    pub async fn fail_sends(&self, fail: bool) {
        *self.fail_sends.lock().await = fail;
    }

    /// Every recorded event, in observation order.
    pub async fn events(&self) -> Vec<ChatEvent> {
        self.events.lock().await.clone()
    }

    /// Only the message-send attempts, as (text, options) pairs.
    pub async fn sent_messages(&self) -> Vec<(String, SendOptions)> {
        self.events
            .lock()
            .await
            .iter()
            .filter_map(|e| match e {
                ChatEvent::Message { text, opts, .. } => Some((text.clone(), *opts)),
                ChatEvent::Typing { .. } => None,
            })
            .collect()
    }

    /// Number of typing indicators observed.
    pub async fn typing_count(&self) -> usize {
        self.events
            .lock()
            .await
            .iter()
            .filter(|e| matches!(e, ChatEvent::Typing { .. }))
            .count()
    }

    /// Clears the event log.
    pub async fn clear(&self) {
        self.events.lock().await.clear();
    }
}

impl Default for MockChat {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatPort for MockChat {
    async fn send_typing(&self) -> Result<(), BanterError> {
        self.events.lock().await.push(ChatEvent::Typing {
            at: tokio::time::Instant::now(),
        });
        Ok(())
    }

    async fn send_message(
        &self,
        text: &str,
        opts: SendOptions,
    ) -> Result<MessageId, BanterError> {
        self.events.lock().await.push(ChatEvent::Message {
            text: text.to_string(),
            opts,
            at: tokio::time::Instant::now(),
        });

        if *self.fail_sends.lock().await {
            return Err(BanterError::Channel {
                message: "mock send failure".to_string(),
                source: None,
            });
        }
        Ok(MessageId(format!("mock-msg-{}", uuid::Uuid::new_v4())))
    }
}
