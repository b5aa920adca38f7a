// SPDX-FileCopyrightText: 2026 Banter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Timer-driven execution of a delivery plan.
//!
//! Each step runs on its own spawned task sleeping to absolute offsets
//! from one origin instant, so a slow or failed send never delays the
//! steps after it. There is no cancellation: once dispatched, every entry
//! fires; individual send failures are logged and dropped.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::warn;

use banter_core::{ChatPort, SendOptions};

use crate::plan::DeliveryStep;

/// Schedules the plan against the chat port and returns immediately.
///
/// The first fragment is sent as a quiet reply to the triggering message
/// when `can_reply` is set; everything else goes out as a plain channel
/// message. The returned handle resolves once every step has fired; it
/// may be dropped to detach the delivery.
pub fn dispatch(
    chat: Arc<dyn ChatPort>,
    steps: Vec<DeliveryStep>,
    can_reply: bool,
) -> JoinHandle<()> {
    let origin = tokio::time::Instant::now();

    tokio::spawn(async move {
        let tasks: Vec<JoinHandle<()>> = steps
            .into_iter()
            .map(|step| {
                let chat = Arc::clone(&chat);
                tokio::spawn(async move {
                    tokio::time::sleep_until(origin + step.typing_at).await;
                    if let Err(e) = chat.send_typing().await {
                        warn!(error = %e, "failed to send typing indicator");
                    }

                    tokio::time::sleep_until(origin + step.deliver_at).await;
                    let opts = if step.is_first && can_reply {
                        SendOptions::quiet_reply()
                    } else {
                        SendOptions::plain()
                    };
                    if let Err(e) = chat.send_message(&step.text, opts).await {
                        warn!(error = %e, "failed to deliver scheduled reply");
                    }
                })
            })
            .collect();

        for task in tasks {
            let _ = task.await;
        }
    })
}
