// SPDX-FileCopyrightText: 2026 Banter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests for the complete relay pipeline.
//!
//! Each test runs a real `Relay` against a wiremock Botpress server and a
//! `MockChat` capture port. Tests are independent and order-insensitive.

use std::sync::Arc;
use std::time::Duration;

use banter_botpress::{ConverseClient, CooldownGate};
use banter_core::{BotId, UserId};
use banter_dispatch::Pacing;
use banter_relay::{Relay, RelayOutcome};
use banter_test_utils::MockChat;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CONVERSE_PATH: &str = "/api/v1/bots/support/converse/42/secured";
const LOGIN_PATH: &str = "/api/v1/auth/login/basic/default";

fn pipeline(server: &MockServer) -> Relay {
    let domain = server.uri().strip_prefix("http://").unwrap().to_string();
    let client = ConverseClient::new(domain, "bot@example.com", "hunter2").unwrap();
    Relay::new(
        Arc::new(client),
        Arc::new(CooldownGate::new(Duration::from_secs(60))),
        BotId("support".into()),
        0.5,
        // Fast pacing so delivery completes promptly under real time.
        Pacing {
            react_delay: Duration::from_millis(5),
            per_char_delay: Duration::from_millis(1),
            typing_cap: Duration::from_millis(20),
        },
    )
}

fn nlu_reply(confidence: f64, fragments: &[&str]) -> serde_json::Value {
    let responses: Vec<serde_json::Value> = fragments
        .iter()
        .map(|text| serde_json::json!({"type": "text", "text": text}))
        .collect();
    serde_json::json!({
        "nlu": {"intent": {"name": "faq", "confidence": confidence}},
        "responses": responses
    })
}

async fn drive(relay: &Relay, chat: &Arc<MockChat>, text: &str) -> RelayOutcome {
    relay
        .handle_message(&UserId("42".into()), text, chat.clone(), true)
        .await
        .unwrap()
}

// ---- Message-to-delivery pipeline ----

#[tokio::test]
async fn message_flows_through_to_paced_delivery() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CONVERSE_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(nlu_reply(0.9, &["hi!", "how can I help?"])),
        )
        .mount(&server)
        .await;

    let relay = pipeline(&server);
    let chat = Arc::new(MockChat::new());

    match drive(&relay, &chat, "hello there").await {
        RelayOutcome::Dispatched(handle) => handle.await.unwrap(),
        _ => panic!("expected dispatched delivery"),
    }

    let sent = chat.sent_messages().await;
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].0, "hi!");
    assert!(sent[0].1.reply_to_original, "first fragment replies");
    assert!(sent[0].1.suppress_mention);
    assert_eq!(sent[1].0, "how can I help?");
    assert!(!sent[1].1.reply_to_original);
    assert_eq!(chat.typing_count().await, 2, "one typing signal per fragment");
}

// ---- Auth refresh inside one logical call ----

#[tokio::test]
async fn stale_token_is_refreshed_once_mid_pipeline() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(CONVERSE_PATH))
        .and(header("authorization", "Bearer none"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(serde_json::json!({"errorCode": "BP_0041"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"payload": {"jwt": "fresh-jwt"}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(CONVERSE_PATH))
        .and(header("authorization", "Bearer fresh-jwt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(nlu_reply(0.9, &["back online"])))
        .expect(1)
        .mount(&server)
        .await;

    let relay = pipeline(&server);
    let chat = Arc::new(MockChat::new());

    match drive(&relay, &chat, "hello").await {
        RelayOutcome::Dispatched(handle) => handle.await.unwrap(),
        _ => panic!("expected dispatched delivery"),
    }

    let sent = chat.sent_messages().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, "back online");
}

// ---- Cooldown dedup ----

#[tokio::test]
async fn repeat_message_within_cooldown_is_dropped() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CONVERSE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(nlu_reply(0.9, &["once"])))
        .expect(1)
        .mount(&server)
        .await;

    let relay = pipeline(&server);
    let chat = Arc::new(MockChat::new());

    if let RelayOutcome::Dispatched(handle) = drive(&relay, &chat, "first").await {
        handle.await.unwrap();
    }
    let second = drive(&relay, &chat, "second").await;

    assert!(matches!(second, RelayOutcome::CooldownSuppressed));
    assert_eq!(chat.sent_messages().await.len(), 1);
}

// ---- Low-confidence suppression ----

#[tokio::test]
async fn low_confidence_result_stays_silent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CONVERSE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(nlu_reply(0.1, &["never sent"])))
        .mount(&server)
        .await;

    let relay = pipeline(&server);
    let chat = Arc::new(MockChat::new());

    let outcome = drive(&relay, &chat, "mumble").await;

    assert!(matches!(outcome, RelayOutcome::ConfidenceSuppressed));
    assert!(chat.events().await.is_empty(), "no typing, no sends");
}
