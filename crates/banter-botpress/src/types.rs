// SPDX-FileCopyrightText: 2026 Banter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types for the Botpress HTTP API.
//!
//! Botpress reports auth failures inside the JSON body (`errorCode`), not
//! via HTTP status, so the envelope carries both the error and success
//! shapes and the client inspects the parsed value.

use banter_core::BanterError;
use serde::{Deserialize, Serialize};

/// Body of a secured or unsecured converse POST.
#[derive(Debug, Clone, Serialize)]
pub struct ConverseRequest {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
}

impl ConverseRequest {
    /// Builds the `{type:"text", text}` payload for a user utterance.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: "text".to_string(),
            text: text.into(),
        }
    }
}

/// Body of the basic-auth login POST.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Login response envelope: `{payload:{jwt}}`.
///
/// Both fields are required; a missing `payload.jwt` is a parse failure,
/// never a silent default.
#[derive(Debug, Deserialize)]
pub struct LoginEnvelope {
    pub payload: LoginPayload,
}

#[derive(Debug, Deserialize)]
pub struct LoginPayload {
    pub jwt: String,
}

/// Converse response envelope.
#[derive(Debug, Deserialize)]
pub struct ConverseEnvelope {
    /// Distinguished error code; `BP_0041` signals an invalid token.
    #[serde(rename = "errorCode")]
    pub error_code: Option<String>,

    /// NLU block, present on secured converse responses.
    pub nlu: Option<Nlu>,

    #[serde(default)]
    pub responses: Vec<ReplyItem>,
}

/// NLU result carried by the envelope.
///
/// Full-featured servers report `intent.confidence`; a degraded envelope
/// variant reports only an `ambiguous` flag.
#[derive(Debug, Deserialize)]
pub struct Nlu {
    pub intent: Option<Intent>,
    pub ambiguous: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct Intent {
    pub confidence: f64,
}

/// One item of the structured reply array.
#[derive(Debug, Clone, Deserialize)]
pub struct ReplyItem {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: Option<String>,
}

/// Successful interpretation of a converse envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConverseOutcome {
    /// Text fragments to deliver, in the service's array order.
    Replies(Vec<String>),
    /// Confidence below threshold or ambiguous NLU; nothing to deliver.
    Suppressed,
}

/// Extracts the text fragments from a reply array, preserving order.
///
/// Items of other kinds (quick replies, cards, ...) are silently skipped.
/// A `text`-kind item without a `text` field is a parse failure.
pub fn extract_fragments(items: &[ReplyItem]) -> Result<Vec<String>, BanterError> {
    let mut fragments = Vec::new();
    for item in items {
        if item.kind != "text" {
            continue;
        }
        match &item.text {
            Some(text) => fragments.push(text.clone()),
            None => {
                return Err(BanterError::Parse {
                    message: "reply item of type `text` is missing its text field".to_string(),
                });
            }
        }
    }
    Ok(fragments)
}
