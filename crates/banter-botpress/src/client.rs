// SPDX-FileCopyrightText: 2026 Banter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Botpress converse API.
//!
//! Provides [`ConverseClient`] which handles request construction, bearer
//! authentication with a single re-login retry, and interpretation of the
//! response envelope including the confidence filter.

use banter_core::{BanterError, BotId, UserId};
use banter_config::model::BotpressConfig;
use tracing::{debug, error, info, warn};

use crate::token::TokenStore;
use crate::types::{
    ConverseEnvelope, ConverseOutcome, ConverseRequest, LoginEnvelope, LoginRequest,
    extract_fragments,
};

/// Error code Botpress uses for an invalid or expired bearer token.
const INVALID_TOKEN_CODE: &str = "BP_0041";

/// HTTP client for the Botpress converse and login endpoints.
///
/// One logical converse call spans at most two physical POSTs: on the
/// distinguished invalid-token error code the client logs in once, stores
/// the new credential, and repeats the request. A second rejection is
/// terminal.
pub struct ConverseClient {
    http: reqwest::Client,
    base_url: String,
    email: String,
    password: String,
    token: TokenStore,
}

impl ConverseClient {
    /// Creates a client for the Botpress server at `domain` (host, no scheme).
    pub fn new(
        domain: impl AsRef<str>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, BanterError> {
        let http = reqwest::Client::builder().build().map_err(|e| {
            BanterError::Transport {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            }
        })?;

        Ok(Self {
            http,
            base_url: format!("http://{}", domain.as_ref()),
            email: email.into(),
            password: password.into(),
            token: TokenStore::new(),
        })
    }

    /// Creates a client from the `[botpress]` config section.
    ///
    /// Login credentials are required here even though the config keeps them
    /// optional: without them the secured converse endpoint can never
    /// authenticate.
    pub fn from_config(config: &BotpressConfig) -> Result<Self, BanterError> {
        let email = config
            .email
            .clone()
            .ok_or_else(|| BanterError::Config("botpress.email is required".to_string()))?;
        let password = config
            .password
            .clone()
            .ok_or_else(|| BanterError::Config("botpress.password is required".to_string()))?;
        Self::new(&config.domain, email, password)
    }

    /// One logical converse exchange: POST the utterance, interpret the
    /// envelope, and refresh the token at most once on the distinguished
    /// auth-error code.
    ///
    /// Resolves `Ok(Suppressed)` when NLU confidence is below `threshold`
    /// (inclusive comparison: `confidence >= threshold` delivers) or when a
    /// degraded envelope flags the utterance as ambiguous.
    pub async fn converse(
        &self,
        bot_id: &BotId,
        user_id: &UserId,
        text: &str,
        threshold: f64,
    ) -> Result<ConverseOutcome, BanterError> {
        let url = format!(
            "{}/api/v1/bots/{}/converse/{}/secured?include=nlu",
            self.base_url, bot_id, user_id
        );
        let body = ConverseRequest::text(text);

        let mut allow_reauth = true;
        loop {
            let token = self.token.current().await;
            let response = self
                .http
                .post(&url)
                .bearer_auth(&token)
                .json(&body)
                .send()
                .await
                .map_err(|e| BanterError::Transport {
                    message: format!("converse request failed: {e}"),
                    source: Some(Box::new(e)),
                })?;

            let raw = response.text().await.map_err(|e| BanterError::Transport {
                message: format!("failed to read converse response body: {e}"),
                source: Some(Box::new(e)),
            })?;

            // Botpress signals auth failure in the body, so the envelope is
            // parsed without consulting the HTTP status.
            let envelope: ConverseEnvelope =
                serde_json::from_str(&raw).map_err(|e| BanterError::Parse {
                    message: format!("malformed converse envelope: {e}"),
                })?;

            if envelope.error_code.as_deref() == Some(INVALID_TOKEN_CODE) {
                if allow_reauth {
                    info!("refreshing invalid token");
                    self.token
                        .refresh_with(&token, || self.login())
                        .await?;
                    allow_reauth = false;
                    continue;
                }
                error!(stale_token = %token, "token rejected again after refresh");
                return Err(BanterError::AuthRetryExhausted { stale_token: token });
            }

            return interpret_envelope(envelope, threshold);
        }
    }

    /// Logs in with the configured credentials and returns the fresh JWT.
    ///
    /// A single attempt; the outcome is reported as-is.
    pub async fn login(&self) -> Result<String, BanterError> {
        let url = format!("{}/api/v1/auth/login/basic/default", self.base_url);
        let body = LoginRequest {
            email: &self.email,
            password: &self.password,
        };

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| BanterError::Transport {
                message: format!("login request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let raw = response.text().await.map_err(|e| BanterError::Transport {
            message: format!("failed to read login response body: {e}"),
            source: Some(Box::new(e)),
        })?;

        let envelope: LoginEnvelope =
            serde_json::from_str(&raw).map_err(|e| BanterError::Parse {
                message: format!("malformed login envelope: {e}"),
            })?;

        info!("login successful");
        Ok(envelope.payload.jwt)
    }
}

/// Applies the confidence filter and extracts reply fragments.
fn interpret_envelope(
    envelope: ConverseEnvelope,
    threshold: f64,
) -> Result<ConverseOutcome, BanterError> {
    let nlu = envelope.nlu.ok_or_else(|| BanterError::Parse {
        message: "converse envelope is missing the nlu block".to_string(),
    })?;

    if let Some(intent) = &nlu.intent {
        if intent.confidence < threshold {
            warn!(
                confidence = intent.confidence,
                threshold, "skipping ambiguous request"
            );
            return Ok(ConverseOutcome::Suppressed);
        }
    } else if let Some(ambiguous) = nlu.ambiguous {
        if ambiguous {
            warn!("skipping request flagged ambiguous");
            return Ok(ConverseOutcome::Suppressed);
        }
        debug!("degraded envelope without confidence score, ambiguous=false");
    } else {
        return Err(BanterError::Parse {
            message: "nlu block carries neither intent.confidence nor ambiguous".to_string(),
        });
    }

    let fragments = extract_fragments(&envelope.responses)?;
    Ok(ConverseOutcome::Replies(fragments))
}
