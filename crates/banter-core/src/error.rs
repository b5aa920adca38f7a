// SPDX-FileCopyrightText: 2026 Banter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the banter relay.

use thiserror::Error;

/// The primary error type used across the banter workspace.
///
/// `Suppressed` is deliberately absent: a low-confidence or ambiguous NLU
/// result is a successful no-op outcome, not a failure, and is modeled on
/// the `Ok` side of converse calls.
#[derive(Debug, Error)]
pub enum BanterError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Network-level failures talking to the NLU service (connect error, timeout).
    #[error("transport error: {message}")]
    Transport {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The NLU service rejected the token again after the one permitted refresh.
    ///
    /// Carries the stale token value for diagnosis; the converse call is
    /// never retried a second time.
    #[error("received invalid token after refresh: {stale_token}")]
    AuthRetryExhausted { stale_token: String },

    /// Malformed JSON envelope or a missing expected field from the NLU service.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Chat platform errors (send failure, message format, rate limiting).
    #[error("channel error: {message}")]
    Channel {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
