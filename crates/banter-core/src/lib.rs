// SPDX-FileCopyrightText: 2026 Banter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the banter relay.
//!
//! This crate provides the error type, identifier newtypes, and the
//! [`ChatPort`] trait that decouples the response dispatcher from the
//! concrete chat platform.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::BanterError;
pub use traits::ChatPort;
pub use types::{BotId, MessageId, SendOptions, UserId};
