// SPDX-FileCopyrightText: 2026 Banter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Botpress NLU adapter for the banter relay.
//!
//! This crate owns everything that talks to or gates the Botpress server:
//! the converse client with its single re-login retry, the shared token
//! store, the confidence filter, and the per-(bot,user) cooldown gate.

pub mod client;
pub mod cooldown;
pub mod token;
pub mod types;

pub use client::ConverseClient;
pub use cooldown::CooldownGate;
pub use token::TokenStore;
pub use types::ConverseOutcome;
