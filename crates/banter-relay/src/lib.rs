// SPDX-FileCopyrightText: 2026 Banter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Inbound message pipeline for the banter relay.

pub mod relay;

pub use relay::{Relay, RelayOutcome};
