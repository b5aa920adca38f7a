// SPDX-FileCopyrightText: 2026 Banter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typing-paced response scheduler for the banter relay.
//!
//! Splits into a pure planning step ([`plan::plan_delivery`]) and an
//! effectful dispatcher ([`dispatcher::dispatch`]) firing the plan
//! against a [`banter_core::ChatPort`].

pub mod dispatcher;
pub mod plan;

pub use dispatcher::dispatch;
pub use plan::{DeliveryStep, Pacing, plan_delivery};
