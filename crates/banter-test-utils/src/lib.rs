// SPDX-FileCopyrightText: 2026 Banter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for banter integration tests.

pub mod mock_chat;

pub use mock_chat::{ChatEvent, MockChat};
