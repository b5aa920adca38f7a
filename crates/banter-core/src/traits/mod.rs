// SPDX-FileCopyrightText: 2026 Banter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait definitions for the seams between the relay core and its
//! chat-platform collaborator.

pub mod chat;

pub use chat::ChatPort;
