// SPDX-FileCopyrightText: 2026 Banter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as ranges and non-empty hosts.

use crate::diagnostic::ConfigError;
use crate::model::BanterConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &BanterConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.botpress.domain.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "botpress.domain must not be empty".to_string(),
        });
    }

    let threshold = config.botpress.confidence_threshold;
    if !(0.0..=1.0).contains(&threshold) {
        errors.push(ConfigError::Validation {
            message: format!(
                "botpress.confidence_threshold must be between 0.0 and 1.0, got {threshold}"
            ),
        });
    }

    if config.botpress.cooldown_minutes < 1 {
        errors.push(ConfigError::Validation {
            message: format!(
                "botpress.cooldown_minutes must be at least 1, got {}",
                config.botpress.cooldown_minutes
            ),
        });
    }

    if config.pacing.react_delay_ms < 1 {
        errors.push(ConfigError::Validation {
            message: "pacing.react_delay_ms must be at least 1".to_string(),
        });
    }

    if config.pacing.per_char_delay_ms < 1 {
        errors.push(ConfigError::Validation {
            message: "pacing.per_char_delay_ms must be at least 1".to_string(),
        });
    }

    if config.pacing.typing_cap_ms < config.pacing.per_char_delay_ms {
        errors.push(ConfigError::Validation {
            message: format!(
                "pacing.typing_cap_ms ({}) must not be below pacing.per_char_delay_ms ({})",
                config.pacing.typing_cap_ms, config.pacing.per_char_delay_ms
            ),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
