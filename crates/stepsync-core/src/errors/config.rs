// ABOUTME: Configuration error types for environment-based gateway settings
// ABOUTME: Reports the offending variable and value so operators can fix deployments
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use thiserror::Error;

/// Malformed gateway configuration
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable holds a value that cannot be parsed
    #[error("invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        /// Environment variable name
        key: String,
        /// Raw value found
        value: String,
        /// Why the value was rejected
        reason: String,
    },

    /// Simulated step range with its lower bound above its upper bound
    #[error("simulated step range is empty: min {min} > max {max}")]
    InvalidRange {
        /// Configured lower bound
        min: u64,
        /// Configured upper bound
        max: u64,
    },
}

impl ConfigError {
    /// Create an "invalid value" error
    #[must_use]
    pub fn invalid_value(
        key: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            key: key.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}
