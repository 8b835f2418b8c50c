// ABOUTME: Structured error types for native health bridge operations
// ABOUTME: Covers load failures, rejected calls, malformed payloads, and poisoned stores
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use thiserror::Error;

/// Result alias for bridge operations
pub type BridgeResult<T> = Result<T, BridgeError>;

/// Errors raised while loading or calling the native health bridge
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BridgeError {
    /// The bridge module is not linked into this build
    #[error("health bridge is not installed: {details}")]
    NotInstalled {
        /// Why the module could not be found
        details: String,
    },

    /// The bridge module exists but cannot be used by this gateway
    #[error("health bridge version {found} is incompatible (expected {expected})")]
    IncompatibleVersion {
        /// Version the gateway was built against
        expected: String,
        /// Version reported by the module
        found: String,
    },

    /// An individual bridge call was rejected
    #[error("health bridge call '{operation}' failed: {details}")]
    CallFailed {
        /// Bridge operation that failed
        operation: String,
        /// Message reported by the bridge
        details: String,
    },

    /// The bridge returned a payload that cannot be interpreted
    #[error("health bridge returned an invalid payload: {details}")]
    InvalidPayload {
        /// What was wrong with the payload
        details: String,
    },

    /// A lock protecting bridge-side state was poisoned
    #[error("health store lock poisoned: {lock}")]
    StorePoisoned {
        /// Name of the poisoned lock
        lock: String,
    },
}

impl BridgeError {
    /// Create a "not installed" error
    #[must_use]
    pub fn not_installed(details: impl Into<String>) -> Self {
        Self::NotInstalled {
            details: details.into(),
        }
    }

    /// Create a "call failed" error
    #[must_use]
    pub fn call_failed(operation: impl Into<String>, details: impl Into<String>) -> Self {
        Self::CallFailed {
            operation: operation.into(),
            details: details.into(),
        }
    }

    /// Create an "invalid payload" error
    #[must_use]
    pub fn invalid_payload(details: impl Into<String>) -> Self {
        Self::InvalidPayload {
            details: details.into(),
        }
    }

    /// Whether this error happened while acquiring the bridge rather than calling it
    #[must_use]
    pub const fn is_load_failure(&self) -> bool {
        matches!(
            self,
            Self::NotInstalled { .. } | Self::IncompatibleVersion { .. }
        )
    }
}
