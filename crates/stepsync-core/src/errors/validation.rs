// ABOUTME: Validation errors for caller-supplied gateway inputs
// ABOUTME: Inverted aggregate ranges and empty step entries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use thiserror::Error;

/// A caller-supplied value violates a model invariant
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Aggregate query whose start lies after its end
    #[error("query start {start} is after query end {end}")]
    InvertedRange {
        /// Requested start
        start: DateTime<Utc>,
        /// Requested end
        end: DateTime<Utc>,
    },

    /// Step entry with a count of zero
    #[error("step count must be greater than zero")]
    ZeroSteps,
}
