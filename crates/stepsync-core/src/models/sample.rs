// ABOUTME: Activity sample and aggregate query models
// ABOUTME: Caller-owned values passed by value into gateway operations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// One observation of step count at a point in time
///
/// Samples are created by the caller and handed to the gateway, which forwards
/// them to the health store. The gateway never keeps them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivitySample {
    count: u64,
    timestamp: DateTime<Utc>,
}

impl ActivitySample {
    /// Create a sample for `count` steps at `timestamp`
    #[must_use]
    pub const fn new(count: u64, timestamp: DateTime<Utc>) -> Self {
        Self { count, timestamp }
    }

    /// Create a sample, rejecting an empty step count
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::ZeroSteps` when `count` is zero.
    pub fn non_empty(count: u64, timestamp: DateTime<Utc>) -> Result<Self, ValidationError> {
        if count == 0 {
            return Err(ValidationError::ZeroSteps);
        }
        Ok(Self::new(count, timestamp))
    }

    /// Step count carried by this sample
    #[must_use]
    pub const fn count(&self) -> u64 {
        self.count
    }

    /// Instant the sample was recorded at
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Closed time range over which step samples are summed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateQuery {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl AggregateQuery {
    /// Create a query over `[start, end]`
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvertedRange` when `start` is after `end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, ValidationError> {
        if start > end {
            return Err(ValidationError::InvertedRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Query covering a single instant
    #[must_use]
    pub const fn at(instant: DateTime<Utc>) -> Self {
        Self {
            start: instant,
            end: instant,
        }
    }

    /// Query covering one UTC calendar day, midnight to the last millisecond
    #[must_use]
    pub fn for_day(date: NaiveDate) -> Self {
        let start = Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN));
        let end = start + Duration::days(1) - Duration::milliseconds(1);
        Self { start, end }
    }

    /// Start of the range (inclusive)
    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// End of the range (inclusive)
    #[must_use]
    pub const fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Whether `instant` falls inside the range
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }
}
