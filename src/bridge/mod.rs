// ABOUTME: Contract for the optional native health bridge and its request types
// ABOUTME: Narrow async interface for authorization and generic sample type queries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Native Health Bridge
//!
//! The bridge is an opaque, optionally present module that talks to the
//! platform health store. The gateway depends on two operations only:
//!
//! - `request_authorization` with the permission lists to request
//! - `query_sample_type`, used both for point writes (limit 1, start = end)
//!   and for unbounded range reads (limit 0)
//!
//! Query responses are loosely typed JSON. [`payload`] narrows them into
//! [`payload::SampleBatch`] before the gateway looks at them.

/// Lazy, single-flight bridge acquisition
pub mod loader;
/// In-memory health store implementing the bridge contract
pub mod memory;
/// Narrowing of untyped bridge payloads
pub mod payload;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use stepsync_core::constants::query_limits;
use stepsync_core::errors::BridgeResult;
use stepsync_core::models::{ActivitySample, AggregateQuery, AuthorizationRequest};

pub use loader::{BridgeHandle, BridgeLoadState, BridgeLoader, NotInstalledLoader, PreloadedBridge};
pub use memory::{InMemoryHealthStore, StoredSample};
pub use payload::{RawSample, SampleBatch};

/// Bridge operation names used in logs and errors
pub mod operations {
    /// Permission request
    pub const REQUEST_AUTHORIZATION: &str = "requestAuthorization";
    /// Generic sample type query
    pub const QUERY_SAMPLE_TYPE: &str = "queryHKitSampleType";
}

/// Access to the platform health store
///
/// Any error returned here is treated by the gateway as a recoverable failure
/// of that single call.
#[async_trait]
pub trait HealthBridge: Send + Sync {
    /// Short identifier for logs
    fn name(&self) -> &'static str;

    /// Ask the user for access to the sample types in `request`
    async fn request_authorization(&self, request: &AuthorizationRequest) -> BridgeResult<()>;

    /// Run a sample type query and return the raw response payload
    async fn query_sample_type(&self, query: &SampleTypeQuery) -> BridgeResult<Value>;
}

/// Arguments of the generic sample type query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleTypeQuery {
    /// Health store sample type identifier
    pub sample_name: String,
    /// Range start (inclusive)
    pub start_date: DateTime<Utc>,
    /// Range end (inclusive)
    pub end_date: DateTime<Utc>,
    /// Maximum samples to return, 0 for no limit
    pub limit: u32,
    /// Step count to record, present only on point writes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u64>,
}

impl SampleTypeQuery {
    /// Point call at the sample's timestamp carrying its step count
    #[must_use]
    pub fn point_write(sample_type: &str, sample: &ActivitySample) -> Self {
        Self {
            sample_name: sample_type.to_owned(),
            start_date: sample.timestamp(),
            end_date: sample.timestamp(),
            limit: query_limits::POINT_WRITE,
            quantity: Some(sample.count()),
        }
    }

    /// Unbounded range read over the query's interval
    #[must_use]
    pub fn range(sample_type: &str, query: &AggregateQuery) -> Self {
        Self {
            sample_name: sample_type.to_owned(),
            start_date: query.start(),
            end_date: query.end(),
            limit: query_limits::UNBOUNDED,
            quantity: None,
        }
    }

    /// The query's interval, `None` when the end precedes the start
    #[must_use]
    pub fn window(&self) -> Option<AggregateQuery> {
        AggregateQuery::new(self.start_date, self.end_date).ok()
    }

    /// Whether the query asks for every matching sample
    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.limit == query_limits::UNBOUNDED
    }

    /// Whether the query records a sample
    #[must_use]
    pub const fn is_write(&self) -> bool {
        self.quantity.is_some()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use stepsync_core::constants::sample_types::STEP_COUNT;

    #[test]
    fn test_point_write_targets_single_instant() {
        let at = Utc.with_ymd_and_hms(2025, 6, 1, 8, 30, 0).single().unwrap();
        let query = SampleTypeQuery::point_write(STEP_COUNT, &ActivitySample::new(500, at));

        assert_eq!(query.start_date, at);
        assert_eq!(query.end_date, at);
        assert_eq!(query.limit, 1);
        assert_eq!(query.quantity, Some(500));
        assert!(query.is_write());
        assert!(!query.is_unbounded());
    }

    #[test]
    fn test_range_query_is_unbounded_read() {
        let start = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).single().unwrap();
        let end = Utc.with_ymd_and_hms(2025, 6, 1, 23, 0, 0).single().unwrap();
        let query = SampleTypeQuery::range(STEP_COUNT, &AggregateQuery::new(start, end).unwrap());

        assert!(query.is_unbounded());
        assert!(!query.is_write());
        assert_eq!(query.sample_name, STEP_COUNT);
    }

    #[test]
    fn test_query_serializes_with_bridge_field_names() {
        let at = Utc.with_ymd_and_hms(2025, 6, 1, 8, 30, 0).single().unwrap();
        let json = serde_json::to_value(SampleTypeQuery::range(STEP_COUNT, &AggregateQuery::at(at)))
            .unwrap();

        assert_eq!(json["sampleName"], STEP_COUNT);
        assert_eq!(json["limit"], 0);
        assert!(json.get("startDate").is_some());
        assert!(json.get("quantity").is_none());
    }
}
