// ABOUTME: In-memory health store implementing the native bridge contract
// ABOUTME: Records writes and answers range queries for development and round-trip tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

// RwLock poisoning errors are converted to BridgeError::StorePoisoned
// for proper error propagation through the gateway

//! # In-Memory Health Store
//!
//! Stands in for the platform health store when no native bridge exists:
//!
//! - Point queries carrying a quantity store a sample
//! - Range queries return every stored sample in `[start, end]`
//! - Responses use the same `resultData` shape a native bridge produces
//!
//! All data access is protected by `RwLock`, so one store can back several
//! gateways or concurrent requests.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{json, Value};
use std::sync::{Arc, RwLock};
use stepsync_core::errors::{BridgeError, BridgeResult};
use stepsync_core::models::AuthorizationRequest;

use super::{HealthBridge, SampleTypeQuery};

/// Name reported by this bridge
const MEMORY_BRIDGE: &str = "memory";

/// A sample recorded by the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredSample {
    /// Sample type identifier
    pub sample_type: String,
    /// Recorded quantity
    pub quantity: u64,
    /// Instant of the sample
    pub timestamp: DateTime<Utc>,
}

impl StoredSample {
    fn to_payload(&self) -> Value {
        let instant = self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true);
        json!({
            "sampleName": self.sample_type,
            "value": self.quantity,
            "unitName": "count",
            "startDate": instant,
            "endDate": instant,
        })
    }
}

/// Health store kept in process memory
#[derive(Debug, Default)]
pub struct InMemoryHealthStore {
    /// Samples written through point queries
    samples: Arc<RwLock<Vec<StoredSample>>>,
    /// Every authorization request received
    authorizations: Arc<RwLock<Vec<AuthorizationRequest>>>,
}

impl InMemoryHealthStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-loaded with samples
    #[must_use]
    pub fn with_samples(samples: Vec<StoredSample>) -> Self {
        Self {
            samples: Arc::new(RwLock::new(samples)),
            authorizations: Arc::default(),
        }
    }

    /// Number of samples currently stored
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::StorePoisoned` if the internal `RwLock` is poisoned.
    pub fn sample_count(&self) -> BridgeResult<usize> {
        Ok(self
            .samples
            .read()
            .map_err(|_| poisoned("samples"))?
            .len())
    }

    /// Authorization requests received so far
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::StorePoisoned` if the internal `RwLock` is poisoned.
    pub fn authorization_requests(&self) -> BridgeResult<Vec<AuthorizationRequest>> {
        Ok(self
            .authorizations
            .read()
            .map_err(|_| poisoned("authorizations"))?
            .clone())
    }

    fn record(&self, query: &SampleTypeQuery, quantity: u64) -> BridgeResult<Value> {
        let sample = StoredSample {
            sample_type: query.sample_name.clone(),
            quantity,
            timestamp: query.start_date,
        };
        let payload = json!({ "countReturn": 1, "resultData": [sample.to_payload()] });

        self.samples
            .write()
            .map_err(|_| poisoned("samples"))?
            .push(sample);

        Ok(payload)
    }

    fn select(&self, query: &SampleTypeQuery) -> BridgeResult<Value> {
        let samples = self.samples.read().map_err(|_| poisoned("samples"))?;
        let limit = if query.is_unbounded() {
            usize::MAX
        } else {
            query.limit as usize
        };

        // An inverted window matches nothing
        let window = query.window();
        let matching: Vec<Value> = samples
            .iter()
            .filter(|sample| {
                sample.sample_type == query.sample_name
                    && window.is_some_and(|range| range.contains(sample.timestamp))
            })
            .take(limit)
            .map(StoredSample::to_payload)
            .collect();
        drop(samples);

        let count = matching.len();
        Ok(json!({ "countReturn": count, "resultData": matching }))
    }
}

#[async_trait]
impl HealthBridge for InMemoryHealthStore {
    fn name(&self) -> &'static str {
        MEMORY_BRIDGE
    }

    async fn request_authorization(&self, request: &AuthorizationRequest) -> BridgeResult<()> {
        self.authorizations
            .write()
            .map_err(|_| poisoned("authorizations"))?
            .push(request.clone());
        Ok(())
    }

    async fn query_sample_type(&self, query: &SampleTypeQuery) -> BridgeResult<Value> {
        match query.quantity {
            Some(quantity) => self.record(query, quantity),
            None => self.select(query),
        }
    }
}

fn poisoned(lock: &str) -> BridgeError {
    BridgeError::StorePoisoned {
        lock: lock.to_owned(),
    }
}
