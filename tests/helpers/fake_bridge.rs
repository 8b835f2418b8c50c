// ABOUTME: Fake bridge loaders and health bridges for gateway integration tests
// ABOUTME: Counts load invocations, fails calls on demand, and returns canned payloads
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use stepsync::bridge::{operations, BridgeLoader, HealthBridge, SampleTypeQuery};
use stepsync::errors::{BridgeError, BridgeResult};
use stepsync::models::AuthorizationRequest;
use tokio::time::sleep;

/// Loader that counts invocations and takes a while to finish
pub struct CountingLoader {
    calls: AtomicUsize,
    delay: Duration,
    bridge: Option<Arc<dyn HealthBridge>>,
}

impl CountingLoader {
    /// Loader that yields `bridge` after `delay`
    pub fn succeeding(bridge: Arc<dyn HealthBridge>, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            delay,
            bridge: Some(bridge),
        })
    }

    /// Loader that fails after `delay`
    pub fn failing(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            delay,
            bridge: None,
        })
    }

    /// Number of times `load` has been invoked
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BridgeLoader for CountingLoader {
    async fn load(&self) -> BridgeResult<Arc<dyn HealthBridge>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        sleep(self.delay).await;
        self.bridge.clone().ok_or_else(|| BridgeError::IncompatibleVersion {
            expected: "1".to_owned(),
            found: "0".to_owned(),
        })
    }
}

/// Bridge whose every call is rejected
#[derive(Default)]
pub struct FailingBridge {
    calls: AtomicUsize,
}

impl FailingBridge {
    /// Number of calls received
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HealthBridge for FailingBridge {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn request_authorization(&self, _request: &AuthorizationRequest) -> BridgeResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(BridgeError::call_failed(
            operations::REQUEST_AUTHORIZATION,
            "user dismissed the permission sheet",
        ))
    }

    async fn query_sample_type(&self, _query: &SampleTypeQuery) -> BridgeResult<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(BridgeError::call_failed(
            operations::QUERY_SAMPLE_TYPE,
            "health store unavailable",
        ))
    }
}

/// Bridge answering every query with the same payload
pub struct PayloadBridge {
    payload: Value,
    queries: Mutex<Vec<SampleTypeQuery>>,
}

impl PayloadBridge {
    /// Bridge returning `payload`
    pub fn new(payload: Value) -> Self {
        Self {
            payload,
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Queries received so far
    pub fn queries(&self) -> Vec<SampleTypeQuery> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl HealthBridge for PayloadBridge {
    fn name(&self) -> &'static str {
        "payload"
    }

    async fn request_authorization(&self, _request: &AuthorizationRequest) -> BridgeResult<()> {
        Ok(())
    }

    async fn query_sample_type(&self, query: &SampleTypeQuery) -> BridgeResult<Value> {
        self.queries.lock().unwrap().push(query.clone());
        Ok(self.payload.clone())
    }
}
