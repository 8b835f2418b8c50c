// ABOUTME: Capability-gated gateway for authorizing, writing, and reading step samples
// ABOUTME: Delegates to the native bridge when present and degrades to simulated values otherwise
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Health Gateway
//!
//! Every operation walks the same ladder:
//!
//! 1. Platform not capable: simulate, without touching the bridge
//! 2. Capable, bridge absent: simulate and log what happened
//! 3. Capable, bridge present: delegate; a failed call is reported as
//!    `false` or `0` plus an error log
//!
//! None of the caller-facing operations return `Result`. Failures only
//! surface through return values and diagnostics.

use serde::Serialize;
use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use stepsync_core::errors::{BridgeResult, ConfigError};
use stepsync_core::models::{
    ActivitySample, AggregateQuery, AuthorizationRequest, AuthorizationState,
};
use tracing::{debug, error, info, instrument, warn};

use crate::bridge::{
    operations, BridgeHandle, BridgeLoadState, BridgeLoader, HealthBridge, SampleBatch,
    SampleTypeQuery,
};
use crate::capability::CapabilityDetector;
use crate::config::GatewayConfig;
use crate::simulation::Simulator;

/// Where a step reading came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingSource {
    /// Summed from samples returned by the health store
    Store,
    /// Produced by simulated mode
    Simulated,
    /// The store query failed; steps are reported as zero
    QueryFailed,
}

impl fmt::Display for ReadingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Store => write!(f, "store"),
            Self::Simulated => write!(f, "simulated"),
            Self::QueryFailed => write!(f, "query_failed"),
        }
    }
}

/// Aggregated steps together with their provenance
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StepReading {
    /// Total steps, never negative
    pub steps: f64,
    /// Where `steps` came from
    pub source: ReadingSource,
}

impl StepReading {
    const fn store(steps: f64) -> Self {
        Self {
            steps,
            source: ReadingSource::Store,
        }
    }

    const fn simulated(steps: f64) -> Self {
        Self {
            steps,
            source: ReadingSource::Simulated,
        }
    }

    const fn failed() -> Self {
        Self {
            steps: 0.0,
            source: ReadingSource::QueryFailed,
        }
    }

    /// Whether the reading stands in for a failed store query
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self.source, ReadingSource::QueryFailed)
    }
}

/// Uniform access to the platform health store
///
/// Owns the bridge handle and the authorization state. Construct one per
/// process and share it behind an `Arc`; tests build their own with fake
/// detectors and loaders.
pub struct HealthGateway {
    detector: Arc<dyn CapabilityDetector>,
    bridge: BridgeHandle,
    simulator: Simulator,
    authorization: AtomicU8,
    sample_type: String,
    authorization_request: AuthorizationRequest,
}

impl HealthGateway {
    /// Gateway for step counts with default simulation settings
    #[must_use]
    pub fn new(detector: Arc<dyn CapabilityDetector>, loader: Arc<dyn BridgeLoader>) -> Self {
        let config = GatewayConfig::default();
        Self {
            detector,
            bridge: BridgeHandle::new(loader),
            simulator: Simulator::default(),
            authorization: AtomicU8::new(AuthorizationState::NotRequested.to_u8()),
            authorization_request: config.authorization_request(),
            sample_type: config.sample_type,
        }
    }

    /// Gateway built from explicit configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidRange` when the simulated range is empty.
    pub fn from_config(
        config: &GatewayConfig,
        detector: Arc<dyn CapabilityDetector>,
        loader: Arc<dyn BridgeLoader>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            detector,
            bridge: BridgeHandle::new(loader),
            simulator: Simulator::new(&config.simulation)?,
            authorization: AtomicU8::new(AuthorizationState::NotRequested.to_u8()),
            authorization_request: config.authorization_request(),
            sample_type: config.sample_type.clone(),
        })
    }

    /// Replace the simulated value source
    #[must_use]
    pub fn with_simulator(mut self, simulator: Simulator) -> Self {
        self.simulator = simulator;
        self
    }

    /// Whether the health store is reachable right now
    #[must_use]
    pub fn is_capable(&self) -> bool {
        self.detector.is_capable()
    }

    /// Authorization outcome recorded so far
    #[must_use]
    pub fn authorization_state(&self) -> AuthorizationState {
        AuthorizationState::from_u8(self.authorization.load(Ordering::SeqCst))
    }

    /// Lifecycle state of the bridge handle
    #[must_use]
    pub fn bridge_state(&self) -> BridgeLoadState {
        self.bridge.state()
    }

    /// How many times the bridge loader has run
    #[must_use]
    pub fn load_attempts(&self) -> u32 {
        self.bridge.load_attempts()
    }

    /// Sample type this gateway reads and writes
    #[must_use]
    pub fn sample_type(&self) -> &str {
        &self.sample_type
    }

    /// Get the native bridge, loading it on first use
    ///
    /// Returns `None` without loading anything when the platform is not
    /// capable. Otherwise concurrent callers share one load attempt, and its
    /// outcome is reused for the rest of the gateway's lifetime.
    pub async fn load_bridge(&self) -> Option<Arc<dyn HealthBridge>> {
        if !self.is_capable() {
            debug!("Platform not capable, skipping health bridge load");
            return None;
        }
        self.bridge.acquire().await
    }

    /// Request read and write access to the sample type
    ///
    /// Returns `false` on platforms without the health store (state becomes
    /// `Denied`) and when the bridge rejects the request (state unchanged).
    #[instrument(skip(self), fields(sample_type = %self.sample_type))]
    pub async fn authorize(&self) -> bool {
        if !self.is_capable() {
            info!("Health store not available on this platform, authorization denied");
            self.record_authorization(AuthorizationState::Denied);
            return false;
        }

        let Some(bridge) = self.bridge.acquire().await else {
            info!("Simulated mode: authorization granted without a health bridge");
            self.record_authorization(AuthorizationState::Simulated);
            return true;
        };

        match bridge
            .request_authorization(&self.authorization_request)
            .await
        {
            Ok(()) => {
                info!(bridge.name = bridge.name(), "Health store authorization granted");
                self.record_authorization(AuthorizationState::Granted);
                true
            }
            Err(e) => {
                error!(
                    operation = operations::REQUEST_AUTHORIZATION,
                    error = %e,
                    "Health store authorization failed"
                );
                false
            }
        }
    }

    /// Record one step sample
    ///
    /// Succeeds trivially in simulated mode. Returns `false` only when a
    /// present bridge rejects the write.
    #[instrument(
        skip(self, sample),
        fields(sample.count = sample.count(), sample.timestamp = %sample.timestamp())
    )]
    pub async fn write_sample(&self, sample: ActivitySample) -> bool {
        if !self.is_capable() {
            debug!("Platform not capable, sample write skipped");
            return true;
        }

        let Some(bridge) = self.bridge.acquire().await else {
            info!(
                sample.count = sample.count(),
                sample.timestamp = %sample.timestamp(),
                "Simulated mode: would write step sample"
            );
            return true;
        };

        let query = SampleTypeQuery::point_write(&self.sample_type, &sample);
        match bridge.query_sample_type(&query).await {
            Ok(_) => {
                debug!("Step sample written");
                true
            }
            Err(e) => {
                error!(
                    operation = operations::QUERY_SAMPLE_TYPE,
                    error = %e,
                    "Failed to write step sample"
                );
                false
            }
        }
    }

    /// Total steps in the query range
    ///
    /// A failed store query reads as `0`, same as a range with no steps. Use
    /// [`HealthGateway::read_steps`] to tell them apart.
    pub async fn read_aggregate(&self, query: AggregateQuery) -> f64 {
        self.read_steps(query).await.steps
    }

    /// Total steps in the query range, with provenance
    #[instrument(
        skip(self, query),
        fields(query.start = %query.start(), query.end = %query.end())
    )]
    pub async fn read_steps(&self, query: AggregateQuery) -> StepReading {
        if !self.is_capable() {
            debug!("Platform not capable, returning baseline steps");
            return StepReading::simulated(self.simulator.baseline_steps());
        }

        let Some(bridge) = self.bridge.acquire().await else {
            let steps = self.simulator.random_steps();
            info!(steps, "Simulated mode: returning randomized step count");
            return StepReading::simulated(steps);
        };

        match self.query_total(&*bridge, &query).await {
            Ok(steps) => StepReading::store(steps),
            Err(e) => {
                error!(
                    operation = operations::QUERY_SAMPLE_TYPE,
                    error = %e,
                    "Failed to read step samples"
                );
                StepReading::failed()
            }
        }
    }

    async fn query_total(
        &self,
        bridge: &dyn HealthBridge,
        query: &AggregateQuery,
    ) -> BridgeResult<f64> {
        let request = SampleTypeQuery::range(&self.sample_type, query);
        let payload = bridge.query_sample_type(&request).await?;
        let batch = SampleBatch::from_payload(&payload)?;

        debug!(samples = batch.len(), "Step samples received");
        Ok(batch.total_steps())
    }

    /// Move out of `NotRequested`; later outcomes never overwrite the first
    fn record_authorization(&self, state: AuthorizationState) {
        let result = self.authorization.compare_exchange(
            AuthorizationState::NotRequested.to_u8(),
            state.to_u8(),
            Ordering::SeqCst,
            Ordering::SeqCst,
        );
        if let Err(current) = result {
            let current = AuthorizationState::from_u8(current);
            if current != state {
                warn!(
                    authorization.current = %current,
                    authorization.attempted = %state,
                    "Authorization state already settled, keeping existing state"
                );
            }
        }
    }
}

impl fmt::Debug for HealthGateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HealthGateway")
            .field("sample_type", &self.sample_type)
            .field("authorization", &self.authorization_state())
            .field("bridge", &self.bridge)
            .field("simulator", &self.simulator)
            .finish_non_exhaustive()
    }
}
