// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides quiet logging, fixed instants, and gateway construction helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]

use chrono::{DateTime, TimeZone, Utc};
use std::env;
use std::sync::{Arc, Once};
use stepsync::bridge::{BridgeLoader, HealthBridge, NotInstalledLoader, PreloadedBridge};
use stepsync::capability::FixedCapability;
use stepsync::simulation::Simulator;
use stepsync::HealthGateway;
use tracing::Level;

static INIT_LOGGER: Once = Once::new();

/// Seed used wherever a test needs reproducible simulated values
pub const TEST_SEED: u64 = 0x5EED;

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // TEST_LOG controls the level; tests stay quiet by default
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            _ => Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// Fixed instant on 2025-05-14
pub fn instant(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 5, 14, hour, minute, 0)
        .single()
        .unwrap()
}

/// Gateway on a platform without the health store
pub fn incapable_gateway() -> HealthGateway {
    init_test_logging();
    gateway_with_loader(FixedCapability::incapable(), Arc::new(NotInstalledLoader))
}

/// Capable gateway whose bridge is not installed
pub fn bridgeless_gateway() -> HealthGateway {
    init_test_logging();
    gateway_with_loader(FixedCapability::capable(), Arc::new(NotInstalledLoader))
}

/// Capable gateway backed by `bridge`
pub fn bridged_gateway(bridge: Arc<dyn HealthBridge>) -> HealthGateway {
    init_test_logging();
    gateway_with_loader(
        FixedCapability::capable(),
        Arc::new(PreloadedBridge::new(bridge)),
    )
}

/// Gateway with a seeded simulator
pub fn gateway_with_loader(
    capability: FixedCapability,
    loader: Arc<dyn BridgeLoader>,
) -> HealthGateway {
    HealthGateway::new(Arc::new(capability), loader).with_simulator(Simulator::seeded(TEST_SEED))
}
