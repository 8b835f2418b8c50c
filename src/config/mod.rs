// ABOUTME: Configuration module for the health gateway
// ABOUTME: Environment-only configuration with defaults for every setting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Environment variable parsing and gateway settings
pub mod environment;

pub use environment::{
    parse_permissions, runtime_environment, BridgeBackend, GatewayConfig, SimulationConfig,
};
