// ABOUTME: Error types for the health data gateway
// ABOUTME: Re-exports bridge, validation, and configuration errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Error Types
//!
//! - `BridgeError` - failures loading or calling the native health bridge
//! - `ValidationError` - caller-supplied values that break a model invariant
//! - `ConfigError` - malformed environment configuration
//!
//! None of these reach callers of the gateway operations: the gateway converts
//! bridge failures into `false` / `0` results plus a log line.

/// Native bridge errors
pub mod bridge;
/// Configuration errors
pub mod config;
/// Model validation errors
pub mod validation;

pub use bridge::{BridgeError, BridgeResult};
pub use config::ConfigError;
pub use validation::ValidationError;
