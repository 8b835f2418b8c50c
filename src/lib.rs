// ABOUTME: Main library entry point for the stepsync health data gateway
// ABOUTME: Capability-gated access to the platform step store with simulated fallbacks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Stepsync
//!
//! A data-access adapter for the platform health store. It requests
//! authorization, writes step samples, and reads aggregated step counts, while
//! tolerating platforms without the store, builds without the native bridge,
//! and failing bridge calls.
//!
//! ## Architecture
//!
//! - **Capability**: synchronous predicate over the runtime environment
//! - **Bridge**: the optional native module, loaded lazily and at most once
//! - **Gateway**: the caller-facing operations and their simulated fallbacks
//! - **Config**: environment-based settings
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use stepsync::bridge::NotInstalledLoader;
//! use stepsync::capability::EnvironmentCapability;
//! use stepsync::gateway::HealthGateway;
//! use stepsync::models::AggregateQuery;
//!
//! #[tokio::main]
//! async fn main() {
//!     let gateway = HealthGateway::new(
//!         Arc::new(EnvironmentCapability),
//!         Arc::new(NotInstalledLoader),
//!     );
//!
//!     gateway.authorize().await;
//!     let today = chrono::Utc::now().date_naive();
//!     let steps = gateway.read_aggregate(AggregateQuery::for_day(today)).await;
//!     println!("steps today: {steps}");
//! }
//! ```

/// Optional native health bridge: contract, loading, and payload narrowing
pub mod bridge;

/// Runtime capability detection
pub mod capability;

/// Environment configuration
pub mod config;

/// Caller-facing health gateway
pub mod gateway;

/// Logging configuration and setup
pub mod logging;

/// Simulated step values
pub mod simulation;

/// Re-export of core constants
pub use stepsync_core::constants;
/// Re-export of core error types
pub use stepsync_core::errors;
/// Re-export of core data models
pub use stepsync_core::models;

pub use gateway::{HealthGateway, ReadingSource, StepReading};
