// ABOUTME: Core types and constants for the stepsync health data gateway
// ABOUTME: Foundation crate with error handling, domain models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Stepsync Core
//!
//! Foundation crate providing shared types and constants for the stepsync
//! health data gateway. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Bridge, validation, and configuration error types
//! - **constants**: Sample type identifiers, simulated values, environment keys
//! - **models**: Activity samples, aggregate queries, authorization and platform types

/// Error types shared across the gateway
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (samples, queries, authorization, runtime platform)
pub mod models;
