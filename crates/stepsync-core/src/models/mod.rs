// ABOUTME: Domain models for the health data gateway
// ABOUTME: Re-exports sample, authorization, and runtime platform types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Authorization state and requested access scopes
pub mod authorization;
/// Runtime platform and shell description
pub mod platform;
/// Activity samples and aggregate queries
pub mod sample;

pub use authorization::{AccessScopes, AuthorizationRequest, AuthorizationState};
pub use platform::{Platform, RuntimeEnvironment, ShellKind};
pub use sample::{ActivitySample, AggregateQuery};
