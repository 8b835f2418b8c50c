// ABOUTME: Capability detection deciding whether the native health store is reachable
// ABOUTME: Synchronous, side-effect free predicates evaluated on every gateway call
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Capability Detection
//!
//! The health store is only reachable from a native mobile shell running on
//! iOS. Detection is cheap, so the gateway asks again on every operation instead
//! of caching an answer.

use stepsync_core::models::RuntimeEnvironment;

use crate::config::environment::runtime_environment;

/// Answers "is the privileged health store reachable from here?"
///
/// Implementations must be synchronous and free of side effects. Missing
/// information is reported as `false`.
pub trait CapabilityDetector: Send + Sync {
    /// Whether the native health store can be reached in this runtime
    fn is_capable(&self) -> bool;
}

/// Detector that inspects the process environment on every call
///
/// Reads `STEPSYNC_PLATFORM` and `STEPSYNC_SHELL`, falling back to the
/// compilation target when they are unset.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvironmentCapability;

impl CapabilityDetector for EnvironmentCapability {
    fn is_capable(&self) -> bool {
        runtime_environment().supports_health_store()
    }
}

/// Detector over an environment snapshot supplied by the host
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixedCapability {
    environment: RuntimeEnvironment,
}

impl FixedCapability {
    /// Detector for a known runtime environment
    #[must_use]
    pub const fn new(environment: RuntimeEnvironment) -> Self {
        Self { environment }
    }

    /// Native iOS host, always capable
    #[must_use]
    pub const fn capable() -> Self {
        Self::new(RuntimeEnvironment::native_ios())
    }

    /// Host with no known platform, never capable
    #[must_use]
    pub const fn incapable() -> Self {
        Self::new(RuntimeEnvironment {
            platform: None,
            shell: None,
        })
    }

    /// Environment this detector answers for
    #[must_use]
    pub const fn environment(&self) -> RuntimeEnvironment {
        self.environment
    }
}

impl CapabilityDetector for FixedCapability {
    fn is_capable(&self) -> bool {
        self.environment.supports_health_store()
    }
}

impl<F> CapabilityDetector for F
where
    F: Fn() -> bool + Send + Sync,
{
    fn is_capable(&self) -> bool {
        self()
    }
}
