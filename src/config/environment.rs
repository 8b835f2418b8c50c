// ABOUTME: Environment configuration for the health gateway and its simulated mode
// ABOUTME: Parses runtime platform overrides, permissions, and simulation settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration
//!
//! Every setting has a default, so an empty environment yields a working
//! gateway. Values that are present but malformed are reported as
//! [`ConfigError`] rather than silently replaced.

use std::env;
use stepsync_core::constants::{env_keys, sample_types, simulated};
use stepsync_core::errors::ConfigError;
use stepsync_core::models::{
    AccessScopes, AuthorizationRequest, Platform, RuntimeEnvironment, ShellKind,
};
use tracing::info;

/// Describe the runtime host from `STEPSYNC_PLATFORM` / `STEPSYNC_SHELL`
///
/// Unset variables fall back to the compilation target. Variables holding an
/// unknown value yield an absent field, which capability detection treats as
/// incapable.
#[must_use]
pub fn runtime_environment() -> RuntimeEnvironment {
    let platform = env::var(env_keys::PLATFORM)
        .map_or_else(|_| Platform::compiled(), |value| Platform::parse(&value));
    let shell = env::var(env_keys::SHELL).map_or_else(
        |_| ShellKind::default_for(platform),
        |value| ShellKind::parse(&value),
    );

    RuntimeEnvironment { platform, shell }
}

/// Settings for simulated step values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Steps reported on platforms without the health store
    pub baseline_steps: u64,
    /// Lower bound (inclusive) of randomized steps when the bridge is absent
    pub min_steps: u64,
    /// Upper bound (inclusive) of randomized steps when the bridge is absent
    pub max_steps: u64,
    /// Seed for reproducible randomized steps
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            baseline_steps: simulated::BASELINE_STEPS,
            min_steps: simulated::RANDOM_MIN_STEPS,
            max_steps: simulated::RANDOM_MAX_STEPS,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Same settings with a fixed seed
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check the randomized range is not empty
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidRange` when `min_steps > max_steps`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_steps > self.max_steps {
            return Err(ConfigError::InvalidRange {
                min: self.min_steps,
                max: self.max_steps,
            });
        }
        Ok(())
    }
}

/// Bridge backend picked by the command-line tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BridgeBackend {
    /// No native bridge; loading fails and the gateway simulates
    #[default]
    None,
    /// In-memory health store for the lifetime of the process
    Memory,
}

impl BridgeBackend {
    /// Parse a backend name, case-insensitively
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "none" | "" => Some(Self::None),
            "memory" | "in-memory" => Some(Self::Memory),
            _ => None,
        }
    }

    /// Read `STEPSYNC_BRIDGE`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for an unknown backend name.
    pub fn from_env() -> Result<Self, ConfigError> {
        match env::var(env_keys::BRIDGE) {
            Err(_) => Ok(Self::default()),
            Ok(value) => Self::parse(&value).ok_or_else(|| {
                ConfigError::invalid_value(env_keys::BRIDGE, value, "expected 'none' or 'memory'")
            }),
        }
    }
}

/// Gateway configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Health store sample type the gateway reads and writes
    pub sample_type: String,
    /// Sample types requested for reading during authorization
    pub read_permissions: Vec<String>,
    /// Sample types requested for writing during authorization
    pub write_permissions: Vec<String>,
    /// Simulated mode settings
    pub simulation: SimulationConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self::for_sample_type(sample_types::STEP_COUNT, AccessScopes::read_write())
    }
}

impl GatewayConfig {
    /// Configuration requesting `scopes` on a single sample type
    #[must_use]
    pub fn for_sample_type(sample_type: &str, scopes: AccessScopes) -> Self {
        let request = AuthorizationRequest::for_sample_type(sample_type, scopes);
        Self {
            sample_type: sample_type.to_owned(),
            read_permissions: request.read,
            write_permissions: request.write,
            simulation: SimulationConfig::default(),
        }
    }

    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a numeric variable cannot be parsed or the
    /// simulated range is empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        let sample_type = env::var(env_keys::SAMPLE_TYPE)
            .ok()
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| sample_types::STEP_COUNT.to_owned());

        let read_permissions = permissions_or(env_keys::READ_PERMISSIONS, &sample_type);
        let write_permissions = permissions_or(env_keys::WRITE_PERMISSIONS, &sample_type);

        let simulation = SimulationConfig {
            baseline_steps: env_u64_or(env_keys::SIMULATED_BASELINE, simulated::BASELINE_STEPS)?,
            min_steps: env_u64_or(env_keys::SIMULATED_MIN, simulated::RANDOM_MIN_STEPS)?,
            max_steps: env_u64_or(env_keys::SIMULATED_MAX, simulated::RANDOM_MAX_STEPS)?,
            seed: env_u64_optional(env_keys::SIMULATION_SEED)?,
        };
        simulation.validate()?;

        let config = Self {
            sample_type,
            read_permissions,
            write_permissions,
            simulation,
        };

        info!(
            sample_type = %config.sample_type,
            simulated.baseline = config.simulation.baseline_steps,
            simulated.min = config.simulation.min_steps,
            simulated.max = config.simulation.max_steps,
            simulated.seeded = config.simulation.seed.is_some(),
            "Gateway configuration loaded"
        );

        Ok(config)
    }

    /// Permission request sent to the bridge during authorization
    #[must_use]
    pub fn authorization_request(&self) -> AuthorizationRequest {
        AuthorizationRequest::from_permissions(
            self.read_permissions.clone(),
            self.write_permissions.clone(),
        )
    }

    /// Access this configuration requests on its own sample type
    #[must_use]
    pub fn requested_scopes(&self) -> AccessScopes {
        self.authorization_request().scopes_for(&self.sample_type)
    }
}

/// Parse a comma-separated permission list
#[must_use]
pub fn parse_permissions(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
        .collect()
}

fn permissions_or(key: &str, sample_type: &str) -> Vec<String> {
    env::var(key)
        .ok()
        .map(|value| parse_permissions(&value))
        .filter(|permissions| !permissions.is_empty())
        .unwrap_or_else(|| vec![sample_type.to_owned()])
}

fn env_u64_or(key: &str, default: u64) -> Result<u64, ConfigError> {
    Ok(env_u64_optional(key)?.unwrap_or(default))
}

fn env_u64_optional(key: &str) -> Result<Option<u64>, ConfigError> {
    match env::var(key) {
        Err(_) => Ok(None),
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| ConfigError::invalid_value(key, value.clone(), format!("{e}"))),
    }
}
