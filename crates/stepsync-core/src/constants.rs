// ABOUTME: Application constants for the health data gateway
// ABOUTME: Sample type identifiers, simulated step values, and environment variable names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Health store sample type identifiers
pub mod sample_types {
    /// Cumulative step count quantity type in the iOS health store
    pub const STEP_COUNT: &str = "HKQuantityTypeIdentifierStepCount";
}

/// Values returned when the health store cannot be reached
pub mod simulated {
    /// Daily step count reported on platforms without a health store
    pub const BASELINE_STEPS: u64 = 8500;

    /// Lower bound (inclusive) of randomized steps when the bridge is missing
    pub const RANDOM_MIN_STEPS: u64 = 7000;

    /// Upper bound (inclusive) of randomized steps when the bridge is missing
    pub const RANDOM_MAX_STEPS: u64 = 12000;
}

/// Bridge query limits
pub mod query_limits {
    /// Limit used for point writes at a single timestamp
    pub const POINT_WRITE: u32 = 1;

    /// Limit meaning "return every matching sample"
    pub const UNBOUNDED: u32 = 0;
}

/// Service identification for structured logging
pub mod service_names {
    /// Service name reported in startup logs
    pub const STEPSYNC: &str = "stepsync";
}

/// Environment variable names
pub mod env_keys {
    /// Runtime operating system override (`ios`, `android`, `web`)
    pub const PLATFORM: &str = "STEPSYNC_PLATFORM";
    /// Runtime shell override (`native` or `web`)
    pub const SHELL: &str = "STEPSYNC_SHELL";
    /// Health store sample type identifier
    pub const SAMPLE_TYPE: &str = "STEPSYNC_SAMPLE_TYPE";
    /// Comma-separated read permissions requested during authorization
    pub const READ_PERMISSIONS: &str = "STEPSYNC_READ_PERMISSIONS";
    /// Comma-separated write permissions requested during authorization
    pub const WRITE_PERMISSIONS: &str = "STEPSYNC_WRITE_PERMISSIONS";
    /// Constant reported on incapable platforms
    pub const SIMULATED_BASELINE: &str = "STEPSYNC_SIMULATED_BASELINE";
    /// Lower bound of randomized simulated steps
    pub const SIMULATED_MIN: &str = "STEPSYNC_SIMULATED_MIN";
    /// Upper bound of randomized simulated steps
    pub const SIMULATED_MAX: &str = "STEPSYNC_SIMULATED_MAX";
    /// Optional seed for the simulated step generator
    pub const SIMULATION_SEED: &str = "STEPSYNC_SIMULATION_SEED";
    /// Bridge backend selected by the CLI (`none` or `memory`)
    pub const BRIDGE: &str = "STEPSYNC_BRIDGE";
}
