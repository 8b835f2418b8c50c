// ABOUTME: Simulated step values used when the health store cannot be reached
// ABOUTME: Fixed baseline for incapable platforms and a seeded random range when the bridge is absent
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Simulated Mode
//!
//! - **Incapable platform**: a fixed daily baseline, so UI smoke tests see a
//!   stable number
//! - **Bridge absent**: a uniformly random count from an inclusive range, so
//!   repeated reads visibly change during manual testing
//!
//! The generator is `ChaCha8Rng`; supplying a seed makes the sequence
//! reproducible.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::fmt;
use std::ops::RangeInclusive;
use std::sync::{Mutex, PoisonError};
use stepsync_core::errors::ConfigError;

use crate::config::SimulationConfig;

/// Source of simulated step counts
pub struct Simulator {
    baseline_steps: u64,
    range: RangeInclusive<u64>,
    rng: Mutex<ChaCha8Rng>,
}

impl Simulator {
    /// Build a simulator from validated settings
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidRange` when the random range is empty.
    pub fn new(config: &SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid(*config))
    }

    /// Default values with a fixed seed
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::from_valid(SimulationConfig::default().with_seed(seed))
    }

    fn from_valid(config: SimulationConfig) -> Self {
        let rng = config
            .seed
            .map_or_else(ChaCha8Rng::from_entropy, ChaCha8Rng::seed_from_u64);
        Self {
            baseline_steps: config.baseline_steps,
            range: config.min_steps..=config.max_steps,
            rng: Mutex::new(rng),
        }
    }

    /// Steps reported on platforms without the health store
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn baseline_steps(&self) -> f64 {
        self.baseline_steps as f64
    }

    /// A fresh random step count from the configured range
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn random_steps(&self) -> f64 {
        // Generator state stays valid after a panic elsewhere, so recover it
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.gen_range(self.range.clone()) as f64
    }

    /// Inclusive range random steps are drawn from
    #[must_use]
    pub const fn range(&self) -> &RangeInclusive<u64> {
        &self.range
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::from_valid(SimulationConfig::default())
    }
}

impl fmt::Debug for Simulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulator")
            .field("baseline_steps", &self.baseline_steps)
            .field("range", &self.range)
            .finish_non_exhaustive()
    }
}
