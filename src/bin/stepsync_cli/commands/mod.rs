// ABOUTME: Re-exports command modules for stepsync-cli
// ABOUTME: Provides access to authorization and step sample commands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod steps;

pub use steps::{add, authorize, demo, today, total};
