// ABOUTME: Shared test helpers for integration tests
// ABOUTME: Exports instrumented loaders and fake health bridges
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

pub mod fake_bridge;
