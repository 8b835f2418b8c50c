// ABOUTME: Output formatting helpers for stepsync-cli
// ABOUTME: Provides consistent display functions for authorization, writes, and step readings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use stepsync::models::{ActivitySample, AggregateQuery, AuthorizationState};
use stepsync::{ReadingSource, StepReading};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Display the outcome of an authorization request
pub fn display_authorization(granted: bool, state: AuthorizationState) {
    if granted {
        println!("Authorization succeeded (state: {state})");
    } else {
        println!("Authorization failed (state: {state})");
    }
    if state == AuthorizationState::Denied {
        println!("  The health store is not available on this platform.");
    }
}

/// Display the outcome of a sample write
pub fn display_write(sample: &ActivitySample, written: bool) {
    let at = sample.timestamp().format(TIME_FORMAT);
    if written {
        println!("Recorded {} steps at {at}", sample.count());
    } else {
        println!("Failed to record {} steps at {at}", sample.count());
    }
}

/// Display a step reading with its provenance
pub fn display_reading(query: &AggregateQuery, reading: &StepReading) {
    println!(
        "Steps from {} to {}: {}",
        query.start().format(TIME_FORMAT),
        query.end().format(TIME_FORMAT),
        reading.steps
    );
    match reading.source {
        ReadingSource::Store => println!("  Source: health store"),
        ReadingSource::Simulated => println!("  Source: simulated (health store unavailable)"),
        ReadingSource::QueryFailed => println!("  Source: none, the health store query failed"),
    }
}
