// ABOUTME: Step commands for stepsync-cli
// ABOUTME: Handles authorize, add, total, today, and demo operations against the gateway
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::Result;
use chrono::{DateTime, Utc};
use stepsync::models::{ActivitySample, AggregateQuery};
use stepsync::HealthGateway;
use tracing::info;

use crate::helpers::display::{display_authorization, display_reading, display_write};

/// Request authorization
pub async fn authorize(gateway: &HealthGateway) -> bool {
    let granted = gateway.authorize().await;
    display_authorization(granted, gateway.authorization_state());
    granted
}

/// Record one sample; zero steps are rejected before reaching the gateway
pub async fn add(gateway: &HealthGateway, steps: u64, at: DateTime<Utc>) -> Result<bool> {
    let sample = ActivitySample::non_empty(steps, at)?;
    let written = gateway.write_sample(sample).await;
    display_write(&sample, written);
    Ok(written)
}

/// Total steps over `[start, end]`
pub async fn total(
    gateway: &HealthGateway,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<bool> {
    let query = AggregateQuery::new(start, end)?;
    let reading = gateway.read_steps(query).await;
    display_reading(&query, &reading);
    Ok(!reading.is_failure())
}

/// Total steps for the current UTC day
pub async fn today(gateway: &HealthGateway) -> bool {
    let query = AggregateQuery::for_day(Utc::now().date_naive());
    let reading = gateway.read_steps(query).await;
    display_reading(&query, &reading);
    !reading.is_failure()
}

/// Authorize, write one sample, and read it back at the same instant
pub async fn demo(gateway: &HealthGateway, steps: u64) -> Result<bool> {
    info!(steps, "Running gateway demo");

    let authorized = authorize(gateway).await;
    let now = Utc::now();
    let written = add(gateway, steps, now).await?;

    let query = AggregateQuery::at(now);
    let reading = gateway.read_steps(query).await;
    display_reading(&query, &reading);

    Ok(authorized && written && !reading.is_failure())
}
