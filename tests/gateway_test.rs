// ABOUTME: Integration tests for the health gateway decision ladder
// ABOUTME: Covers incapable platforms, missing bridges, present bridges, and failing bridge calls
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use common::{bridged_gateway, bridgeless_gateway, incapable_gateway, instant};
use helpers::fake_bridge::{FailingBridge, PayloadBridge};
use serde_json::json;
use std::sync::Arc;
use stepsync::bridge::{BridgeLoadState, InMemoryHealthStore};
use stepsync::models::{ActivitySample, AggregateQuery, AuthorizationState};
use stepsync::ReadingSource;

fn morning() -> AggregateQuery {
    AggregateQuery::new(instant(6, 0), instant(12, 0)).unwrap()
}

// ============================================================================
// Incapable platform
// ============================================================================

#[tokio::test]
async fn test_incapable_authorize_is_denied() {
    let gateway = incapable_gateway();

    assert!(!gateway.authorize().await);
    assert_eq!(gateway.authorization_state(), AuthorizationState::Denied);
}

#[tokio::test]
async fn test_incapable_write_succeeds_without_loading() {
    let gateway = incapable_gateway();

    for count in [0, 1, 500, 25_000] {
        assert!(gateway.write_sample(ActivitySample::new(count, instant(9, 0))).await);
    }
    assert_eq!(gateway.bridge_state(), BridgeLoadState::Unloaded);
    assert_eq!(gateway.load_attempts(), 0);
}

#[tokio::test]
async fn test_incapable_read_is_fixed_baseline() {
    let gateway = incapable_gateway();

    for _ in 0..20 {
        let steps = gateway.read_aggregate(morning()).await;
        assert!((steps - 8500.0).abs() < f64::EPSILON);
    }
    assert!(gateway.load_bridge().await.is_none());
    assert_eq!(gateway.load_attempts(), 0);
}

// ============================================================================
// Capable platform, bridge not installed
// ============================================================================

#[tokio::test]
async fn test_bridgeless_authorize_is_simulated() {
    let gateway = bridgeless_gateway();

    assert!(gateway.authorize().await);
    assert_eq!(gateway.authorization_state(), AuthorizationState::Simulated);
    assert!(gateway.authorization_state().is_terminal());
}

#[tokio::test]
async fn test_bridgeless_write_succeeds() {
    let gateway = bridgeless_gateway();

    assert!(gateway.write_sample(ActivitySample::new(750, instant(10, 30))).await);
    assert_eq!(gateway.bridge_state(), BridgeLoadState::Failed);
}

#[tokio::test]
async fn test_bridgeless_reads_are_random_in_range() {
    let gateway = bridgeless_gateway();

    let mut readings = Vec::new();
    for _ in 0..25 {
        let reading = gateway.read_steps(morning()).await;
        assert_eq!(reading.source, ReadingSource::Simulated);
        assert!((7000.0..=12000.0).contains(&reading.steps));
        readings.push(reading.steps);
    }

    let first = readings[0];
    assert!(readings.iter().any(|steps| (steps - first).abs() > f64::EPSILON));
}

// ============================================================================
// Capable platform, bridge present
// ============================================================================

#[tokio::test]
async fn test_present_bridge_grants_authorization() {
    let store = Arc::new(InMemoryHealthStore::new());
    let gateway = bridged_gateway(store.clone());

    assert!(gateway.authorize().await);
    assert_eq!(gateway.authorization_state(), AuthorizationState::Granted);

    let requests = store.authorization_requests().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].all, vec![gateway.sample_type().to_owned()]);
}

#[tokio::test]
async fn test_range_read_is_unbounded_over_query_interval() {
    let bridge = Arc::new(PayloadBridge::new(json!({ "resultData": [] })));
    let gateway = bridged_gateway(bridge.clone());

    let reading = gateway.read_steps(morning()).await;
    assert_eq!(reading.source, ReadingSource::Store);
    assert!(reading.steps.abs() < f64::EPSILON);

    let queries = bridge.queries();
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0].limit, 0);
    assert_eq!(queries[0].start_date, instant(6, 0));
    assert_eq!(queries[0].end_date, instant(12, 0));
    assert_eq!(queries[0].quantity, None);
}

#[tokio::test]
async fn test_point_write_uses_sample_instant() {
    let bridge = Arc::new(PayloadBridge::new(json!({ "countReturn": 1 })));
    let gateway = bridged_gateway(bridge.clone());

    assert!(gateway.write_sample(ActivitySample::new(321, instant(15, 45))).await);

    let queries = bridge.queries();
    assert_eq!(queries[0].limit, 1);
    assert_eq!(queries[0].start_date, instant(15, 45));
    assert_eq!(queries[0].end_date, instant(15, 45));
    assert_eq!(queries[0].quantity, Some(321));
}

// ============================================================================
// Bridge call failures
// ============================================================================

#[tokio::test]
async fn test_failed_authorization_keeps_state() {
    let bridge = Arc::new(FailingBridge::default());
    let gateway = bridged_gateway(bridge.clone());

    assert!(!gateway.authorize().await);
    assert_eq!(gateway.authorization_state(), AuthorizationState::NotRequested);
    assert_eq!(bridge.calls(), 1);
}

#[tokio::test]
async fn test_failed_write_returns_false() {
    let gateway = bridged_gateway(Arc::new(FailingBridge::default()));

    assert!(!gateway.write_sample(ActivitySample::new(10, instant(8, 0))).await);
}

#[tokio::test]
async fn test_failed_read_returns_zero() {
    let gateway = bridged_gateway(Arc::new(FailingBridge::default()));

    let steps = gateway.read_aggregate(morning()).await;
    assert!(steps.abs() < f64::EPSILON);

    let reading = gateway.read_steps(morning()).await;
    assert!(reading.is_failure());
    assert_eq!(reading.source, ReadingSource::QueryFailed);
}

#[tokio::test]
async fn test_malformed_payload_reads_as_failure() {
    let gateway = bridged_gateway(Arc::new(PayloadBridge::new(json!({ "resultData": 42 }))));

    let reading = gateway.read_steps(morning()).await;
    assert!(reading.is_failure());
    assert!(reading.steps.abs() < f64::EPSILON);
}
