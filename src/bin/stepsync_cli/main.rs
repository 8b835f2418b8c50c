// ABOUTME: Stepsync CLI - command-line front end for the health gateway
// ABOUTME: Authorizes, writes step samples, and reads step totals through the gateway
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Request read/write access to step counts
//! stepsync-cli authorize
//!
//! # Record 1200 steps now, against the in-memory store
//! stepsync-cli --bridge memory add --steps 1200
//!
//! # Total steps over a range
//! stepsync-cli total --start 2025-06-01T00:00:00Z --end 2025-06-01T23:59:59Z
//!
//! # Today's steps
//! stepsync-cli today
//!
//! # Authorize, write, and read back in one process
//! stepsync-cli --bridge memory demo --steps 500
//! ```

mod commands;
mod helpers;

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::process::ExitCode;
use std::sync::Arc;
use stepsync::bridge::{BridgeLoader, InMemoryHealthStore, NotInstalledLoader, PreloadedBridge};
use stepsync::capability::{CapabilityDetector, EnvironmentCapability, FixedCapability};
use stepsync::config::{BridgeBackend, GatewayConfig};
use stepsync::logging::LoggingConfig;
use stepsync::models::RuntimeEnvironment;
use stepsync::HealthGateway;
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "stepsync-cli",
    about = "Stepsync health gateway CLI",
    long_about = "Request authorization, record step samples, and read step totals from the platform health store, with simulated values when the store is unavailable."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Bridge backend: none or memory (defaults to STEPSYNC_BRIDGE)
    #[arg(long, global = true, value_parser = parse_backend)]
    bridge: Option<BridgeBackend>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Request read and write access to step counts
    Authorize,

    /// Record a step sample
    Add {
        /// Number of steps (must be positive)
        #[arg(long)]
        steps: u64,

        /// Sample instant (RFC 3339), defaults to now
        #[arg(long)]
        at: Option<DateTime<Utc>>,
    },

    /// Total steps between two instants
    Total {
        /// Range start (RFC 3339)
        #[arg(long)]
        start: DateTime<Utc>,

        /// Range end (RFC 3339)
        #[arg(long)]
        end: DateTime<Utc>,
    },

    /// Total steps for the current UTC day
    Today,

    /// Authorize, write one sample, and read it back
    Demo {
        /// Steps to write
        #[arg(long, default_value = "500")]
        steps: u64,
    },
}

fn parse_backend(value: &str) -> Result<BridgeBackend, String> {
    BridgeBackend::parse(value).ok_or_else(|| format!("unknown bridge '{value}'"))
}

/// Detector and loader for the selected backend
///
/// The in-memory store stands in for a native iOS shell, so the gateway
/// treats it as capable regardless of the host platform.
fn wiring(backend: BridgeBackend) -> (Arc<dyn CapabilityDetector>, Arc<dyn BridgeLoader>) {
    match backend {
        BridgeBackend::None => (Arc::new(EnvironmentCapability), Arc::new(NotInstalledLoader)),
        BridgeBackend::Memory => (
            Arc::new(FixedCapability::new(RuntimeEnvironment::native_ios())),
            Arc::new(PreloadedBridge::new(Arc::new(InMemoryHealthStore::new()))),
        ),
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    LoggingConfig::for_cli(cli.verbose).init()?;

    let config = GatewayConfig::from_env()?;
    let backend = match cli.bridge {
        Some(backend) => backend,
        None => BridgeBackend::from_env()?,
    };
    debug!(?backend, sample_type = %config.sample_type, "Starting stepsync CLI");

    let (detector, loader) = wiring(backend);
    let gateway = HealthGateway::from_config(&config, detector, loader)?;

    let succeeded = match cli.command {
        Command::Authorize => commands::authorize(&gateway).await,
        Command::Add { steps, at } => {
            commands::add(&gateway, steps, at.unwrap_or_else(Utc::now)).await?
        }
        Command::Total { start, end } => commands::total(&gateway, start, end).await?,
        Command::Today => commands::today(&gateway).await,
        Command::Demo { steps } => commands::demo(&gateway, steps).await?,
    };

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
