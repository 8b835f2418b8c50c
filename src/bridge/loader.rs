// ABOUTME: Lazy, memoized, single-flight acquisition of the optional native health bridge
// ABOUTME: Tracks the Unloaded/Loading/Loaded/Failed lifecycle with a sticky failure state
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Bridge Loading
//!
//! The bridge module is optional: it may be absent from the build, or present
//! but unusable. [`BridgeHandle`] loads it at most once:
//!
//! - **Single-flight**: callers arriving while a load is in flight wait for
//!   that same attempt and see its outcome. A caller that gives up (timeout,
//!   `select!`) does not abandon the attempt.
//! - **Memoized**: the outcome, success or failure, is kept for the lifetime
//!   of the handle. A failed load is never retried.
//! - **Non-fatal**: load errors are logged at warn level and reported as an
//!   absent bridge.

use async_trait::async_trait;
use futures_util::future::{BoxFuture, FutureExt, Shared};
use std::fmt;
use std::sync::atomic::{AtomicU32, AtomicU8, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use stepsync_core::errors::{BridgeError, BridgeResult};
use tracing::{debug, info, warn};

use super::HealthBridge;

/// Produces the native bridge when asked
///
/// Called at most once per [`BridgeHandle`].
#[async_trait]
pub trait BridgeLoader: Send + Sync {
    /// Locate and initialize the bridge
    async fn load(&self) -> BridgeResult<Arc<dyn HealthBridge>>;
}

/// Loader for builds without a native bridge
#[derive(Debug, Clone, Copy, Default)]
pub struct NotInstalledLoader;

#[async_trait]
impl BridgeLoader for NotInstalledLoader {
    async fn load(&self) -> BridgeResult<Arc<dyn HealthBridge>> {
        Err(BridgeError::not_installed(
            "no native health bridge is linked into this build",
        ))
    }
}

/// Loader handing out a bridge the host already constructed
pub struct PreloadedBridge {
    bridge: Arc<dyn HealthBridge>,
}

impl PreloadedBridge {
    /// Wrap an existing bridge
    #[must_use]
    pub fn new(bridge: Arc<dyn HealthBridge>) -> Self {
        Self { bridge }
    }
}

#[async_trait]
impl BridgeLoader for PreloadedBridge {
    async fn load(&self) -> BridgeResult<Arc<dyn HealthBridge>> {
        Ok(Arc::clone(&self.bridge))
    }
}

/// Lifecycle of the bridge owned by a [`BridgeHandle`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeLoadState {
    /// No load has been attempted
    Unloaded,
    /// A load is in flight
    Loading,
    /// The bridge is available
    Loaded,
    /// Loading failed; the bridge is absent for good
    Failed,
}

impl BridgeLoadState {
    /// Convert from atomic u8 representation
    const fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Unloaded,
            1 => Self::Loading,
            2 => Self::Loaded,
            _ => Self::Failed,
        }
    }

    /// Convert to atomic u8 representation
    const fn to_u8(self) -> u8 {
        match self {
            Self::Unloaded => 0,
            Self::Loading => 1,
            Self::Loaded => 2,
            Self::Failed => 3,
        }
    }

    /// Whether a load attempt has finished
    #[must_use]
    pub const fn is_settled(self) -> bool {
        matches!(self, Self::Loaded | Self::Failed)
    }
}

impl fmt::Display for BridgeLoadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unloaded => write!(f, "unloaded"),
            Self::Loading => write!(f, "loading"),
            Self::Loaded => write!(f, "loaded"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Outcome shared by every caller of one load attempt
type LoadAttempt = Shared<BoxFuture<'static, Option<Arc<dyn HealthBridge>>>>;

/// Lifecycle counters updated by the load attempt
#[derive(Debug)]
struct LoadProgress {
    state: AtomicU8,
    attempts: AtomicU32,
}

impl LoadProgress {
    fn set_state(&self, state: BridgeLoadState) {
        self.state.store(state.to_u8(), Ordering::SeqCst);
    }
}

/// Memoized, single-flight reference to the optional bridge
///
/// The first caller of [`BridgeHandle::acquire`] creates one shared load
/// future; every caller, now or later, awaits a clone of it. The attempt
/// belongs to the handle rather than to any caller, so a caller dropped
/// mid-load leaves the attempt in place for the next one to finish.
pub struct BridgeHandle {
    loader: Arc<dyn BridgeLoader>,
    attempt: Mutex<Option<LoadAttempt>>,
    progress: Arc<LoadProgress>,
}

impl BridgeHandle {
    /// Create an unloaded handle around `loader`
    #[must_use]
    pub fn new(loader: Arc<dyn BridgeLoader>) -> Self {
        Self {
            loader,
            attempt: Mutex::new(None),
            progress: Arc::new(LoadProgress {
                state: AtomicU8::new(BridgeLoadState::Unloaded.to_u8()),
                attempts: AtomicU32::new(0),
            }),
        }
    }

    /// Current lifecycle state
    #[must_use]
    pub fn state(&self) -> BridgeLoadState {
        BridgeLoadState::from_u8(self.progress.state.load(Ordering::SeqCst))
    }

    /// How many times the underlying loader has been invoked
    #[must_use]
    pub fn load_attempts(&self) -> u32 {
        self.progress.attempts.load(Ordering::SeqCst)
    }

    /// Get the bridge, loading it on first use
    ///
    /// Returns `None` when loading failed, now or on an earlier call.
    pub async fn acquire(&self) -> Option<Arc<dyn HealthBridge>> {
        let attempt = {
            // The slot only ever goes from None to Some, so a poisoned lock is still consistent
            let mut slot = self.attempt.lock().unwrap_or_else(PoisonError::into_inner);
            slot.get_or_insert_with(|| self.start_attempt()).clone()
        };
        attempt.await
    }

    fn start_attempt(&self) -> LoadAttempt {
        load_once(Arc::clone(&self.loader), Arc::clone(&self.progress))
            .boxed()
            .shared()
    }
}

async fn load_once(
    loader: Arc<dyn BridgeLoader>,
    progress: Arc<LoadProgress>,
) -> Option<Arc<dyn HealthBridge>> {
    progress.set_state(BridgeLoadState::Loading);
    let attempt = progress.attempts.fetch_add(1, Ordering::SeqCst) + 1;
    debug!(bridge.attempt = attempt, "Loading native health bridge");

    match loader.load().await {
        Ok(bridge) => {
            progress.set_state(BridgeLoadState::Loaded);
            info!(bridge.name = bridge.name(), "Native health bridge loaded");
            Some(bridge)
        }
        Err(error) => {
            progress.set_state(BridgeLoadState::Failed);
            warn!(
                error = %error,
                "Health bridge not available, continuing in simulated mode"
            );
            None
        }
    }
}

impl fmt::Debug for BridgeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BridgeHandle")
            .field("state", &self.state())
            .field("attempts", &self.load_attempts())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::InMemoryHealthStore;

    #[tokio::test]
    async fn test_not_installed_loader_fails_once_and_sticks() {
        let handle = BridgeHandle::new(Arc::new(NotInstalledLoader));
        assert_eq!(handle.state(), BridgeLoadState::Unloaded);

        assert!(handle.acquire().await.is_none());
        assert!(handle.acquire().await.is_none());

        assert_eq!(handle.state(), BridgeLoadState::Failed);
        assert_eq!(handle.load_attempts(), 1);
    }

    #[tokio::test]
    async fn test_preloaded_bridge_is_returned() {
        let store = Arc::new(InMemoryHealthStore::new());
        let handle = BridgeHandle::new(Arc::new(PreloadedBridge::new(store)));

        let bridge = handle.acquire().await;
        assert_eq!(bridge.map(|b| b.name()), Some("memory"));
        assert_eq!(handle.state(), BridgeLoadState::Loaded);
        assert!(handle.state().is_settled());
    }

    #[test]
    fn test_state_u8_mapping() {
        for state in [
            BridgeLoadState::Unloaded,
            BridgeLoadState::Loading,
            BridgeLoadState::Loaded,
            BridgeLoadState::Failed,
        ] {
            assert_eq!(BridgeLoadState::from_u8(state.to_u8()), state);
        }
        assert!(!BridgeLoadState::Loading.is_settled());
    }
}
