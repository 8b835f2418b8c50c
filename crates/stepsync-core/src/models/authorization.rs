// ABOUTME: Authorization state machine and access scope types for the health store
// ABOUTME: Builds the permission request payload sent to the native bridge
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of the authorization flow for this process
///
/// The state only moves forward: it starts at `NotRequested` and is set once by
/// the gateway's authorize operation. There is no revoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorizationState {
    /// Authorization has not been requested yet
    #[default]
    NotRequested,
    /// The health store granted access
    Granted,
    /// The platform cannot offer the health store
    Denied,
    /// The bridge is unavailable, so permissions are vacuously granted
    Simulated,
}

impl AuthorizationState {
    /// Convert from atomic u8 representation
    #[must_use]
    pub const fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::Granted,
            2 => Self::Denied,
            3 => Self::Simulated,
            _ => Self::NotRequested,
        }
    }

    /// Convert to atomic u8 representation
    #[must_use]
    pub const fn to_u8(self) -> u8 {
        match self {
            Self::NotRequested => 0,
            Self::Granted => 1,
            Self::Denied => 2,
            Self::Simulated => 3,
        }
    }

    /// Whether the state has been settled
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::NotRequested)
    }
}

impl fmt::Display for AuthorizationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotRequested => write!(f, "not_requested"),
            Self::Granted => write!(f, "granted"),
            Self::Denied => write!(f, "denied"),
            Self::Simulated => write!(f, "simulated"),
        }
    }
}

bitflags::bitflags! {
    /// Access requested on a sample type
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct AccessScopes: u8 {
        /// Read samples from the health store
        const READ = 0b0000_0001;
        /// Write samples to the health store
        const WRITE = 0b0000_0010;
    }
}

impl AccessScopes {
    /// Read and write access, the scope the step gateway requests
    #[must_use]
    pub const fn read_write() -> Self {
        Self::READ.union(Self::WRITE)
    }
}

/// Permission request handed to the native bridge
///
/// Mirrors the payload the health store plugin expects: every type that should
/// appear in the permission sheet, plus the read and write subsets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationRequest {
    /// Every sample type named in the request
    pub all: Vec<String>,
    /// Sample types requested for reading
    pub read: Vec<String>,
    /// Sample types requested for writing
    pub write: Vec<String>,
}

impl AuthorizationRequest {
    /// Request `scopes` on a single sample type
    #[must_use]
    pub fn for_sample_type(sample_type: &str, scopes: AccessScopes) -> Self {
        let granted = |flag: AccessScopes| {
            if scopes.contains(flag) {
                vec![sample_type.to_owned()]
            } else {
                Vec::new()
            }
        };

        Self {
            all: vec![sample_type.to_owned()],
            read: granted(AccessScopes::READ),
            write: granted(AccessScopes::WRITE),
        }
    }

    /// Request explicit read and write permission lists
    ///
    /// `all` is the de-duplicated union of both lists, preserving first-seen order.
    #[must_use]
    pub fn from_permissions(read: Vec<String>, write: Vec<String>) -> Self {
        let mut all: Vec<String> = Vec::with_capacity(read.len() + write.len());
        for permission in read.iter().chain(write.iter()) {
            if !all.contains(permission) {
                all.push(permission.clone());
            }
        }
        Self { all, read, write }
    }

    /// Scopes this request asks for on `sample_type`
    #[must_use]
    pub fn scopes_for(&self, sample_type: &str) -> AccessScopes {
        let mut scopes = AccessScopes::empty();
        if self.read.iter().any(|t| t == sample_type) {
            scopes |= AccessScopes::READ;
        }
        if self.write.iter().any(|t| t == sample_type) {
            scopes |= AccessScopes::WRITE;
        }
        scopes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::sample_types::STEP_COUNT;

    #[test]
    fn test_state_u8_round_trip_is_total() {
        for state in [
            AuthorizationState::NotRequested,
            AuthorizationState::Granted,
            AuthorizationState::Denied,
            AuthorizationState::Simulated,
        ] {
            assert_eq!(AuthorizationState::from_u8(state.to_u8()), state);
        }
        assert_eq!(
            AuthorizationState::from_u8(200),
            AuthorizationState::NotRequested
        );
    }

    #[test]
    fn test_read_write_request_names_type_in_every_list() {
        let request = AuthorizationRequest::for_sample_type(STEP_COUNT, AccessScopes::read_write());
        assert_eq!(request.all, vec![STEP_COUNT.to_owned()]);
        assert_eq!(request.read, vec![STEP_COUNT.to_owned()]);
        assert_eq!(request.write, vec![STEP_COUNT.to_owned()]);
        assert_eq!(request.scopes_for(STEP_COUNT), AccessScopes::read_write());
    }

    #[test]
    fn test_read_only_request_leaves_write_empty() {
        let request = AuthorizationRequest::for_sample_type(STEP_COUNT, AccessScopes::READ);
        assert!(request.write.is_empty());
        assert_eq!(request.scopes_for(STEP_COUNT), AccessScopes::READ);
    }

    #[test]
    fn test_permission_union_is_deduplicated() {
        let request = AuthorizationRequest::from_permissions(
            vec!["steps".to_owned(), "distance".to_owned()],
            vec!["steps".to_owned()],
        );
        assert_eq!(request.all, vec!["steps".to_owned(), "distance".to_owned()]);
        assert_eq!(request.scopes_for("distance"), AccessScopes::READ);
    }
}
