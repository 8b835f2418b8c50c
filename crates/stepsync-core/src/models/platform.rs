// ABOUTME: Runtime platform and shell descriptions used for capability detection
// ABOUTME: Unknown values are kept as absent so detection treats them as incapable
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::env::consts;
use std::fmt;

/// Operating system the app is running on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Apple iOS, the only platform with the supported health store
    Ios,
    /// Google Android
    Android,
    /// Plain browser, no native host
    Web,
}

impl Platform {
    /// Parse a platform name, case-insensitively
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "ios" | "iphoneos" => Some(Self::Ios),
            "android" => Some(Self::Android),
            "web" | "browser" => Some(Self::Web),
            _ => None,
        }
    }

    /// Platform of the compilation target, if it is one we know
    #[must_use]
    pub fn compiled() -> Option<Self> {
        Self::parse(consts::OS)
    }

    /// Whether this platform hosts the health store the bridge talks to
    #[must_use]
    pub const fn has_health_store(self) -> bool {
        matches!(self, Self::Ios)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ios => write!(f, "ios"),
            Self::Android => write!(f, "android"),
            Self::Web => write!(f, "web"),
        }
    }
}

/// Kind of host the code runs inside
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShellKind {
    /// Native mobile shell with plugin access
    Native,
    /// Web view or browser context without native plugins
    Web,
}

impl ShellKind {
    /// Parse a shell name, case-insensitively
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "native" => Some(Self::Native),
            "web" | "browser" => Some(Self::Web),
            _ => None,
        }
    }

    /// Default shell for a platform when nothing else is known
    #[must_use]
    pub const fn default_for(platform: Option<Platform>) -> Option<Self> {
        match platform {
            Some(Platform::Ios | Platform::Android) => Some(Self::Native),
            Some(Platform::Web) => Some(Self::Web),
            None => None,
        }
    }
}

/// Snapshot of what is known about the runtime host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RuntimeEnvironment {
    /// Operating system, absent when unknown
    pub platform: Option<Platform>,
    /// Host shell, absent when unknown
    pub shell: Option<ShellKind>,
}

impl RuntimeEnvironment {
    /// Describe a known platform and shell
    #[must_use]
    pub const fn new(platform: Platform, shell: ShellKind) -> Self {
        Self {
            platform: Some(platform),
            shell: Some(shell),
        }
    }

    /// Native iOS shell, the one environment where the health store is reachable
    #[must_use]
    pub const fn native_ios() -> Self {
        Self::new(Platform::Ios, ShellKind::Native)
    }

    /// Environment implied by the compilation target alone
    #[must_use]
    pub fn compiled() -> Self {
        let platform = Platform::compiled();
        Self {
            platform,
            shell: ShellKind::default_for(platform),
        }
    }

    /// Whether the health store can in principle be reached from here
    ///
    /// Requires both a native shell and the health store platform. Missing
    /// information counts as "no".
    #[must_use]
    pub const fn supports_health_store(&self) -> bool {
        matches!(self.shell, Some(ShellKind::Native))
            && matches!(self.platform, Some(platform) if platform.has_health_store())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_native_ios_is_capable() {
        assert!(RuntimeEnvironment::native_ios().supports_health_store());
        assert!(!RuntimeEnvironment::new(Platform::Ios, ShellKind::Web).supports_health_store());
        assert!(
            !RuntimeEnvironment::new(Platform::Android, ShellKind::Native).supports_health_store()
        );
        assert!(!RuntimeEnvironment::new(Platform::Web, ShellKind::Web).supports_health_store());
    }

    #[test]
    fn test_missing_information_is_incapable() {
        assert!(!RuntimeEnvironment::default().supports_health_store());
        let no_shell = RuntimeEnvironment {
            platform: Some(Platform::Ios),
            shell: None,
        };
        assert!(!no_shell.supports_health_store());
    }

    #[test]
    fn test_parsing_is_case_insensitive() {
        assert_eq!(Platform::parse(" iOS "), Some(Platform::Ios));
        assert_eq!(Platform::parse("ANDROID"), Some(Platform::Android));
        assert_eq!(Platform::parse("linux"), None);
        assert_eq!(ShellKind::parse("Native"), Some(ShellKind::Native));
        assert_eq!(ShellKind::parse("webview"), None);
    }

    #[test]
    fn test_default_shell_follows_platform() {
        assert_eq!(
            ShellKind::default_for(Some(Platform::Ios)),
            Some(ShellKind::Native)
        );
        assert_eq!(
            ShellKind::default_for(Some(Platform::Web)),
            Some(ShellKind::Web)
        );
        assert_eq!(ShellKind::default_for(None), None);
    }
}
