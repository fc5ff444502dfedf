// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Compiler configuration.

/// Default file-server location for stack lifecycle bundles.
const DEFAULT_BUNDLE_BASE_URI: &str = "http://file-server.service.internal:8080/v1/static";
/// Default unprivileged user for container actions.
const DEFAULT_RUN_USER: &str = "vcap";

/// Static inputs shared by every compilation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanConfig {
    /// Base URI under which stack-specific lifecycle bundles are published.
    pub lifecycle_bundle_base_uri: String,
    /// User the download and run actions execute as.
    pub run_user: String,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            lifecycle_bundle_base_uri: DEFAULT_BUNDLE_BASE_URI.to_string(),
            run_user: DEFAULT_RUN_USER.to_string(),
        }
    }
}

impl PlanConfig {
    /// Resolve config from the environment:
    /// `STAGEHAND_BUNDLE_BASE_URI` and `STAGEHAND_RUN_USER`, with defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            lifecycle_bundle_base_uri: env_or("STAGEHAND_BUNDLE_BASE_URI")
                .unwrap_or(defaults.lifecycle_bundle_base_uri),
            run_user: env_or("STAGEHAND_RUN_USER").unwrap_or(defaults.run_user),
        }
    }
}

fn env_or(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}
