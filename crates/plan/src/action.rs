// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Remote scheduler action document types.
//!
//! Ordering is normative: a `Serial` composite's children execute strictly
//! in sequence, and the run step depends on files the download step
//! materializes. Exact wire serialization belongs to the scheduler's own
//! protocol; these types only fix field presence and order.

use serde::{Deserialize, Serialize};
use stagehand_core::EnvVar;

/// Fixed launcher path inside the mounted lifecycle bundle.
pub const LAUNCHER_PATH: &str = "/tmp/lifecycle/launcher";
/// Mount point for the cached lifecycle bundle.
pub const LIFECYCLE_MOUNT: &str = "/tmp/lifecycle";
/// Platform-standard digest for artifact downloads.
pub const CHECKSUM_ALGORITHM: &str = "sha1";

/// Fetch an artifact into the container before anything runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadAction {
    pub from: String,
    pub to: String,
    /// Empty for artifact downloads: they are never cache-shared across
    /// tasks.
    pub cache_key: String,
    pub user: String,
    pub checksum_algorithm: String,
    pub checksum_value: String,
}

/// Execute the launcher with the task's command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunAction {
    pub user: String,
    pub path: String,
    pub args: Vec<String>,
    pub log_source: String,
    pub resource_limits: ResourceLimits,
    pub env: Vec<EnvVar>,
}

/// Per-process resource limits; `Default` configures none.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLimits {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nofile: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nproc: Option<u64>,
}

/// An action tree. `Serial` children run strictly in order, never in
/// parallel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Download(DownloadAction),
    Run(RunAction),
    Serial(Vec<Action>),
}

impl Action {
    /// Flattened, in-order leaf steps of this action tree.
    pub fn steps(&self) -> Vec<&Action> {
        match self {
            Action::Serial(children) => children.iter().flat_map(|a| a.steps()).collect(),
            leaf => vec![leaf],
        }
    }
}

/// Wrap steps in an ordered composite.
pub fn serial(actions: Vec<Action>) -> Action {
    Action::Serial(actions)
}

/// A dependency the scheduler may reuse across tasks sharing a cache key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedDependency {
    pub from: String,
    pub to: String,
    pub cache_key: String,
}

/// The compiled, ordered document handed to the remote scheduler.
///
/// Produced fresh on every compilation call, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionPlan {
    pub action: Action,
    pub cached_dependencies: Vec<CachedDependency>,
    /// Preloaded rootfs selector for the task's stack.
    pub root_fs: String,
}

#[cfg(test)]
#[path = "action_tests.rs"]
mod tests;
