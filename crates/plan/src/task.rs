// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Task action compilation.
//!
//! Turns a task context (stack, staged artifact, command, environment) into
//! the download-then-run action document plus the stack-qualified lifecycle
//! bundle dependency.

use stagehand_core::EnvVar;

use crate::action::{
    serial, Action, ActionPlan, CachedDependency, DownloadAction, ResourceLimits, RunAction,
    CHECKSUM_ALGORITHM, LAUNCHER_PATH, LIFECYCLE_MOUNT,
};
use crate::config::PlanConfig;

/// Lifecycle type tag qualifying bundle URIs and cache keys.
pub const LIFECYCLE_TYPE: &str = "buildpack";
/// Launcher argument selecting its app codepath.
const TASK_KIND: &str = "app";

/// Everything a single task compilation needs besides [`PlanConfig`].
///
/// `env` arrives fully assembled and ordered from the environment assembler;
/// the compiler never re-orders or deduplicates it.
#[derive(Debug, Clone, Default)]
pub struct TaskRequest {
    pub stack: String,
    pub droplet_uri: String,
    pub droplet_checksum: String,
    pub command: String,
    pub log_tag: String,
    pub env: Vec<EnvVar>,
}

/// Errors from task plan compilation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    /// A required input was absent; no steps were emitted.
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

/// Compile a task into its ordered action plan.
///
/// Either every required input is present and a complete plan comes back,
/// or compilation fails before any step is emitted.
pub fn compile(request: &TaskRequest, config: &PlanConfig) -> Result<ActionPlan, PlanError> {
    let stack = require(&request.stack, "stack")?;
    let droplet_uri = require(&request.droplet_uri, "droplet_uri")?;
    let checksum = require(&request.droplet_checksum, "droplet_checksum")?;
    let command = require(&request.command, "command")?;

    let download = DownloadAction {
        from: droplet_uri.to_string(),
        to: ".".to_string(),
        cache_key: String::new(),
        user: config.run_user.clone(),
        checksum_algorithm: CHECKSUM_ALGORITHM.to_string(),
        checksum_value: checksum.to_string(),
    };
    let run = RunAction {
        user: config.run_user.clone(),
        path: LAUNCHER_PATH.to_string(),
        // Third argument is the reserved start-command override slot
        args: vec![TASK_KIND.to_string(), command.to_string(), String::new()],
        log_source: request.log_tag.clone(),
        resource_limits: ResourceLimits::default(),
        env: request.env.clone(),
    };

    tracing::debug!(
        "task environment: {:?}",
        request.env.iter().map(|v| v.name.as_str()).collect::<Vec<_>>()
    );

    Ok(ActionPlan {
        action: serial(vec![Action::Download(download), Action::Run(run)]),
        cached_dependencies: vec![lifecycle_bundle(stack, config)],
        root_fs: format!("preloaded:{stack}"),
    })
}

fn require<'a>(value: &'a str, field: &'static str) -> Result<&'a str, PlanError> {
    if value.is_empty() {
        return Err(PlanError::MissingField(field));
    }
    Ok(value)
}

/// Stack-qualified cached dependency for the lifecycle bundle.
///
/// The cache key lets the scheduler reuse a previously fetched bundle
/// across tasks sharing the same stack.
fn lifecycle_bundle(stack: &str, config: &PlanConfig) -> CachedDependency {
    let base = config.lifecycle_bundle_base_uri.trim_end_matches('/');
    CachedDependency {
        from: format!("{base}/{LIFECYCLE_TYPE}/{stack}"),
        to: LIFECYCLE_MOUNT.to_string(),
        cache_key: format!("{LIFECYCLE_TYPE}-{stack}-lifecycle"),
    }
}

/// Log source for a task's output stream: `APP/TASK/<task name>`.
pub fn task_log_source(task_name: &str) -> String {
    format!("APP/TASK/{task_name}")
}

#[cfg(test)]
#[path = "task_tests.rs"]
mod tests;
