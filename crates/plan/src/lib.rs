// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! stagehand-plan: compiles a resolved lifecycle plus a task context into
//! the ordered action document a remote container scheduler carries out.
//!
//! Compilation is stateless: each call is a pure function of its inputs and
//! the already-assembled environment, so it can run concurrently without
//! coordination.

pub mod action;
pub mod config;
pub mod task;

pub use action::{
    serial, Action, ActionPlan, CachedDependency, DownloadAction, ResourceLimits, RunAction,
    CHECKSUM_ALGORITHM, LAUNCHER_PATH, LIFECYCLE_MOUNT,
};
pub use config::PlanConfig;
pub use task::{compile, task_log_source, PlanError, TaskRequest, LIFECYCLE_TYPE};
