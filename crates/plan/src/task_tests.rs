// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::action::{Action, ResourceLimits};
use crate::config::PlanConfig;
use stagehand_core::EnvVar;

fn full_request() -> TaskRequest {
    TaskRequest {
        stack: "cflinuxfs2".to_string(),
        droplet_uri: "http://blob/d".to_string(),
        droplet_checksum: "abc123".to_string(),
        command: "start-app".to_string(),
        log_tag: task_log_source("migrate"),
        env: vec![
            EnvVar::new("VCAP_APPLICATION", "{}"),
            EnvVar::new("MEMORY_LIMIT", "256m"),
        ],
    }
}

#[test]
fn compiles_download_then_run() {
    let plan = compile(&full_request(), &PlanConfig::default()).unwrap();
    let steps = plan.action.steps();
    assert_eq!(steps.len(), 2);

    let Action::Download(download) = steps[0] else {
        panic!("first step must be the download");
    };
    assert_eq!(download.from, "http://blob/d");
    assert_eq!(download.to, ".");
    assert_eq!(download.cache_key, "");
    assert_eq!(download.user, "vcap");
    assert_eq!(download.checksum_algorithm, "sha1");
    assert_eq!(download.checksum_value, "abc123");

    let Action::Run(run) = steps[1] else {
        panic!("second step must be the run");
    };
    assert_eq!(run.path, "/tmp/lifecycle/launcher");
    assert_eq!(run.user, "vcap");
    assert_eq!(run.log_source, "APP/TASK/migrate");
    assert_eq!(run.resource_limits, ResourceLimits::default());
}

#[test]
fn run_args_keep_the_reserved_override_slot() {
    let plan = compile(&full_request(), &PlanConfig::default()).unwrap();
    let Action::Run(run) = plan.action.steps()[1] else {
        panic!("second step must be the run");
    };
    assert_eq!(run.args, vec!["app", "start-app", ""]);
}

#[test]
fn env_passes_through_untouched() {
    let mut request = full_request();
    // Duplicates and ordering are the assembler's concern; keep both
    request.env.push(EnvVar::new("MEMORY_LIMIT", "512m"));
    let plan = compile(&request, &PlanConfig::default()).unwrap();
    let Action::Run(run) = plan.action.steps()[1] else {
        panic!("second step must be the run");
    };
    assert_eq!(run.env, request.env);
}

#[test]
fn bundle_dependency_is_stack_qualified() {
    let config = PlanConfig {
        lifecycle_bundle_base_uri: "http://file-server.example/v1/static/".to_string(),
        ..PlanConfig::default()
    };
    let plan = compile(&full_request(), &config).unwrap();
    assert_eq!(plan.cached_dependencies.len(), 1);
    let bundle = &plan.cached_dependencies[0];
    assert_eq!(
        bundle.from,
        "http://file-server.example/v1/static/buildpack/cflinuxfs2"
    );
    assert_eq!(bundle.to, "/tmp/lifecycle");
    assert_eq!(bundle.cache_key, "buildpack-cflinuxfs2-lifecycle");
}

#[test]
fn root_fs_selects_the_preloaded_stack() {
    let plan = compile(&full_request(), &PlanConfig::default()).unwrap();
    assert_eq!(plan.root_fs, "preloaded:cflinuxfs2");
}

#[yare::parameterized(
    stack    = { |r: &mut TaskRequest| r.stack.clear(), "stack" },
    uri      = { |r: &mut TaskRequest| r.droplet_uri.clear(), "droplet_uri" },
    checksum = { |r: &mut TaskRequest| r.droplet_checksum.clear(), "droplet_checksum" },
    command  = { |r: &mut TaskRequest| r.command.clear(), "command" },
)]
fn missing_required_fields_abort_compilation(clear: fn(&mut TaskRequest), field: &'static str) {
    let mut request = full_request();
    clear(&mut request);
    let err = compile(&request, &PlanConfig::default());
    assert_eq!(err, Err(PlanError::MissingField(field)));
}

#[test]
fn empty_log_tag_is_allowed() {
    let mut request = full_request();
    request.log_tag.clear();
    assert!(compile(&request, &PlanConfig::default()).is_ok());
}

#[test]
fn default_config_runs_as_vcap() {
    let config = PlanConfig::default();
    assert_eq!(config.run_user, "vcap");
    assert!(config.lifecycle_bundle_base_uri.starts_with("http://"));
}
