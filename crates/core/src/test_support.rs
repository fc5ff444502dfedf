// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Stub collaborators and proptest strategies shared across crates' tests.

use std::collections::HashMap;

use crate::buildpack::{BuildpackRecord, BuildpackRegistry};
use crate::env::{EnvVar, EnvironmentAssembler};

/// In-memory buildpack registry for tests.
#[derive(Debug, Clone, Default)]
pub struct StaticRegistry {
    records: HashMap<String, BuildpackRecord>,
}

impl StaticRegistry {
    /// Registry containing the given admin buildpack names (no blob URLs).
    pub fn with_names(names: &[&str]) -> Self {
        let mut registry = Self::default();
        for name in names {
            registry.insert(BuildpackRecord {
                name: (*name).to_string(),
                url: None,
            });
        }
        registry
    }

    pub fn insert(&mut self, record: BuildpackRecord) {
        self.records.insert(record.name.clone(), record);
    }
}

impl BuildpackRegistry for StaticRegistry {
    fn find_by_name(&self, name: &str) -> Option<BuildpackRecord> {
        self.records.get(name).cloned()
    }
}

/// Assembler that appends a fixed variable set to the running environment.
#[derive(Debug, Clone, Default)]
pub struct StaticEnvironment(pub Vec<EnvVar>);

impl EnvironmentAssembler for StaticEnvironment {
    fn build(&self, running_env: &[EnvVar]) -> Vec<EnvVar> {
        let mut env = running_env.to_vec();
        env.extend(self.0.iter().cloned());
        env
    }
}

pub mod strategies {
    use proptest::prelude::*;

    /// Non-empty sequences of plausible buildpack names.
    pub fn buildpack_names() -> impl Strategy<Value = Vec<String>> {
        proptest::collection::vec("[a-z][a-z0-9-]{0,12}", 1..6)
    }
}
