// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Environment assembly boundary.

use serde::{Deserialize, Serialize};

/// A single environment variable, in wire order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvVar {
    pub name: String,
    pub value: String,
}

impl EnvVar {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Supplies the merged environment injected into a run action.
///
/// Implementations merge application, task, and space variables over the
/// platform-wide running set. Precedence and deduplication are the
/// implementor's responsibility; consumers treat the returned sequence as
/// final and never re-order it.
pub trait EnvironmentAssembler {
    fn build(&self, running_env: &[EnvVar]) -> Vec<EnvVar>;
}
