// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The lifecycle data record.
//!
//! Holds the stack, the buildpack specification(s), and the owner reference
//! for one application or build. The ordered multi-buildpack list is
//! materialized from the store's position index; the legacy single-buildpack
//! field is one nullable string whose meaning (URL vs. admin name) is derived
//! by the resolver, never stored twice.

use serde::{Deserialize, Serialize};

use crate::buildpack::{resolve, BuildpackRegistry, BuildpackStrategy};
use crate::owner::LifecycleOwner;
use crate::redact::obfuscate_url;

#[cfg(any(test, feature = "test-support"))]
use crate::owner::AppId;

crate::define_id! {
    /// Unique identifier for a lifecycle data record.
    pub struct LifecycleId("lcd-");
}

/// Declarative description of how an app or build is compiled and started.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleData {
    pub id: LifecycleId,
    /// Root filesystem image the remote scheduler must select.
    pub stack: String,
    /// Legacy single-buildpack field: a URL or an admin buildpack name.
    /// `None` means auto-detection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buildpack: Option<String>,
    /// Ordered multi-buildpack list (position ascending).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub buildpacks: Vec<String>,
    pub owner: LifecycleOwner,
}

impl LifecycleData {
    /// Create a record with a fresh ID and no buildpack specification.
    pub fn new(stack: impl Into<String>, owner: LifecycleOwner) -> Self {
        Self {
            id: LifecycleId::new(),
            stack: stack.into(),
            buildpack: None,
            buildpacks: Vec::new(),
            owner,
        }
    }

    /// Replace the legacy single-buildpack field wholesale.
    ///
    /// An empty string is normalized to `None` (auto-detect).
    pub fn set_buildpack(&mut self, value: Option<impl Into<String>>) {
        self.buildpack = value.map(Into::into).filter(|v| !v.is_empty());
    }

    /// The legacy single-buildpack field; `None` means auto-detect.
    pub fn buildpack(&self) -> Option<&str> {
        self.buildpack.as_deref()
    }

    /// Resolve the legacy field to a concrete strategy.
    pub fn buildpack_strategy(&self, registry: &dyn BuildpackRegistry) -> BuildpackStrategy {
        resolve(self.buildpack.as_deref(), registry)
    }

    /// True iff the resolved strategy is a custom buildpack.
    pub fn using_custom_buildpack(&self, registry: &dyn BuildpackRegistry) -> bool {
        self.buildpack_strategy(registry).is_custom()
    }

    /// Check every record invariant, returning all violations.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        if self.buildpack.is_some() && !self.buildpacks.is_empty() {
            errors.push(ValidationError::BuildpackSourcesExclusive);
        }
        if self.buildpacks.iter().any(|name| name.is_empty()) {
            errors.push(ValidationError::EmptyBuildpackName);
        }
        errors
    }

    /// The serializable outward view, with credentials in buildpack URLs
    /// redacted.
    ///
    /// The list is never null: no buildpacks at all yields an empty sequence,
    /// and a legacy single buildpack yields a one-element sequence.
    pub fn to_external(&self) -> ExternalLifecycle {
        let buildpacks = if !self.buildpacks.is_empty() {
            self.buildpacks.iter().map(|bp| obfuscate_url(bp)).collect()
        } else if let Some(bp) = &self.buildpack {
            vec![obfuscate_url(bp)]
        } else {
            Vec::new()
        };
        ExternalLifecycle {
            buildpacks,
            stack: self.stack.clone(),
        }
    }
}

/// Outward-facing view of a lifecycle record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalLifecycle {
    pub buildpacks: Vec<String>,
    pub stack: String,
}

/// A record invariant that would be violated by a write.
///
/// Surfaced by the store before any persistence is attempted; a violating
/// write is never partially applied.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The legacy single-buildpack field and the ordered list are mutually
    /// exclusive ways to specify buildpacks.
    #[error("single buildpack and buildpack list must not both be set")]
    BuildpackSourcesExclusive,
    #[error("buildpack name must not be empty")]
    EmptyBuildpackName,
    /// Build-scoped records are immutable snapshots; their owner never
    /// changes after creation.
    #[error("build-scoped lifecycle cannot be reassigned to a different owner")]
    OwnerReassigned,
}

crate::builder! {
    pub struct LifecycleDataBuilder => LifecycleData {
        into { stack: String = "cflinuxfs2" }
        set {
            buildpacks: Vec<String> = Vec::new(),
            owner: LifecycleOwner = LifecycleOwner::App(AppId::new()),
        }
        option { buildpack: String = None }
        computed { id: LifecycleId = LifecycleId::new() }
    }
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
