// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! stagehand-core: Domain types for the stagehand control plane.
//!
//! Pure data: lifecycle records, ownership, buildpack strategy resolution,
//! and the collaborator seams (registry, environment assembly, redaction).
//! No I/O lives here.

pub mod macros;

pub mod buildpack;
pub mod env;
pub mod id;
pub mod lifecycle;
pub mod owner;
pub mod redact;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use buildpack::{is_uri, resolve, BuildpackRecord, BuildpackRegistry, BuildpackStrategy};
pub use env::{EnvVar, EnvironmentAssembler};
pub use lifecycle::{ExternalLifecycle, LifecycleData, LifecycleId, ValidationError};
pub use owner::{AppId, BuildId, DropletId, LifecycleOwner, OwnerMismatch};
pub use redact::obfuscate_url;
