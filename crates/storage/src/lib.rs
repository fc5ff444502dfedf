// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! stagehand-storage: persisted lifecycle records and their ordered
//! buildpack lists.
//!
//! The store is the transaction boundary for the replace-all buildpack list
//! write: concurrent readers observe either the fully-old or the fully-new
//! list, never a mix, and a failed write leaves the prior list intact.

mod store;

pub use store::{BuildpackEntry, LifecycleStore, StoreError};
