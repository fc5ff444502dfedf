// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lifecycle record store with atomic ordered-buildpack-list replacement.

use std::collections::HashMap;
use std::path::Path;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use stagehand_core::{LifecycleData, LifecycleId, LifecycleOwner, ValidationError};

/// One position-indexed row of a lifecycle's ordered buildpack list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildpackEntry {
    pub lifecycle: LifecycleId,
    pub name: String,
    /// Zero-based rank; dense within a lifecycle.
    pub position: u32,
}

/// Errors from store operations.
///
/// All are recoverable: a failed write is never partially applied, so the
/// caller can retry the whole operation or surface the failure upward.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("lifecycle not found: {0}")]
    NotFound(LifecycleId),
    #[error("lifecycle already exists: {0}")]
    AlreadyExists(LifecycleId),
    /// One or more record invariants were violated; nothing was written.
    #[error("validation failed: {}", describe(.0))]
    Validation(Vec<ValidationError>),
    /// The record version moved underneath a compare-and-swap write.
    #[error("conflicting update on {id}: expected version {expected}, found {found}")]
    Conflict {
        id: LifecycleId,
        expected: u64,
        found: u64,
    },
    #[error("snapshot io: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot decode: {0}")]
    Decode(#[from] serde_json::Error),
}

fn describe(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct VersionedRecord {
    data: LifecycleData,
    /// Bumped on every committed write; observed by compare-and-swap writers.
    version: u64,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct State {
    records: HashMap<LifecycleId, VersionedRecord>,
    entries: Vec<BuildpackEntry>,
}

impl State {
    fn names_for(&self, id: &LifecycleId) -> Vec<String> {
        let mut rows: Vec<&BuildpackEntry> =
            self.entries.iter().filter(|e| &e.lifecycle == id).collect();
        rows.sort_by_key(|e| e.position);
        rows.into_iter().map(|e| e.name.clone()).collect()
    }
}

/// In-memory lifecycle store.
///
/// A single lock is the transaction boundary: every write commits fully or
/// not at all, and readers never observe a half-replaced buildpack list.
/// Writers to the same record serialize on the lock; plain writes are
/// last-committed-wins, while [`LifecycleStore::set_buildpacks_if`] offers
/// optimistic concurrency for callers that need it.
#[derive(Debug, Default)]
pub struct LifecycleStore {
    state: Mutex<State>,
}

impl LifecycleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Persist a new record, validating every invariant first.
    ///
    /// A non-empty `buildpacks` list on the record becomes the initial
    /// ordered list, positions assigned from the input order.
    pub fn create(&self, data: LifecycleData) -> Result<(), StoreError> {
        let errors = data.validate();
        if !errors.is_empty() {
            return Err(StoreError::Validation(errors));
        }
        let mut state = self.state.lock();
        if state.records.contains_key(&data.id) {
            return Err(StoreError::AlreadyExists(data.id));
        }
        let id = data.id.clone();
        let mut record = VersionedRecord { data, version: 1 };
        let names = std::mem::take(&mut record.data.buildpacks);
        state
            .entries
            .extend(names.into_iter().enumerate().map(|(i, name)| {
                BuildpackEntry {
                    lifecycle: id.clone(),
                    name,
                    position: i as u32,
                }
            }));
        let owner = record.data.owner.log();
        state.records.insert(id.clone(), record);
        tracing::debug!("lifecycle created id={} {}", id, owner);
        Ok(())
    }

    /// Fetch a record with its ordered buildpack list materialized.
    pub fn get(&self, id: &LifecycleId) -> Option<LifecycleData> {
        let state = self.state.lock();
        let record = state.records.get(id)?;
        let mut data = record.data.clone();
        data.buildpacks = state.names_for(id);
        Some(data)
    }

    /// Find the record owned by the given owner, if any.
    pub fn find_by_owner(&self, owner: &LifecycleOwner) -> Option<LifecycleData> {
        let id = {
            let state = self.state.lock();
            state
                .records
                .values()
                .find(|r| &r.data.owner == owner)
                .map(|r| r.data.id.clone())?
        };
        self.get(&id)
    }

    /// Update a record's scalar fields (stack, legacy buildpack, owner).
    ///
    /// The ordered buildpack list is not written here; it only changes
    /// through [`LifecycleStore::set_buildpacks`]. Build-scoped records are
    /// immutable snapshots, so reassigning their owner fails validation.
    pub fn save(&self, data: LifecycleData) -> Result<u64, StoreError> {
        let mut state = self.state.lock();
        let stored_names = state.names_for(&data.id);
        let record = state
            .records
            .get_mut(&data.id)
            .ok_or_else(|| StoreError::NotFound(data.id.clone()))?;

        let mut errors = Vec::new();
        if let Some(stored_build) = record.data.owner.as_build() {
            // Attaching the droplet to the same build (once staging finishes)
            // is the only owner change a snapshot permits
            let same_build = data.owner.as_build() == Some(stored_build);
            let droplet_swapped = record.data.owner.droplet().is_some()
                && data.owner.droplet() != record.data.owner.droplet();
            if !same_build || droplet_swapped {
                errors.push(ValidationError::OwnerReassigned);
            }
        }
        // Validate against the stored list, not whatever the caller's copy holds
        let mut effective = data.clone();
        effective.buildpacks = stored_names;
        errors.extend(effective.validate());
        if !errors.is_empty() {
            return Err(StoreError::Validation(errors));
        }

        record.data.stack = data.stack;
        record.data.buildpack = data.buildpack;
        record.data.owner = data.owner;
        record.version += 1;
        let version = record.version;
        tracing::debug!("lifecycle saved id={} version={}", data.id, version);
        Ok(version)
    }

    /// Replace the full ordered buildpack list atomically.
    ///
    /// Deletes every existing entry for the lifecycle and inserts fresh
    /// entries with `position = index`, all inside one lock acquisition.
    /// Empty input is valid and yields an empty list. Returns the new
    /// record version.
    pub fn set_buildpacks(
        &self,
        id: &LifecycleId,
        names: Vec<String>,
    ) -> Result<u64, StoreError> {
        self.replace_list(id, names, None)
    }

    /// Compare-and-swap variant of [`LifecycleStore::set_buildpacks`].
    ///
    /// Fails with [`StoreError::Conflict`] when the record version moved
    /// since the caller observed `expected_version`; the prior list stays
    /// fully intact and the caller retries the whole operation.
    pub fn set_buildpacks_if(
        &self,
        id: &LifecycleId,
        names: Vec<String>,
        expected_version: u64,
    ) -> Result<u64, StoreError> {
        self.replace_list(id, names, Some(expected_version))
    }

    fn replace_list(
        &self,
        id: &LifecycleId,
        names: Vec<String>,
        expected_version: Option<u64>,
    ) -> Result<u64, StoreError> {
        let mut state = self.state.lock();
        let record = state
            .records
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        if let Some(expected) = expected_version {
            if record.version != expected {
                return Err(StoreError::Conflict {
                    id: id.clone(),
                    expected,
                    found: record.version,
                });
            }
        }

        let mut errors = Vec::new();
        if record.data.buildpack.is_some() && !names.is_empty() {
            errors.push(ValidationError::BuildpackSourcesExclusive);
        }
        if names.iter().any(|name| name.is_empty()) {
            errors.push(ValidationError::EmptyBuildpackName);
        }
        if !errors.is_empty() {
            return Err(StoreError::Validation(errors));
        }

        // Delete-then-bulk-insert under the one lock; readers never see a mix
        let count = names.len();
        state.entries.retain(|e| &e.lifecycle != id);
        state
            .entries
            .extend(names.into_iter().enumerate().map(|(i, name)| {
                BuildpackEntry {
                    lifecycle: id.clone(),
                    name,
                    position: i as u32,
                }
            }));
        let record = state
            .records
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        record.version += 1;
        let version = record.version;
        tracing::debug!(
            "buildpacks replaced lifecycle={} count={} version={}",
            id,
            count,
            version
        );
        Ok(version)
    }

    /// The ordered buildpack list: entries sorted by position, mapped to
    /// their names.
    pub fn buildpacks(&self, id: &LifecycleId) -> Vec<String> {
        self.state.lock().names_for(id)
    }

    /// The raw position-indexed rows for a lifecycle, position ascending.
    pub fn entries(&self, id: &LifecycleId) -> Vec<BuildpackEntry> {
        let state = self.state.lock();
        let mut rows: Vec<BuildpackEntry> = state
            .entries
            .iter()
            .filter(|e| &e.lifecycle == id)
            .cloned()
            .collect();
        rows.sort_by_key(|e| e.position);
        rows
    }

    /// Current version of a record.
    pub fn version(&self, id: &LifecycleId) -> Option<u64> {
        self.state.lock().records.get(id).map(|r| r.version)
    }

    /// Delete a record and its buildpack entries (cascade from owner
    /// deletion).
    pub fn remove(&self, id: &LifecycleId) {
        let mut state = self.state.lock();
        state.records.remove(id);
        state.entries.retain(|e| &e.lifecycle != id);
        tracing::debug!("lifecycle removed id={}", id);
    }

    /// Write the full store state to a JSON snapshot.
    pub fn save_snapshot(&self, path: &Path) -> Result<(), StoreError> {
        let bytes = {
            let state = self.state.lock();
            serde_json::to_vec_pretty(&*state)?
        };
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Rebuild a store from a JSON snapshot.
    pub fn load_snapshot(path: &Path) -> Result<Self, StoreError> {
        let bytes = std::fs::read(path)?;
        let state: State = serde_json::from_slice(&bytes)?;
        Ok(Self {
            state: Mutex::new(state),
        })
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
