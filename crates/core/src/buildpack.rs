// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Buildpack strategy resolution.
//!
//! A lifecycle names its buildpack with a single string that is either a URL,
//! a registered admin buildpack name, or absent. [`resolve`] maps that string
//! to one of three concrete strategies with a fixed precedence: URI syntax
//! wins over a registry entry that happens to share the string, and unknown
//! non-URI names fall through as opaque custom references.

use serde::{Deserialize, Serialize};

/// Registry view of an admin-installed buildpack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildpackRecord {
    pub name: String,
    /// Download location for the buildpack blob, when one has been uploaded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Read-only lookup into the admin buildpack registry.
///
/// Injected into resolution calls; this crate never mutates the registry.
pub trait BuildpackRegistry {
    fn find_by_name(&self, name: &str) -> Option<BuildpackRecord>;
}

/// Concrete buildpack strategy resolved from a lifecycle's buildpack field.
///
/// Serializes as a tagged string using Display format:
/// - `"auto"`
/// - `"admin:ruby"`
/// - `"custom:https://example.com/bp"`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildpackStrategy {
    /// No buildpack specified; the stager detects one.
    AutoDetect,
    /// A registered admin buildpack.
    Admin { name: String, url: Option<String> },
    /// A URL (or opaque reference) supplied by the user.
    Custom { url: String },
}

impl BuildpackStrategy {
    pub fn is_auto_detect(&self) -> bool {
        matches!(self, BuildpackStrategy::AutoDetect)
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, BuildpackStrategy::Admin { .. })
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, BuildpackStrategy::Custom { .. })
    }

    /// The admin name or custom URL, if any.
    pub fn reference(&self) -> Option<&str> {
        match self {
            BuildpackStrategy::AutoDetect => None,
            BuildpackStrategy::Admin { name, .. } => Some(name),
            BuildpackStrategy::Custom { url } => Some(url),
        }
    }
}

impl std::fmt::Display for BuildpackStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildpackStrategy::AutoDetect => write!(f, "auto"),
            BuildpackStrategy::Admin { name, .. } => write!(f, "admin:{}", name),
            BuildpackStrategy::Custom { url } => write!(f, "custom:{}", url),
        }
    }
}

/// Resolve a lifecycle's buildpack field against the registry.
///
/// Precedence: absent/empty → auto-detect; URI syntax → custom (even when a
/// registry entry shares the string); registered name → admin; anything else
/// is preserved as an opaque custom reference rather than rejected.
pub fn resolve(value: Option<&str>, registry: &dyn BuildpackRegistry) -> BuildpackStrategy {
    let value = match value {
        Some(v) if !v.is_empty() => v,
        _ => return BuildpackStrategy::AutoDetect,
    };
    if is_uri(value) {
        return BuildpackStrategy::Custom {
            url: value.to_string(),
        };
    }
    match registry.find_by_name(value) {
        Some(record) => BuildpackStrategy::Admin {
            name: record.name,
            url: record.url,
        },
        None => BuildpackStrategy::Custom {
            url: value.to_string(),
        },
    }
}

/// Returns true if `s` is an absolute URI with both a scheme and a host.
pub fn is_uri(s: &str) -> bool {
    let Some((scheme, rest)) = s.split_once("://") else {
        return false;
    };
    let mut chars = scheme.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')) {
        return false;
    }
    let authority = rest.split(['/', '?', '#']).next().unwrap_or("");
    let host = authority.rsplit('@').next().unwrap_or("");
    !host.is_empty()
}

#[cfg(test)]
#[path = "buildpack_tests.rs"]
mod tests;
