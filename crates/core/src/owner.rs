// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lifecycle ownership.
//!
//! A lifecycle record is owned either by an application (the app's default
//! lifecycle configuration) or by a build (that build's resolved snapshot,
//! with the droplet reference attached once staging produces an artifact).
//! This module provides a tagged union type for that ownership, so a record
//! can never reference an app and a build at the same time.

use std::fmt;

crate::define_id! {
    /// Unique identifier for an application descriptor.
    pub struct AppId("app-");
}

crate::define_id! {
    /// Unique identifier for a build descriptor.
    pub struct BuildId("bld-");
}

crate::define_id! {
    /// Unique identifier for a staged artifact (droplet).
    pub struct DropletId("drp-");
}

/// Owner of a lifecycle record.
///
/// Serializes as a string using Display format:
/// - `"app:app-123"`
/// - `"build:bld-456"`
/// - `"build:bld-456+drp-789"` (droplet attached)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LifecycleOwner {
    /// The application's default lifecycle configuration
    App(AppId),
    /// A build's resolved snapshot; the droplet is attached once staged
    Build {
        build: BuildId,
        droplet: Option<DropletId>,
    },
}

impl serde::Serialize for LifecycleOwner {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for LifecycleOwner {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(LifecycleOwner::parse(&s))
    }
}

impl LifecycleOwner {
    /// Create an App owner.
    pub fn app(id: AppId) -> Self {
        LifecycleOwner::App(id)
    }

    /// Create a Build owner with no droplet yet.
    pub fn build(id: BuildId) -> Self {
        LifecycleOwner::Build {
            build: id,
            droplet: None,
        }
    }

    /// Create a Build owner with its staged droplet.
    pub fn staged(build: BuildId, droplet: DropletId) -> Self {
        LifecycleOwner::Build {
            build,
            droplet: Some(droplet),
        }
    }

    /// Returns the app ID if this is an App owner.
    pub fn as_app(&self) -> Option<&AppId> {
        match self {
            LifecycleOwner::App(id) => Some(id),
            LifecycleOwner::Build { .. } => None,
        }
    }

    /// Returns the build ID if this is a Build owner.
    pub fn as_build(&self) -> Option<&BuildId> {
        match self {
            LifecycleOwner::Build { build, .. } => Some(build),
            LifecycleOwner::App(_) => None,
        }
    }

    /// Returns the droplet ID if one has been attached.
    pub fn droplet(&self) -> Option<&DropletId> {
        match self {
            LifecycleOwner::Build { droplet, .. } => droplet.as_ref(),
            LifecycleOwner::App(_) => None,
        }
    }

    /// Returns the app ID or an error if this is not an App owner.
    pub fn try_app(&self) -> Result<&AppId, OwnerMismatch> {
        match self {
            LifecycleOwner::App(id) => Ok(id),
            _ => Err(OwnerMismatch("app")),
        }
    }

    /// Returns the build ID or an error if this is not a Build owner.
    pub fn try_build(&self) -> Result<&BuildId, OwnerMismatch> {
        match self {
            LifecycleOwner::Build { build, .. } => Ok(build),
            _ => Err(OwnerMismatch("build")),
        }
    }

    pub fn is_app(&self) -> bool {
        matches!(self, LifecycleOwner::App(_))
    }

    pub fn is_build(&self) -> bool {
        matches!(self, LifecycleOwner::Build { .. })
    }

    /// Parse from Display format (`"app:xxx"` / `"build:xxx"` / `"build:xxx+yyy"`).
    /// Bare strings without a prefix are treated as app owners.
    pub fn parse(s: &str) -> Self {
        if let Some(rest) = s.strip_prefix("app:") {
            LifecycleOwner::App(AppId::from_string(rest))
        } else if let Some(rest) = s.strip_prefix("build:") {
            match rest.split_once('+') {
                Some((build, droplet)) => LifecycleOwner::Build {
                    build: BuildId::from_string(build),
                    droplet: Some(DropletId::from_string(droplet)),
                },
                None => LifecycleOwner::Build {
                    build: BuildId::from_string(rest),
                    droplet: None,
                },
            }
        } else {
            LifecycleOwner::App(AppId::from_string(s))
        }
    }

    pub fn log(&self) -> String {
        match self {
            LifecycleOwner::App(id) => format!("app={}", id),
            LifecycleOwner::Build { build, .. } => format!("build={}", build),
        }
    }
}

/// Expected a specific [`LifecycleOwner`] variant.
#[derive(Debug, Clone)]
pub struct OwnerMismatch(&'static str);

impl fmt::Display for OwnerMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected {} owner", self.0)
    }
}

impl std::error::Error for OwnerMismatch {}

impl fmt::Display for LifecycleOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifecycleOwner::App(id) => write!(f, "app:{}", id),
            LifecycleOwner::Build {
                build,
                droplet: Some(droplet),
            } => write!(f, "build:{}+{}", build, droplet),
            LifecycleOwner::Build {
                build,
                droplet: None,
            } => write!(f, "build:{}", build),
        }
    }
}

impl From<AppId> for LifecycleOwner {
    fn from(id: AppId) -> Self {
        LifecycleOwner::App(id)
    }
}

impl From<BuildId> for LifecycleOwner {
    fn from(id: BuildId) -> Self {
        LifecycleOwner::build(id)
    }
}

impl PartialEq<AppId> for LifecycleOwner {
    fn eq(&self, other: &AppId) -> bool {
        matches!(self, LifecycleOwner::App(id) if id == other)
    }
}

impl PartialEq<BuildId> for LifecycleOwner {
    fn eq(&self, other: &BuildId) -> bool {
        matches!(self, LifecycleOwner::Build { build, .. } if build == other)
    }
}

#[cfg(test)]
#[path = "owner_test.rs"]
mod tests;
