//! Route manifest (routes.toml)
//!
//! Describes the static route tree the registry builds at startup:
//!
//! ```toml
//! [[sections]]
//! path = "device"
//! section = "device"
//! title = "devicePageTitle"
//!
//! [[sections.children]]
//! path = "storage"
//!
//! [[sections.children.children]]
//! path = "clearData"
//! kind = "dialog"
//! ```

use crate::error::RegistryError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

fn default_about_path() -> String {
    "/help".to_string()
}

/// Top-level manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteManifest {
    /// Path of the ABOUT sentinel
    #[serde(default = "default_about_path")]
    pub about_path: String,

    #[serde(default)]
    pub sections: Vec<SectionEntry>,
}

impl Default for RouteManifest {
    fn default() -> Self {
        Self {
            about_path: default_about_path(),
            sections: Vec::new(),
        }
    }
}

/// Which sentinel a section hangs off
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mount {
    #[default]
    Basic,
    About,
}

/// A section directly under BASIC or ABOUT
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionEntry {
    pub path: String,
    pub section: String,
    #[serde(default)]
    pub title: Option<String>,
    /// Feature flag gating this section and everything below it
    #[serde(default)]
    pub feature: Option<String>,
    #[serde(default)]
    pub parent: Mount,
    #[serde(default)]
    pub children: Vec<ChildEntry>,
}

/// How a nested entry is derived from its parent
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChildKind {
    /// Shares the parent's section
    #[default]
    Subpage,
    /// Navigable dialog, shares the parent's section
    Dialog,
    /// Starts its own section (`section` is required)
    Section,
}

/// A route nested below a section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChildEntry {
    pub path: String,
    #[serde(default)]
    pub kind: ChildKind,
    #[serde(default)]
    pub section: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub feature: Option<String>,
    #[serde(default)]
    pub children: Vec<ChildEntry>,
}

impl RouteManifest {
    /// Parse a manifest from TOML
    pub fn from_str(content: &str) -> Result<Self, RegistryError> {
        Ok(toml::from_str(content)?)
    }

    /// Load a manifest from a file
    pub fn from_file(path: &Path) -> Result<Self, RegistryError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }
}

/// Enabled feature flags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureFlags(BTreeSet<String>);

impl FeatureFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enable(mut self, name: impl Into<String>) -> Self {
        self.0.insert(name.into());
        self
    }

    pub fn is_enabled(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    /// True when an entry gated by `feature` should be built
    pub fn allows(&self, feature: Option<&str>) -> bool {
        feature.map(|name| self.is_enabled(name)).unwrap_or(true)
    }
}

impl<S: Into<String>> FromIterator<S> for FeatureFlags {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}
