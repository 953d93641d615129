// File: src/config.rs
// Purpose: Configuration parsing from sectionnav.toml

use crate::error::Result;
use sectionnav_router::FeatureFlags;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file name
pub const CONFIG_FILE: &str = "sectionnav.toml";

/// Navigation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavConfig {
    /// Frames to wait for a lazily rendered section before giving up.
    /// `None` waits indefinitely.
    #[serde(default)]
    pub render_retry_limit: Option<u32>,

    /// Restore the remembered scroll offset when a subpage is left through
    /// a back/forward (popstate) navigation
    #[serde(default = "default_true")]
    pub restore_scroll_on_popstate: bool,

    /// Route manifest to build the registry from
    #[serde(default)]
    pub manifest: Option<PathBuf>,

    /// Enabled feature flags for gated routes
    #[serde(default)]
    pub features: FeatureFlags,

    /// `tracing` filter used when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_true() -> bool {
    true
}

fn default_log_filter() -> String {
    "sectionnav=info".to_string()
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            render_retry_limit: None,
            restore_scroll_on_popstate: true,
            manifest: None,
            features: FeatureFlags::default(),
            log_filter: default_log_filter(),
        }
    }
}

impl NavConfig {
    /// Parse configuration from TOML
    pub fn from_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load `sectionnav.toml` from `dir`, or defaults if it does not exist
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if path.exists() {
            Self::from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn with_render_retry_limit(mut self, frames: u32) -> Self {
        self.render_retry_limit = Some(frames);
        self
    }
}
