//! Inspector configuration: refresh rates and plot settings.
//!
//! User-level config: `~/.inspector/config.yaml`
//! Project-level config: `.inspector/config.yaml`
//!
//! Resolution: explicit path → project config → user config → defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::InspectorResult;

/// Container the payload renderer draws plots into.
pub const PAYLOAD_CONTAINER: &str = "message-payload";

fn default_tick_ms() -> u64 {
    250
}

fn default_render_ms() -> u64 {
    33
}

fn default_draw_option() -> String {
    "colz".into()
}

fn default_container() -> String {
    PAYLOAD_CONTAINER.into()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InspectorConfig {
    /// State refresh interval.
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    /// Frame interval (~30fps).
    #[serde(default = "default_render_ms")]
    pub render_ms: u64,
    /// Draw option handed to the plot backend.
    #[serde(default = "default_draw_option")]
    pub draw_option: String,
    #[serde(default = "default_container")]
    pub payload_container: String,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
            render_ms: default_render_ms(),
            draw_option: default_draw_option(),
            payload_container: default_container(),
        }
    }
}

/// Path to `~/.inspector/`.
pub fn dirs_path() -> Option<PathBuf> {
    #[cfg(windows)]
    {
        std::env::var("USERPROFILE")
            .ok()
            .map(|p| PathBuf::from(p).join(".inspector"))
    }
    #[cfg(not(windows))]
    {
        std::env::var("HOME")
            .ok()
            .map(|p| PathBuf::from(p).join(".inspector"))
    }
}

impl InspectorConfig {
    /// Resolve the config, falling back to defaults on any failure.
    pub fn load(explicit: Option<&Path>) -> Self {
        let mut candidates: Vec<PathBuf> = Vec::new();
        if let Some(path) = explicit {
            candidates.push(path.to_path_buf());
        }
        candidates.push(PathBuf::from(".inspector/config.yaml"));
        if let Some(dir) = dirs_path() {
            candidates.push(dir.join("config.yaml"));
        }

        for path in candidates {
            if !path.exists() {
                continue;
            }
            match Self::from_file(&path) {
                Ok(config) => return config,
                Err(e) => {
                    warn!("ignoring config {}: {e}", path.display());
                }
            }
        }
        Self::default()
    }

    pub fn from_file(path: &Path) -> InspectorResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(yaml: &str) -> InspectorResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}
