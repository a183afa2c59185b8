//! Snapshot files: JSON captures of devices and their messages.
//!
//! ```json
//! { "devices": [ { "name": "readout", "messages": [ { "origin": "TST", ... } ] } ] }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::InspectorResult;
use crate::model::Device;
use crate::store::AppState;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub devices: Vec<Device>,
}

impl Snapshot {
    pub fn from_json(json: &str) -> InspectorResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a snapshot file from disk.
    pub fn load(path: &Path) -> InspectorResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let snapshot = Self::from_json(&content)?;
        info!(
            path = %path.display(),
            devices = snapshot.devices.len(),
            "snapshot loaded"
        );
        Ok(snapshot)
    }

    pub fn into_state(self) -> AppState {
        AppState {
            devices: self.devices,
        }
    }
}
