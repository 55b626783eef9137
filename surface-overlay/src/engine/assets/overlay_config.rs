use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::surfaces::style::SurfaceStyle;
use crate::tracking::config::PlaneDetectionConfig;
use crate::tracking::simulated::SimulationConfig;

/// Overlay configuration as a Bevy asset. Mirrors the JSON file exactly;
/// every section is optional and falls back to its defaults.
#[derive(Asset, TypePath, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub detection: PlaneDetectionConfig,
    pub style: SurfaceStyle,
    pub simulation: SimulationConfig,
}

impl OverlayConfig {
    /// Parse the same format the asset loader reads.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
