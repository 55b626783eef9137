use bevy::prelude::*;
use constants::surface::{
    MAX_UPDATES_PER_FRAME, SURFACE_ALPHA, SURFACE_COLOUR, SURFACE_SIZE_TOLERANCE,
};
use serde::{Deserialize, Serialize};

/// Look of the overlay and the reconciler's tuning knobs.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceStyle {
    /// sRGB overlay colour
    pub colour: [f32; 3],
    pub alpha: f32,
    /// Extent change (metres) that triggers a mesh rebuild
    pub size_tolerance: f32,
    pub max_updates_per_frame: usize,
}

impl Default for SurfaceStyle {
    fn default() -> Self {
        Self {
            colour: SURFACE_COLOUR,
            alpha: SURFACE_ALPHA,
            size_tolerance: SURFACE_SIZE_TOLERANCE,
            max_updates_per_frame: MAX_UPDATES_PER_FRAME,
        }
    }
}

impl SurfaceStyle {
    pub fn base_color(&self) -> Color {
        let [r, g, b] = self.colour;
        Color::srgba(r, g, b, self.alpha.clamp(0.0, 1.0))
    }
}
