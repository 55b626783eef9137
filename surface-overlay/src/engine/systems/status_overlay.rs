use bevy::prelude::*;

use crate::engine::core::app_state::StatusText;
use crate::surfaces::SurfaceRegistry;
use crate::tracking::session::{DetectionStatus, SurfaceDetection};

pub fn status_label(status: &DetectionStatus) -> String {
    match status {
        DetectionStatus::Idle => "idle".to_string(),
        DetectionStatus::Running => "running".to_string(),
        DetectionStatus::Unsupported => "unsupported on this device".to_string(),
        DetectionStatus::Failed(reason) => format!("failed: {reason}"),
        DetectionStatus::Interrupted => "interrupted".to_string(),
        DetectionStatus::Stopped => "stopped (space to restart)".to_string(),
    }
}

pub fn status_text_update_system(
    detection: Res<SurfaceDetection>,
    registry: Option<Res<SurfaceRegistry>>,
    mut query: Query<&mut Text, With<StatusText>>,
) {
    let surfaces = registry.map_or(0, |registry| registry.len());
    for mut text in &mut query {
        text.0 = format!(
            "Detection: {} | Surfaces: {surfaces}",
            status_label(detection.status())
        );
    }
}
