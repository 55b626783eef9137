use bevy::prelude::*;

use crate::tracking::session::{SurfaceDetection, SurfaceDetectionRequest};

pub fn toggle_detection_on_space(
    keyboard: Res<ButtonInput<KeyCode>>,
    detection: Res<SurfaceDetection>,
    mut requests: EventWriter<SurfaceDetectionRequest>,
) {
    if !keyboard.just_pressed(KeyCode::Space) {
        return;
    }

    let request = if detection.is_running() {
        SurfaceDetectionRequest::Stop
    } else {
        SurfaceDetectionRequest::Start
    };
    info!("Detection toggle: {:?}", request);
    requests.write(request);
}
