use bevy::prelude::*;

use super::anchor::AnchorUpdate;
use super::config::PlaneDetectionConfig;
use super::provider::{AnchorUpdateStream, StreamPoll, TrackingProvider};
use crate::error::{OverlayError, Result};
use crate::surfaces::registry::teardown_surfaces;

/// Where the detection session currently stands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DetectionStatus {
    #[default]
    Idle,
    Running,
    /// Provider reported no plane tracking on this device.
    Unsupported,
    /// Session could not be started; carries the reported reason.
    Failed(String),
    /// Provider closed the stream without an explicit stop.
    Interrupted,
    Stopped,
}

/// The live session: its status and the stream being consumed.
#[derive(Resource, Default)]
pub struct SurfaceDetection {
    status: DetectionStatus,
    stream: Option<AnchorUpdateStream>,
}

impl SurfaceDetection {
    pub fn status(&self) -> &DetectionStatus {
        &self.status
    }

    pub fn is_running(&self) -> bool {
        self.stream.is_some()
    }

    /// Pull the next queued update. A closed stream is dropped and the
    /// session marked interrupted.
    pub(crate) fn poll_next(&mut self) -> Option<AnchorUpdate> {
        match self.stream.as_ref()?.poll_next() {
            StreamPoll::Ready(update) => Some(update),
            StreamPoll::Pending => None,
            StreamPoll::Closed => {
                warn!("Anchor stream closed by provider; keeping current surfaces");
                self.stream = None;
                self.status = DetectionStatus::Interrupted;
                None
            }
        }
    }
}

/// Request to start or stop surface detection.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceDetectionRequest {
    Start,
    Stop,
}

/// Run condition: true while an anchor stream is attached.
pub fn detection_running(detection: Option<Res<SurfaceDetection>>) -> bool {
    detection.is_some_and(|detection| detection.is_running())
}

/// Start a fresh session with the installed provider.
///
/// Any previous session is torn down first. On an unsupported device or a
/// failed start the error is logged and returned, the status records it,
/// and no updates are ever consumed.
pub fn start_surface_detection(world: &mut World) -> Result<()> {
    if world
        .get_resource::<SurfaceDetection>()
        .is_some_and(|detection| detection.status != DetectionStatus::Idle)
    {
        stop_surface_detection(world);
    }

    let config = world
        .get_resource::<PlaneDetectionConfig>()
        .cloned()
        .unwrap_or_default();

    let outcome = match world.get_resource_mut::<TrackingProvider>() {
        Some(mut provider) if provider.0.is_supported() => provider.0.run(&config),
        Some(_) => Err(OverlayError::Unsupported),
        None => {
            warn!("No tracking provider installed");
            Err(OverlayError::Unsupported)
        }
    };

    let mut detection = world.get_resource_or_insert_with(SurfaceDetection::default);
    match outcome {
        Ok(stream) => {
            info!(
                "Surface detection running (alignment: {:?}, classes: {:?})",
                config.alignment, config.classifications
            );
            detection.stream = Some(stream);
            detection.status = DetectionStatus::Running;
            Ok(())
        }
        Err(OverlayError::Unsupported) => {
            info!("Plane tracking unsupported; surface set stays empty");
            detection.status = DetectionStatus::Unsupported;
            Err(OverlayError::Unsupported)
        }
        Err(err) => {
            error!("Failed to start surface detection: {}", err);
            let reason = match &err {
                OverlayError::SessionStart(reason) => reason.clone(),
                other => other.to_string(),
            };
            detection.status = DetectionStatus::Failed(reason);
            Err(err)
        }
    }
}

/// Stop consuming updates and remove every tracked surface.
pub fn stop_surface_detection(world: &mut World) {
    let had_stream = world
        .get_resource_mut::<SurfaceDetection>()
        .is_some_and(|mut detection| {
            detection.status = DetectionStatus::Stopped;
            detection.stream.take().is_some()
        });

    if had_stream {
        if let Some(mut provider) = world.get_resource_mut::<TrackingProvider>() {
            provider.0.stop();
        }
    }

    let removed = teardown_surfaces(world);
    info!("Surface detection stopped; {} surfaces removed", removed);
}

/// Apply queued start/stop requests in the order they were sent.
pub fn handle_detection_requests(world: &mut World) {
    let requests: Vec<SurfaceDetectionRequest> =
        match world.get_resource_mut::<Events<SurfaceDetectionRequest>>() {
            Some(mut events) => events.drain().collect(),
            None => return,
        };

    for request in requests {
        match request {
            SurfaceDetectionRequest::Start => {
                // Already logged and recorded in the status.
                let _ = start_surface_detection(world);
            }
            SurfaceDetectionRequest::Stop => stop_surface_detection(world),
        }
    }
}
