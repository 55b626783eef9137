use bevy::prelude::*;
use constants::surface::DEFAULT_SURFACE_EXTENT;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use super::anchor::{AnchorId, AnchorSnapshot, AnchorUpdate, PlaneAlignment, PlaneClassification};
use super::config::PlaneDetectionConfig;
use super::provider::{AnchorUpdateStream, SpatialTrackingProvider, anchor_channel};
use crate::error::{OverlayError, Result};

/// One entry of a replayed anchor timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptedStep {
    /// Wait before delivering this update.
    #[serde(default)]
    pub delay_ms: u64,
    pub update: AnchorUpdate,
}

/// Parameters for the built-in desktop timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub step_interval_ms: u64,
    /// Number of drift updates between the table appearing and vanishing.
    pub drift_steps: u32,
    /// Width added to the table per drift step.
    pub growth_per_step: f32,
    /// Replay the timeline until stopped.
    pub repeat: bool,
    /// Whether the simulated session is granted plane tracking.
    pub authorized: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            step_interval_ms: 50,
            drift_steps: 200,
            growth_per_step: 0.002,
            repeat: true,
            authorized: true,
        }
    }
}

/// Stand-in for device tracking: replays a fixed timeline on a worker thread.
pub struct SimulatedTrackingProvider {
    timeline: Vec<ScriptedStep>,
    repeat: bool,
    supported: bool,
    authorized: bool,
    stop_flag: Option<Arc<AtomicBool>>,
}

impl SimulatedTrackingProvider {
    pub fn new(timeline: Vec<ScriptedStep>) -> Self {
        Self {
            timeline,
            repeat: false,
            supported: true,
            authorized: true,
            stop_flag: None,
        }
    }

    pub fn from_config(config: &SimulationConfig) -> Self {
        Self {
            repeat: config.repeat,
            authorized: config.authorized,
            ..Self::new(drifting_table_timeline(config))
        }
    }

    /// Provider that reports no plane tracking capability.
    pub fn unsupported() -> Self {
        Self {
            supported: false,
            ..Self::new(Vec::new())
        }
    }

    pub fn timeline(&self) -> &[ScriptedStep] {
        &self.timeline
    }
}

impl SpatialTrackingProvider for SimulatedTrackingProvider {
    fn is_supported(&self) -> bool {
        self.supported
    }

    fn run(&mut self, _config: &PlaneDetectionConfig) -> Result<AnchorUpdateStream> {
        if !self.authorized {
            return Err(OverlayError::NotAuthorized);
        }
        if self.timeline.is_empty() {
            return Err(OverlayError::SessionStart(
                "simulated timeline is empty".to_string(),
            ));
        }
        self.stop();

        let (sender, stream) = anchor_channel();
        let stop_flag = Arc::new(AtomicBool::new(false));
        let worker_flag = stop_flag.clone();
        let timeline = self.timeline.clone();
        let repeat = self.repeat;

        let _worker = thread::Builder::new()
            .name("simulated-tracking".to_string())
            .spawn(move || {
                loop {
                    for step in &timeline {
                        if step.delay_ms > 0 {
                            thread::sleep(Duration::from_millis(step.delay_ms));
                        }
                        let stopped = worker_flag.load(Ordering::Relaxed);
                        if stopped || !sender.send(step.update.clone()) {
                            return;
                        }
                    }
                    if !repeat {
                        return;
                    }
                }
            })
            .map_err(|err| OverlayError::SessionStart(err.to_string()))?;

        info!("Simulated tracking started ({} steps)", self.timeline.len());
        self.stop_flag = Some(stop_flag);
        Ok(stream)
    }

    fn stop(&mut self) {
        if let Some(flag) = self.stop_flag.take() {
            flag.store(true, Ordering::Relaxed);
        }
    }
}

/// A table that drifts and grows in front of the viewer, a wall that the
/// default filter rejects, then both disappear.
pub fn drifting_table_timeline(config: &SimulationConfig) -> Vec<ScriptedStep> {
    let interval = config.step_interval_ms;
    // Extent rectangles are authored in XY; lay the table's flat.
    let lay_flat = Mat4::from_rotation_x(-std::f32::consts::FRAC_PI_2);

    let table_at = |step: u32| {
        let t = step as f32;
        let drift = Vec3::new(
            (t * 0.05).sin() * 0.15,
            0.75,
            -1.2 + (t * 0.03).cos() * 0.05,
        );
        AnchorSnapshot {
            id: AnchorId(1),
            classification: PlaneClassification::Table,
            alignment: PlaneAlignment::Horizontal,
            extent_width: DEFAULT_SURFACE_EXTENT + config.growth_per_step * t,
            extent_height: DEFAULT_SURFACE_EXTENT,
            anchor_transform: Mat4::from_rotation_translation(
                Quat::from_rotation_y(t * 0.004),
                drift,
            ),
            extent_to_anchor_transform: lay_flat,
        }
    };
    let wall = AnchorSnapshot {
        id: AnchorId(2),
        classification: PlaneClassification::Wall,
        alignment: PlaneAlignment::Vertical,
        extent_width: 1.0,
        extent_height: 1.5,
        anchor_transform: Mat4::from_translation(Vec3::new(0.0, 1.2, -2.0)),
        extent_to_anchor_transform: Mat4::IDENTITY,
    };

    let mut steps = vec![
        ScriptedStep {
            delay_ms: interval,
            update: AnchorUpdate::added(table_at(0)),
        },
        ScriptedStep {
            delay_ms: interval,
            update: AnchorUpdate::added(wall.clone()),
        },
    ];
    steps.extend((1..=config.drift_steps).map(|step| ScriptedStep {
        delay_ms: interval,
        update: AnchorUpdate::updated(table_at(step)),
    }));
    steps.push(ScriptedStep {
        delay_ms: interval,
        update: AnchorUpdate::removed(wall),
    });
    steps.push(ScriptedStep {
        delay_ms: interval * 10,
        update: AnchorUpdate::removed(table_at(config.drift_steps)),
    });
    steps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracking::anchor::AnchorEventKind;
    use crate::tracking::provider::StreamPoll;
    use std::time::Instant;

    fn collect(stream: &AnchorUpdateStream, expected: usize) -> Vec<AnchorUpdate> {
        let deadline = Instant::now() + Duration::from_secs(5);
        let mut received = Vec::new();
        while received.len() < expected && Instant::now() < deadline {
            match stream.poll_next() {
                StreamPoll::Ready(update) => received.push(update),
                StreamPoll::Pending => thread::sleep(Duration::from_millis(1)),
                StreamPoll::Closed => break,
            }
        }
        received
    }

    #[test]
    fn timeline_adds_drifts_and_removes() {
        let config = SimulationConfig {
            drift_steps: 4,
            ..default()
        };
        let timeline = drifting_table_timeline(&config);
        let kinds: Vec<_> = timeline.iter().map(|s| (s.update.kind, s.update.anchor())).collect();

        assert_eq!(kinds.first(), Some(&(AnchorEventKind::Added, AnchorId(1))));
        assert_eq!(kinds.len(), 2 + 4 + 2);
        assert_eq!(kinds.last(), Some(&(AnchorEventKind::Removed, AnchorId(1))));
        assert!(kinds.contains(&(AnchorEventKind::Removed, AnchorId(2))));

        let widths: Vec<f32> = timeline
            .iter()
            .filter(|s| s.update.anchor() == AnchorId(1))
            .map(|s| s.update.snapshot.extent_width)
            .collect();
        assert!(widths.windows(2).take(4).all(|w| w[1] > w[0]));
    }

    #[test]
    fn replays_timeline_in_order_then_closes() {
        let timeline: Vec<ScriptedStep> = (0..3)
            .map(|id| ScriptedStep {
                delay_ms: 0,
                update: AnchorUpdate::added(AnchorSnapshot {
                    id: AnchorId(id),
                    classification: PlaneClassification::Table,
                    alignment: PlaneAlignment::Horizontal,
                    extent_width: 0.3,
                    extent_height: 0.3,
                    anchor_transform: Mat4::IDENTITY,
                    extent_to_anchor_transform: Mat4::IDENTITY,
                }),
            })
            .collect();
        let mut provider = SimulatedTrackingProvider::new(timeline);

        let stream = provider.run(&PlaneDetectionConfig::default()).unwrap();
        let received = collect(&stream, 3);
        let ids: Vec<_> = received.iter().map(AnchorUpdate::anchor).collect();
        assert_eq!(ids, vec![AnchorId(0), AnchorId(1), AnchorId(2)]);

        // Worker exits after a single pass and drops its sender.
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            match stream.poll_next() {
                StreamPoll::Closed => break,
                _ if Instant::now() > deadline => panic!("stream never closed"),
                _ => thread::sleep(Duration::from_millis(1)),
            }
        }
    }

    #[test]
    fn empty_timeline_fails_to_start() {
        let mut provider = SimulatedTrackingProvider::new(Vec::new());
        assert!(matches!(
            provider.run(&PlaneDetectionConfig::default()),
            Err(OverlayError::SessionStart(_))
        ));
        assert!(!SimulatedTrackingProvider::unsupported().is_supported());
    }

    #[test]
    fn denied_authorisation_fails_to_start() {
        let config = SimulationConfig {
            authorized: false,
            ..default()
        };
        let mut provider = SimulatedTrackingProvider::from_config(&config);
        assert!(provider.is_supported());
        assert!(matches!(
            provider.run(&PlaneDetectionConfig::default()),
            Err(OverlayError::NotAuthorized)
        ));
    }
}
