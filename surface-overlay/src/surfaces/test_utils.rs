//! Shared fixtures for surface and session tests.

use bevy::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use super::factory::setup_surface_material;
use super::registry::{SurfaceRegistry, spawn_surface_root};
use super::style::SurfaceStyle;
use crate::error::{OverlayError, Result};
use crate::tracking::anchor::{
    AnchorId, AnchorSnapshot, AnchorUpdate, PlaneAlignment, PlaneClassification,
};
use crate::tracking::config::PlaneDetectionConfig;
use crate::tracking::provider::{
    AnchorUpdateSender, AnchorUpdateStream, SpatialTrackingProvider, anchor_channel,
};
use crate::tracking::session::SurfaceDetection;

/// Bare world with asset stores, style, material, root and registry.
pub fn surface_world() -> World {
    let mut world = World::new();
    world.init_resource::<Assets<Mesh>>();
    world.init_resource::<Assets<StandardMaterial>>();
    world.init_resource::<SurfaceStyle>();
    world.init_resource::<PlaneDetectionConfig>();
    world.init_resource::<SurfaceDetection>();
    spawn_surface_root(&mut world);
    setup_surface_material(&mut world);
    world
}

pub fn root_children(world: &World) -> Vec<Entity> {
    let root = world.resource::<SurfaceRegistry>().root();
    world
        .get::<Children>(root)
        .map(|children| children.to_vec())
        .unwrap_or_default()
}

pub fn root_child_count(world: &World) -> usize {
    root_children(world).len()
}

fn plane(
    id: u64,
    classification: PlaneClassification,
    alignment: PlaneAlignment,
    width: f32,
    height: f32,
) -> AnchorSnapshot {
    AnchorSnapshot {
        id: AnchorId(id),
        classification,
        alignment,
        extent_width: width,
        extent_height: height,
        anchor_transform: Mat4::IDENTITY,
        extent_to_anchor_transform: Mat4::IDENTITY,
    }
}

/// Horizontal table at the origin.
pub fn table(id: u64, width: f32, height: f32) -> AnchorSnapshot {
    plane(id, PlaneClassification::Table, PlaneAlignment::Horizontal, width, height)
}

pub fn wall(id: u64, width: f32, height: f32) -> AnchorSnapshot {
    plane(id, PlaneClassification::Wall, PlaneAlignment::Vertical, width, height)
}

/// Table with a non-trivial anchor pose and extent offset.
pub fn posed_table(id: u64, width: f32, height: f32) -> AnchorSnapshot {
    AnchorSnapshot {
        anchor_transform: Mat4::from_rotation_translation(
            Quat::from_rotation_y(0.3),
            Vec3::new(0.5, 0.75, -1.0),
        ),
        extent_to_anchor_transform: Mat4::from_rotation_translation(
            Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2),
            Vec3::new(0.02, 0.0, -0.04),
        ),
        ..table(id, width, height)
    }
}

/// Shared call counter observable after the provider is boxed.
#[derive(Clone, Default)]
pub struct Counter(Arc<AtomicUsize>);

impl Counter {
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }

    fn bump(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

/// Test-side handle to the sender of the current session.
#[derive(Clone, Default)]
pub struct Feed(Arc<Mutex<Option<AnchorUpdateSender>>>);

impl Feed {
    pub fn push(&self, update: AnchorUpdate) -> bool {
        self.0
            .lock()
            .unwrap()
            .as_ref()
            .is_some_and(|sender| sender.send(update))
    }

    /// Drop the sender, ending the current stream.
    pub fn close(&self) {
        self.0.lock().unwrap().take();
    }

    fn connect(&self, sender: AnchorUpdateSender) {
        *self.0.lock().unwrap() = Some(sender);
    }
}

/// Provider whose updates are pushed by the test through a [`Feed`].
pub struct FakeProvider {
    supported: bool,
    failure: Option<String>,
    feed: Feed,
    runs: Counter,
    stops: Counter,
}

impl FakeProvider {
    pub fn supported() -> Self {
        Self {
            supported: true,
            failure: None,
            feed: Feed::default(),
            runs: Counter::default(),
            stops: Counter::default(),
        }
    }

    pub fn unsupported() -> Self {
        Self {
            supported: false,
            ..Self::supported()
        }
    }

    pub fn failing() -> Self {
        Self {
            failure: Some("camera busy".to_string()),
            ..Self::supported()
        }
    }

    pub fn feed(&self) -> Feed {
        self.feed.clone()
    }

    pub fn runs(&self) -> Counter {
        self.runs.clone()
    }

    pub fn stops(&self) -> Counter {
        self.stops.clone()
    }
}

impl SpatialTrackingProvider for FakeProvider {
    fn is_supported(&self) -> bool {
        self.supported
    }

    fn run(&mut self, _config: &PlaneDetectionConfig) -> Result<AnchorUpdateStream> {
        self.runs.bump();
        if let Some(reason) = &self.failure {
            return Err(OverlayError::SessionStart(reason.clone()));
        }
        let (sender, stream) = anchor_channel();
        self.feed.connect(sender);
        Ok(stream)
    }

    fn stop(&mut self) {
        self.stops.bump();
        self.feed.close();
    }
}
