//! Scene-graph side of plane detection: one translucent panel per tracked
//! surface, kept in step with the anchor stream.
//!
//! ## Data Flow
//!
//! ```text
//! SurfaceDetection (Resource, anchor stream)
//!   └─> reconcile_anchor_updates()        one update at a time, in order
//!       ├─> PlaneDetectionConfig::accepts  classification / alignment filter
//!       ├─> spawn_surface_node()          first Added/Updated for an anchor
//!       ├─> update_surface_node()         later Added/Updated, same entity
//!       └─> detach_surface_node()         Removed
//!
//! SurfaceRegistry (Resource)
//!   └─> AnchorId -> Entity, every entity a child of the SurfaceRoot entity
//! ```
//!
//! The registry is the only owner of surface entities. An anchor has an
//! entry exactly when its entity hangs under the root, after every update.
//!
//! ## Geometry Updates
//!
//! Node transforms are recomposed from the snapshot on every update. Meshes
//! are regenerated only when an extent moves past
//! [`SurfaceStyle::size_tolerance`](style::SurfaceStyle), so frame-to-frame
//! jitter never reallocates geometry.

/// Surface entity construction: mesh, shared material, placement.
pub mod factory;

/// Per-update reconciliation of the anchor stream against the registry.
pub mod reconciler;

/// Anchor-to-entity registry, surface root and teardown.
pub mod registry;

/// Overlay appearance and reconciler tuning.
pub mod style;

/// In-place updates with size hysteresis.
pub mod updater;

#[cfg(test)]
pub mod test_utils;

use bevy::prelude::*;

pub use factory::SurfaceMaterial;
pub use reconciler::{ReconcileOutcome, apply_anchor_update, reconcile_anchor_updates};
pub use registry::{SurfaceNode, SurfaceRegistry, SurfaceRoot};
pub use style::SurfaceStyle;

use crate::tracking::config::PlaneDetectionConfig;
use crate::tracking::session::{
    SurfaceDetection, SurfaceDetectionRequest, detection_running, handle_detection_requests,
};
use factory::{apply_surface_style, setup_surface_material};
use registry::spawn_surface_root;

/// Registers the surface registry, detection session and reconciliation systems.
///
/// The host installs a [`TrackingProvider`](crate::tracking::provider::TrackingProvider)
/// and sends [`SurfaceDetectionRequest::Start`] when it wants surfaces.
pub struct SurfaceOverlayPlugin;

impl Plugin for SurfaceOverlayPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlaneDetectionConfig>()
            .init_resource::<SurfaceStyle>()
            .init_resource::<SurfaceDetection>()
            .add_event::<SurfaceDetectionRequest>()
            .add_systems(Startup, (spawn_surface_root, setup_surface_material))
            .add_systems(
                Update,
                (
                    handle_detection_requests,
                    reconcile_anchor_updates.run_if(detection_running),
                    apply_surface_style.run_if(resource_changed::<SurfaceStyle>),
                )
                    .chain(),
            );
    }
}
