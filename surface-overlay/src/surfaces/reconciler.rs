use bevy::prelude::*;
use constants::surface::{MAX_UPDATES_PER_FRAME, SURFACE_SIZE_TOLERANCE};

use super::factory::spawn_surface_node;
use super::registry::{SurfaceRegistry, detach_surface_node};
use super::style::SurfaceStyle;
use super::updater::update_surface_node;
use crate::tracking::anchor::{AnchorEventKind, AnchorId, AnchorSnapshot, AnchorUpdate};
use crate::tracking::config::PlaneDetectionConfig;
use crate::tracking::session::SurfaceDetection;

/// What a single anchor update did to the surface set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    Created(Entity),
    Updated {
        entity: Entity,
        geometry_rebuilt: bool,
    },
    Removed(Entity),
    /// Filtered out, or removal of an untracked anchor.
    Ignored,
}

// Minimum bounds gate creation only; a tracked surface keeps following
// its anchor if the plane estimate shrinks.
fn is_accepted(config: &PlaneDetectionConfig, snapshot: &AnchorSnapshot, tracked: bool) -> bool {
    if tracked {
        config.accepts_plane(snapshot)
    } else {
        config.accepts(snapshot)
    }
}

/// Apply one update to the registry and the surface root.
///
/// `Added` and `Updated` are interchangeable: whichever arrives first for an
/// untracked anchor creates the node, later ones mutate it in place.
/// Anchors rejected by [`PlaneDetectionConfig`] never get a node, planes
/// smaller than its minimum bounds wait until they grow, and removing an
/// unknown anchor is a no-op.
pub fn apply_anchor_update(world: &mut World, update: &AnchorUpdate) -> ReconcileOutcome {
    let snapshot = &update.snapshot;
    match update.kind {
        AnchorEventKind::Removed => remove_surface(world, snapshot.id),
        AnchorEventKind::Added | AnchorEventKind::Updated => {
            let tracked = world
                .get_resource::<SurfaceRegistry>()
                .is_some_and(|registry| registry.contains(snapshot.id));
            let accepted = match world.get_resource::<PlaneDetectionConfig>() {
                Some(config) => is_accepted(config, snapshot, tracked),
                None => is_accepted(&PlaneDetectionConfig::default(), snapshot, tracked),
            };
            if !accepted {
                return ReconcileOutcome::Ignored;
            }
            upsert_surface(world, snapshot)
        }
    }
}

fn upsert_surface(world: &mut World, snapshot: &AnchorSnapshot) -> ReconcileOutcome {
    let Some(registry) = world.get_resource::<SurfaceRegistry>() else {
        warn!("Surface root not spawned; dropping update for {}", snapshot.id);
        return ReconcileOutcome::Ignored;
    };
    let root = registry.root();
    let existing = registry.get(snapshot.id);

    if let Some(entity) = existing {
        let tolerance = world
            .get_resource::<SurfaceStyle>()
            .map_or(SURFACE_SIZE_TOLERANCE, |style| style.size_tolerance);
        if let Some(geometry_rebuilt) = update_surface_node(world, entity, snapshot, tolerance) {
            return ReconcileOutcome::Updated {
                entity,
                geometry_rebuilt,
            };
        }

        // Entity vanished underneath us: forget it and start over.
        warn!("Surface for {} no longer exists; recreating", snapshot.id);
        world.resource_mut::<SurfaceRegistry>().remove(snapshot.id);
    }

    if world.get_entity(root).is_err() {
        warn!("Surface root is gone; dropping update for {}", snapshot.id);
        return ReconcileOutcome::Ignored;
    }

    let entity = spawn_surface_node(world, root, snapshot);
    world
        .resource_mut::<SurfaceRegistry>()
        .insert(snapshot.id, entity);
    ReconcileOutcome::Created(entity)
}

fn remove_surface(world: &mut World, anchor: AnchorId) -> ReconcileOutcome {
    let Some(entity) = world
        .get_resource_mut::<SurfaceRegistry>()
        .and_then(|mut registry| registry.remove(anchor))
    else {
        return ReconcileOutcome::Ignored;
    };

    detach_surface_node(world, entity);
    ReconcileOutcome::Removed(entity)
}

/// Drain the session's anchor stream, one update at a time, in arrival order.
///
/// Each update is fully applied before the next one is pulled. At most
/// `max_updates_per_frame` are handled per call; the rest stay queued.
pub fn reconcile_anchor_updates(world: &mut World) {
    let budget = world
        .get_resource::<SurfaceStyle>()
        .map_or(MAX_UPDATES_PER_FRAME, |style| style.max_updates_per_frame)
        .max(1);

    for _ in 0..budget {
        let Some(update) = world
            .get_resource_mut::<SurfaceDetection>()
            .and_then(|mut detection| detection.poll_next())
        else {
            break;
        };

        let outcome = apply_anchor_update(world, &update);
        debug!("{:?} {} -> {:?}", update.kind, update.anchor(), outcome);
    }
}
