use bevy::prelude::*;

use super::factory::surface_mesh;
use super::registry::SurfaceNode;
use crate::tracking::anchor::AnchorSnapshot;

/// True when either extent moved further than `tolerance` away from the
/// extent the current mesh was built for.
pub fn exceeds_size_tolerance(node: &SurfaceNode, extent: Vec2, tolerance: f32) -> bool {
    (extent.x - node.width).abs() > tolerance || (extent.y - node.height).abs() > tolerance
}

/// Refresh an existing surface in place from a newer snapshot.
///
/// The transform is always recomposed from the snapshot. The mesh is only
/// regenerated past the size tolerance, and the stored extent only moves
/// when it is, so sub-threshold jitter cannot accumulate silently.
///
/// Returns whether the mesh was rebuilt, or `None` if `entity` is not a
/// live surface node.
pub fn update_surface_node(
    world: &mut World,
    entity: Entity,
    snapshot: &AnchorSnapshot,
    tolerance: f32,
) -> Option<bool> {
    let rebuild = exceeds_size_tolerance(
        world.get::<SurfaceNode>(entity)?,
        snapshot.extent(),
        tolerance,
    );

    let mesh = rebuild.then(|| {
        world
            .resource_mut::<Assets<Mesh>>()
            .add(surface_mesh(snapshot.extent_width, snapshot.extent_height))
    });

    let mut node = world.get_entity_mut(entity).ok()?;
    if let Some(mesh) = mesh {
        // Replacing the handle releases the previous mesh asset.
        node.insert(Mesh3d(mesh));
        if let Some(mut surface) = node.get_mut::<SurfaceNode>() {
            surface.width = snapshot.extent_width;
            surface.height = snapshot.extent_height;
            surface.geometry_revision += 1;
        }
    }
    node.insert(Transform::from_matrix(snapshot.world_transform()));

    Some(rebuild)
}
