use bevy::prelude::*;

use super::registry::SurfaceNode;
use super::style::SurfaceStyle;
use crate::tracking::anchor::AnchorSnapshot;

/// Smallest extent a surface mesh is built with
const MIN_SURFACE_EXTENT: f32 = 0.001;

/// Shared translucent material for every surface node.
#[derive(Resource, Clone)]
pub struct SurfaceMaterial(pub Handle<StandardMaterial>);

/// Flat rectangle of the given extent in the local XY plane, facing +Z.
/// Orientation comes entirely from the node's transform.
pub fn surface_mesh(width: f32, height: f32) -> Mesh {
    Mesh::from(Rectangle::new(
        width.max(MIN_SURFACE_EXTENT),
        height.max(MIN_SURFACE_EXTENT),
    ))
}

pub fn surface_material(style: &SurfaceStyle) -> StandardMaterial {
    StandardMaterial {
        base_color: style.base_color(),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        double_sided: true,
        cull_mode: None,
        perceptual_roughness: 1.0,
        ..default()
    }
}

/// Create the shared surface material once.
pub fn setup_surface_material(world: &mut World) {
    if world.contains_resource::<SurfaceMaterial>() {
        return;
    }

    let style = world
        .get_resource::<SurfaceStyle>()
        .cloned()
        .unwrap_or_default();
    let handle = match world.get_resource_mut::<Assets<StandardMaterial>>() {
        Some(mut materials) => materials.add(surface_material(&style)),
        None => {
            warn!("No material assets available; surfaces will use the default material");
            return;
        }
    };
    world.insert_resource(SurfaceMaterial(handle));
}

/// Keep the shared material in step with the configured style.
pub fn apply_surface_style(
    style: Res<SurfaceStyle>,
    surface_material: Option<Res<SurfaceMaterial>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let Some(surface_material) = surface_material else {
        return;
    };
    if let Some(material) = materials.get_mut(&surface_material.0) {
        material.base_color = style.base_color();
    }
}

/// Build a surface node for `snapshot` and attach it under `root`.
pub fn spawn_surface_node(world: &mut World, root: Entity, snapshot: &AnchorSnapshot) -> Entity {
    let mesh = world
        .resource_mut::<Assets<Mesh>>()
        .add(surface_mesh(snapshot.extent_width, snapshot.extent_height));
    let material = world
        .get_resource::<SurfaceMaterial>()
        .map(|material| material.0.clone())
        .unwrap_or_default();

    world
        .spawn((
            SurfaceNode::from_snapshot(snapshot),
            Mesh3d(mesh),
            MeshMaterial3d(material),
            Transform::from_matrix(snapshot.world_transform()),
            Name::new(format!("surface_{}", snapshot.id)),
            ChildOf(root),
        ))
        .id()
}
