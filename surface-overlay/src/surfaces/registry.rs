use bevy::prelude::*;
use std::collections::HashMap;

use crate::tracking::anchor::{AnchorId, AnchorSnapshot};

/// Marker for the single entity every surface node hangs under.
/// Kept at identity so a node's local transform is its world transform.
#[derive(Component)]
pub struct SurfaceRoot;

/// Per-node state the updater compares incoming snapshots against.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct SurfaceNode {
    pub anchor: AnchorId,
    /// Extent the current mesh was built for.
    pub width: f32,
    pub height: f32,
    /// Bumped every time the mesh is regenerated.
    pub geometry_revision: u32,
}

impl SurfaceNode {
    pub fn from_snapshot(snapshot: &AnchorSnapshot) -> Self {
        Self {
            anchor: snapshot.id,
            width: snapshot.extent_width,
            height: snapshot.extent_height,
            geometry_revision: 0,
        }
    }
}

/// Anchor id to owned surface entity.
///
/// An entry exists exactly when its entity is a child of the root. Only
/// the reconciler and session teardown mutate it.
#[derive(Resource, Debug)]
pub struct SurfaceRegistry {
    root: Entity,
    nodes: HashMap<AnchorId, Entity>,
}

impl SurfaceRegistry {
    pub fn new(root: Entity) -> Self {
        Self {
            root,
            nodes: HashMap::new(),
        }
    }

    pub fn root(&self) -> Entity {
        self.root
    }

    pub fn get(&self, anchor: AnchorId) -> Option<Entity> {
        self.nodes.get(&anchor).copied()
    }

    pub fn contains(&self, anchor: AnchorId) -> bool {
        self.nodes.contains_key(&anchor)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn anchors(&self) -> impl Iterator<Item = AnchorId> + '_ {
        self.nodes.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (AnchorId, Entity)> + '_ {
        self.nodes.iter().map(|(anchor, entity)| (*anchor, *entity))
    }

    pub(crate) fn insert(&mut self, anchor: AnchorId, entity: Entity) {
        self.nodes.insert(anchor, entity);
    }

    pub(crate) fn remove(&mut self, anchor: AnchorId) -> Option<Entity> {
        self.nodes.remove(&anchor)
    }

    pub(crate) fn drain(&mut self) -> Vec<(AnchorId, Entity)> {
        self.nodes.drain().collect()
    }
}

/// Spawn the surface root and its registry. Does nothing if one exists.
pub fn spawn_surface_root(world: &mut World) {
    if world.contains_resource::<SurfaceRegistry>() {
        return;
    }

    let root = world
        .spawn((
            SurfaceRoot,
            Transform::IDENTITY,
            Visibility::Visible,
            Name::new("surface_root"),
        ))
        .id();
    world.insert_resource(SurfaceRegistry::new(root));
}

/// Detach a surface from the root and despawn it. Missing entities are
/// tolerated and reported as `false`.
pub fn detach_surface_node(world: &mut World, entity: Entity) -> bool {
    match world.get_entity_mut(entity) {
        Ok(node) => {
            node.despawn();
            true
        }
        Err(_) => false,
    }
}

/// Detach every tracked surface and empty the registry. Returns how many
/// entries were removed.
pub fn teardown_surfaces(world: &mut World) -> usize {
    let drained = match world.get_resource_mut::<SurfaceRegistry>() {
        Some(mut registry) => registry.drain(),
        None => return 0,
    };

    for (anchor, entity) in &drained {
        if !detach_surface_node(world, *entity) {
            debug!("Surface for {} was already gone during teardown", anchor);
        }
    }
    drained.len()
}
