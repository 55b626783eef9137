use bevy::prelude::*;
use constants::class::{get_plane_class_id, get_plane_class_name};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a physical surface for as long as it is tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnchorId(pub u64);

impl fmt::Display for AnchorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "anchor#{:016x}", self.0)
    }
}

/// Semantic category reported for a detected plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaneClassification {
    Unknown,
    Wall,
    Floor,
    Ceiling,
    Table,
    Seat,
    Window,
    Door,
    NotAvailable,
    Undetermined,
}

impl PlaneClassification {
    const ALL: [Self; 10] = [
        Self::Unknown,
        Self::Wall,
        Self::Floor,
        Self::Ceiling,
        Self::Table,
        Self::Seat,
        Self::Window,
        Self::Door,
        Self::NotAvailable,
        Self::Undetermined,
    ];

    /// Numeric code shared with the provider layer.
    pub fn id(self) -> u8 {
        match self {
            Self::Unknown => 0,
            Self::Wall => 1,
            Self::Floor => 2,
            Self::Ceiling => 3,
            Self::Table => 4,
            Self::Seat => 5,
            Self::Window => 6,
            Self::Door => 7,
            Self::NotAvailable => 8,
            Self::Undetermined => 9,
        }
    }

    /// Unmapped codes collapse to `Unknown`.
    pub fn from_id(id: u8) -> Self {
        Self::ALL
            .into_iter()
            .find(|class| class.id() == id)
            .unwrap_or(Self::Unknown)
    }

    /// Case-insensitive lookup by wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        get_plane_class_id(name).map(Self::from_id)
    }

    pub fn name(self) -> &'static str {
        get_plane_class_name(self.id())
    }
}

/// Orientation of a detected plane relative to gravity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaneAlignment {
    Horizontal,
    Vertical,
    Slanted,
}

/// Immutable state of an anchor as delivered with a single event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnchorSnapshot {
    pub id: AnchorId,
    pub classification: PlaneClassification,
    pub alignment: PlaneAlignment,
    pub extent_width: f32,
    pub extent_height: f32,
    /// Anchor space to world space.
    pub anchor_transform: Mat4,
    /// Extent space (where the rectangle lives) to anchor space.
    pub extent_to_anchor_transform: Mat4,
}

impl AnchorSnapshot {
    /// World placement of the extent rectangle.
    ///
    /// Always composed from the two delivered matrices; callers must not
    /// cache the result across events.
    pub fn world_transform(&self) -> Mat4 {
        self.anchor_transform * self.extent_to_anchor_transform
    }

    pub fn extent(&self) -> Vec2 {
        Vec2::new(self.extent_width, self.extent_height)
    }
}

/// Lifecycle step reported for an anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnchorEventKind {
    Added,
    Updated,
    Removed,
}

/// One element of the anchor event stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnchorUpdate {
    pub kind: AnchorEventKind,
    pub snapshot: AnchorSnapshot,
}

impl AnchorUpdate {
    pub fn added(snapshot: AnchorSnapshot) -> Self {
        Self {
            kind: AnchorEventKind::Added,
            snapshot,
        }
    }

    pub fn updated(snapshot: AnchorSnapshot) -> Self {
        Self {
            kind: AnchorEventKind::Updated,
            snapshot,
        }
    }

    pub fn removed(snapshot: AnchorSnapshot) -> Self {
        Self {
            kind: AnchorEventKind::Removed,
            snapshot,
        }
    }

    pub fn anchor(&self) -> AnchorId {
        self.snapshot.id
    }
}
