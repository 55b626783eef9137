use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use constants::surface::DEFAULT_MINIMUM_BOUNDS;

use super::anchor::{AnchorSnapshot, PlaneAlignment, PlaneClassification};

/// Which planes the session asks for and which ones get an overlay.
///
/// The same value is handed to the provider when the session starts and
/// used by the reconciler to filter individual anchors.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaneDetectionConfig {
    /// `None` accepts any alignment.
    pub alignment: Option<PlaneAlignment>,
    /// Empty accepts any classification.
    pub classifications: Vec<PlaneClassification>,
    /// Smallest extent, width by height, a plane needs before it gets a
    /// surface. Already tracked surfaces keep updating below it.
    pub minimum_bounds: Vec2,
}

impl Default for PlaneDetectionConfig {
    fn default() -> Self {
        Self {
            alignment: Some(PlaneAlignment::Horizontal),
            classifications: vec![PlaneClassification::Table],
            minimum_bounds: Vec2::splat(DEFAULT_MINIMUM_BOUNDS),
        }
    }
}

impl PlaneDetectionConfig {
    /// Accept any horizontal plane regardless of classification.
    pub fn any_horizontal() -> Self {
        Self {
            alignment: Some(PlaneAlignment::Horizontal),
            classifications: Vec::new(),
            ..default()
        }
    }

    /// Whether a not yet tracked anchor should get a surface.
    pub fn accepts(&self, snapshot: &AnchorSnapshot) -> bool {
        self.accepts_plane(snapshot) && self.meets_minimum_bounds(snapshot)
    }

    /// Alignment and classification only.
    pub fn accepts_plane(&self, snapshot: &AnchorSnapshot) -> bool {
        let alignment_ok = self
            .alignment
            .is_none_or(|alignment| alignment == snapshot.alignment);
        let class_ok = self.classifications.is_empty()
            || self.classifications.contains(&snapshot.classification);
        alignment_ok && class_ok
    }

    pub fn meets_minimum_bounds(&self, snapshot: &AnchorSnapshot) -> bool {
        snapshot.extent().cmpge(self.minimum_bounds).all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracking::anchor::AnchorId;

    fn plane(classification: PlaneClassification, alignment: PlaneAlignment) -> AnchorSnapshot {
        AnchorSnapshot {
            id: AnchorId(3),
            classification,
            alignment,
            extent_width: 0.5,
            extent_height: 0.5,
            anchor_transform: Mat4::IDENTITY,
            extent_to_anchor_transform: Mat4::IDENTITY,
        }
    }

    #[test]
    fn default_accepts_horizontal_tables_only() {
        let config = PlaneDetectionConfig::default();
        assert!(config.accepts(&plane(PlaneClassification::Table, PlaneAlignment::Horizontal)));
        assert!(!config.accepts(&plane(PlaneClassification::Wall, PlaneAlignment::Vertical)));
        assert!(!config.accepts(&plane(PlaneClassification::Floor, PlaneAlignment::Horizontal)));
        assert!(!config.accepts(&plane(PlaneClassification::Table, PlaneAlignment::Slanted)));
    }

    #[test]
    fn empty_class_list_accepts_any_class() {
        let config = PlaneDetectionConfig::any_horizontal();
        assert!(config.accepts(&plane(PlaneClassification::Floor, PlaneAlignment::Horizontal)));
        assert!(config.accepts(&plane(PlaneClassification::Unknown, PlaneAlignment::Horizontal)));
        assert!(!config.accepts(&plane(PlaneClassification::Wall, PlaneAlignment::Vertical)));
    }

    #[test]
    fn small_planes_are_rejected_until_minimum_bounds() {
        let config = PlaneDetectionConfig::default();
        let mut small = plane(PlaneClassification::Table, PlaneAlignment::Horizontal);
        small.extent_width = 0.05;
        small.extent_height = 0.05;
        assert!(!config.accepts(&small));
        assert!(config.accepts_plane(&small));

        small.extent_width = 0.2;
        small.extent_height = 0.2;
        assert!(config.accepts(&small));

        // Both sides must reach the bound.
        small.extent_height = 0.19;
        assert!(!config.accepts(&small));
    }

    #[test]
    fn minimum_bounds_come_from_json() {
        let config: PlaneDetectionConfig =
            serde_json::from_str(r#"{ "minimum_bounds": [0.0, 0.0] }"#).unwrap();
        let mut tiny = plane(PlaneClassification::Table, PlaneAlignment::Horizontal);
        tiny.extent_width = 0.01;
        tiny.extent_height = 0.01;
        assert!(config.accepts(&tiny));
        assert_eq!(PlaneDetectionConfig::default().minimum_bounds, Vec2::splat(0.2));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: PlaneDetectionConfig =
            serde_json::from_str(r#"{ "classifications": ["seat", "table"] }"#).unwrap();
        assert_eq!(config.alignment, Some(PlaneAlignment::Horizontal));
        assert_eq!(
            config.classifications,
            vec![PlaneClassification::Seat, PlaneClassification::Table]
        );

        let any: PlaneDetectionConfig =
            serde_json::from_str(r#"{ "alignment": null }"#).unwrap();
        assert!(any.accepts(&plane(PlaneClassification::Table, PlaneAlignment::Vertical)));
    }
}
