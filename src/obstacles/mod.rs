//! Obstacle aggregation: everything the fill must keep away from
//!
//! Each category becomes one unioned, clearance-inflated region indexed for
//! the clipper. The board outline itself becomes the containment region.
//!
//! # Submodules
//! - `layers` - Per-category builders (cutouts, zones, masks, tracks, pads, vias)

mod layers;

pub use layers::{
    board_region,
    cutout_layer,
    zone_layer,
    mask_layer,
    track_layer,
    pad_layer,
    via_layer,
};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::geometry::ClipRegion;

/// Obstacle category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObstacleKind {
    Cutouts,
    Zones,
    Masks,
    Tracks,
    Pads,
    Vias,
}

impl ObstacleKind {
    /// Order in which the clipper subtracts the categories
    pub const SUBTRACTION_ORDER: [ObstacleKind; 6] = [
        ObstacleKind::Cutouts,
        ObstacleKind::Zones,
        ObstacleKind::Masks,
        ObstacleKind::Tracks,
        ObstacleKind::Pads,
        ObstacleKind::Vias,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ObstacleKind::Cutouts => "cutouts",
            ObstacleKind::Zones => "zones",
            ObstacleKind::Masks => "masks",
            ObstacleKind::Tracks => "tracks",
            ObstacleKind::Pads => "pads",
            ObstacleKind::Vias => "vias",
        }
    }
}

/// One inflated, unioned obstacle category
#[derive(Debug)]
pub struct ObstacleLayer {
    pub kind: ObstacleKind,
    pub region: ClipRegion,
    /// Native items that went into the region
    pub source_count: usize,
}

impl ObstacleLayer {
    pub fn empty(kind: ObstacleKind) -> Self {
        Self {
            kind,
            region: ClipRegion::empty(),
            source_count: 0,
        }
    }
}

/// Board containment region plus the six subtraction categories.
/// Built once before the workers start and shared read-only.
#[derive(Debug)]
pub struct ObstacleSet {
    /// Outer contour eroded by the board margin
    pub board: ClipRegion,
    pub cutouts: ObstacleLayer,
    pub zones: ObstacleLayer,
    pub masks: ObstacleLayer,
    pub tracks: ObstacleLayer,
    pub pads: ObstacleLayer,
    pub vias: ObstacleLayer,
}

impl ObstacleSet {
    /// Set with only a board region; every category empty
    pub fn board_only(board: ClipRegion) -> Self {
        Self {
            board,
            cutouts: ObstacleLayer::empty(ObstacleKind::Cutouts),
            zones: ObstacleLayer::empty(ObstacleKind::Zones),
            masks: ObstacleLayer::empty(ObstacleKind::Masks),
            tracks: ObstacleLayer::empty(ObstacleKind::Tracks),
            pads: ObstacleLayer::empty(ObstacleKind::Pads),
            vias: ObstacleLayer::empty(ObstacleKind::Vias),
        }
    }

    pub fn layer(&self, kind: ObstacleKind) -> &ObstacleLayer {
        match kind {
            ObstacleKind::Cutouts => &self.cutouts,
            ObstacleKind::Zones => &self.zones,
            ObstacleKind::Masks => &self.masks,
            ObstacleKind::Tracks => &self.tracks,
            ObstacleKind::Pads => &self.pads,
            ObstacleKind::Vias => &self.vias,
        }
    }

    /// Replace the layer of the same kind
    pub fn set_layer(&mut self, layer: ObstacleLayer) {
        let slot = match layer.kind {
            ObstacleKind::Cutouts => &mut self.cutouts,
            ObstacleKind::Zones => &mut self.zones,
            ObstacleKind::Masks => &mut self.masks,
            ObstacleKind::Tracks => &mut self.tracks,
            ObstacleKind::Pads => &mut self.pads,
            ObstacleKind::Vias => &mut self.vias,
        };
        *slot = layer;
    }

    /// Subtraction layers in clipping order
    pub fn subtraction_layers(&self) -> impl Iterator<Item = &ObstacleLayer> {
        ObstacleKind::SUBTRACTION_ORDER
            .into_iter()
            .map(move |k| self.layer(k))
    }

    pub fn source_counts(&self) -> IndexMap<ObstacleKind, usize> {
        self.subtraction_layers()
            .map(|l| (l.kind, l.source_count))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Bounds, MultiPolygon};

    #[test]
    fn test_subtraction_order() {
        let set = ObstacleSet::board_only(ClipRegion::empty());
        let kinds: Vec<ObstacleKind> = set.subtraction_layers().map(|l| l.kind).collect();
        assert_eq!(kinds, ObstacleKind::SUBTRACTION_ORDER.to_vec());
    }

    #[test]
    fn test_set_layer_replaces_matching_slot() {
        let mut set = ObstacleSet::board_only(ClipRegion::empty());
        set.set_layer(ObstacleLayer {
            kind: ObstacleKind::Pads,
            region: ClipRegion::new(MultiPolygon::from(
                Bounds::new(0.0, 0.0, 1.0, 1.0).to_polygon(),
            )),
            source_count: 3,
        });
        assert_eq!(set.pads.source_count, 3);
        assert!(set.vias.region.is_empty());
        let counts = set.source_counts();
        assert_eq!(counts[&ObstacleKind::Pads], 3);
        assert_eq!(counts.len(), 6);
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&ObstacleKind::Vias).unwrap(), "\"vias\"");
    }
}
