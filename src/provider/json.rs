//! JSON-file backed geometry provider
//!
//! Lets the engine run on a board exported to JSON instead of a live host
//! session. Layout:
//!
//! ```json
//! {
//!   "min_clearance": 200000,
//!   "bounding_box": { "x": 0, "y": 0, "width": 10000000, "height": 10000000 },
//!   "edges": [ { "type": "line", "start": [0, 0], "end": [10000000, 0] } ],
//!   "layers": { "F.Cu": { "zones": [], "tracks": [], "pads": [], "vias": [] } },
//!   "masks": { "F.Mask": [ [[0, 0], [1000, 0], [1000, 1000]] ] }
//! }
//! ```

use anyhow::Context;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::types::{EdgePrimitive, NmPoint, NmRect, TrackSegment, ViaPad, ZoneOutline};
use super::GeometryProvider;

/// Geometry of one copper layer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CopperLayer {
    pub zones: Vec<ZoneOutline>,
    pub tracks: Vec<TrackSegment>,
    pub pads: Vec<Vec<NmPoint>>,
    pub vias: Vec<ViaPad>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JsonBoard {
    pub min_clearance: i64,
    /// Computed from the edge shapes when absent
    pub bounding_box: Option<NmRect>,
    pub edges: Vec<EdgePrimitive>,
    pub layers: IndexMap<String, CopperLayer>,
    pub masks: IndexMap<String, Vec<Vec<NmPoint>>>,
}

/// Solder mask layer paired with an outer copper layer
pub fn mask_layer_for(copper_layer: &str) -> Option<&'static str> {
    match copper_layer {
        "F.Cu" => Some("F.Mask"),
        "B.Cu" => Some("B.Mask"),
        _ => None,
    }
}

impl JsonBoard {
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read board file {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("failed to parse board file {}", path.display()))
    }

    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    fn layer(&self, name: &str) -> Option<&CopperLayer> {
        self.layers.get(name)
    }

    /// Bounding box of every edge primitive
    fn edges_bounding_box(&self) -> NmRect {
        let mut points = self.edges.iter().flat_map(EdgePrimitive::extent);
        let Some(first) = points.next() else {
            return NmRect::from_corners(NmPoint::new(0, 0), NmPoint::new(0, 0));
        };
        let (min, max) = points.fold((first, first), |(min, max), p| {
            (
                NmPoint::new(min.x.min(p.x), min.y.min(p.y)),
                NmPoint::new(max.x.max(p.x), max.y.max(p.y)),
            )
        });
        NmRect::from_corners(min, max)
    }
}

impl GeometryProvider for JsonBoard {
    fn board_edges(&self) -> Vec<EdgePrimitive> {
        self.edges.clone()
    }

    fn zones(&self, layer: &str) -> Vec<ZoneOutline> {
        self.layer(layer).map(|l| l.zones.clone()).unwrap_or_default()
    }

    fn solder_masks(&self, layer: &str) -> Vec<Vec<NmPoint>> {
        mask_layer_for(layer)
            .and_then(|mask| self.masks.get(mask))
            .cloned()
            .unwrap_or_default()
    }

    fn tracks(&self, layer: &str) -> Vec<TrackSegment> {
        self.layer(layer).map(|l| l.tracks.clone()).unwrap_or_default()
    }

    fn pads(&self, layer: &str) -> Vec<Vec<NmPoint>> {
        self.layer(layer).map(|l| l.pads.clone()).unwrap_or_default()
    }

    fn vias(&self, layer: &str) -> Vec<ViaPad> {
        self.layer(layer).map(|l| l.vias.clone()).unwrap_or_default()
    }

    fn min_clearance_nm(&self) -> i64 {
        self.min_clearance
    }

    fn bounding_box(&self) -> NmRect {
        self.bounding_box.unwrap_or_else(|| self.edges_bounding_box())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOARD: &str = r#"{
        "min_clearance": 200000,
        "edges": [
            { "type": "rect", "start": [0, 0], "end": [10000000, 8000000] },
            { "type": "circle", "center": [5000000, 4000000], "radius_point": [5500000, 4000000] }
        ],
        "layers": {
            "F.Cu": {
                "tracks": [ { "start": [1000000, 1000000], "end": [2000000, 1000000], "width": 250000 } ],
                "vias": [ { "position": [3000000, 3000000], "diameter": 600000 } ]
            }
        },
        "masks": { "F.Mask": [ [[0, 0], [100000, 0], [100000, 100000]] ] }
    }"#;

    #[test]
    fn test_parse_board() {
        let board = JsonBoard::from_json(BOARD).unwrap();
        assert_eq!(board.min_clearance_nm(), 200_000);
        assert_eq!(board.board_edges().len(), 2);
        assert_eq!(board.tracks("F.Cu").len(), 1);
        assert_eq!(board.vias("F.Cu").len(), 1);
        assert!(board.tracks("B.Cu").is_empty());
    }

    #[test]
    fn test_masks_follow_copper_side() {
        let board = JsonBoard::from_json(BOARD).unwrap();
        assert_eq!(board.solder_masks("F.Cu").len(), 1);
        assert!(board.solder_masks("B.Cu").is_empty());
        assert!(board.solder_masks("In1.Cu").is_empty());
    }

    #[test]
    fn test_bounding_box_from_edges() {
        let board = JsonBoard::from_json(BOARD).unwrap();
        let bbox = board.bounding_box();
        assert_eq!(bbox, NmRect { x: 0, y: 0, width: 10_000_000, height: 8_000_000 });
    }

    #[test]
    fn test_explicit_bounding_box_wins() {
        let mut board = JsonBoard::from_json(BOARD).unwrap();
        let rect = NmRect { x: -5, y: -5, width: 10, height: 10 };
        board.bounding_box = Some(rect);
        assert_eq!(board.bounding_box(), rect);
    }
}
