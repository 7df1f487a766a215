//! Per-category obstacle builders
//!
//! Zones, masks and board edges keep the user board margin; copper that
//! carries a net (tracks, pads, vias) keeps the board's minimum clearance.

use tracing::debug;

use super::{ObstacleKind, ObstacleLayer};
use crate::geometry::{
    capsule, circle_polygon, dilate_all, erode, nm_to_um, ClipRegion, Polygon, Ring,
    BUFFER_SEGMENTS,
};
use crate::provider::{GeometryProvider, NmPoint};

fn ring_polygon(points: &[NmPoint]) -> Polygon {
    Polygon::new(points.iter().map(|p| p.to_um()).collect())
}

fn finish(kind: ObstacleKind, polygons: &[Polygon], radius: f64, source_count: usize) -> ObstacleLayer {
    let region = ClipRegion::new(dilate_all(polygons, radius));
    debug!(
        kind = kind.label(),
        items = source_count,
        parts = region.shape().len(),
        "obstacle layer built"
    );
    ObstacleLayer {
        kind,
        region,
        source_count,
    }
}

/// Outer contour shrunk by the board margin
pub fn board_region(outer: &Ring, margin: f64) -> ClipRegion {
    ClipRegion::new(erode(&Polygon::new(outer.clone()), margin))
}

/// Interior cutouts grown by the board margin
pub fn cutout_layer(cutouts: &[Ring], margin: f64) -> ObstacleLayer {
    let polygons: Vec<Polygon> = cutouts.iter().cloned().map(Polygon::new).collect();
    finish(ObstacleKind::Cutouts, &polygons, margin, cutouts.len())
}

/// Zone outlines on `layer` grown by the board margin. The zone called
/// `skip_name` is the fill being replaced and is left out.
pub fn zone_layer<P: GeometryProvider + ?Sized>(
    provider: &P,
    layer: &str,
    margin: f64,
    skip_name: &str,
) -> ObstacleLayer {
    let polygons: Vec<Polygon> = provider
        .zones(layer)
        .iter()
        .filter(|z| z.name != skip_name)
        .map(|z| ring_polygon(&z.outline))
        .collect();
    let count = polygons.len();
    finish(ObstacleKind::Zones, &polygons, margin, count)
}

/// Solder mask openings for `layer` grown by the board margin
pub fn mask_layer<P: GeometryProvider + ?Sized>(provider: &P, layer: &str, margin: f64) -> ObstacleLayer {
    let polygons: Vec<Polygon> = provider
        .solder_masks(layer)
        .iter()
        .map(|outline| ring_polygon(outline))
        .collect();
    let count = polygons.len();
    finish(ObstacleKind::Masks, &polygons, margin, count)
}

/// One capsule of radius `width / 2 + clearance` per track segment
pub fn track_layer<P: GeometryProvider + ?Sized>(provider: &P, layer: &str, clearance: f64) -> ObstacleLayer {
    let tracks = provider.tracks(layer);
    let capsules: Vec<Polygon> = tracks
        .iter()
        .map(|t| {
            let radius = nm_to_um(t.width) as f64 / 2.0 + clearance;
            capsule(t.start.to_um(), t.end.to_um(), radius)
        })
        .collect();
    finish(ObstacleKind::Tracks, &capsules, 0.0, tracks.len())
}

/// Pad polygons grown by the clearance
pub fn pad_layer<P: GeometryProvider + ?Sized>(provider: &P, layer: &str, clearance: f64) -> ObstacleLayer {
    let polygons: Vec<Polygon> = provider.pads(layer).iter().map(|p| ring_polygon(p)).collect();
    let count = polygons.len();
    finish(ObstacleKind::Pads, &polygons, clearance, count)
}

/// One disc of radius `diameter / 2 + clearance` per via
pub fn via_layer<P: GeometryProvider + ?Sized>(provider: &P, layer: &str, clearance: f64) -> ObstacleLayer {
    let vias = provider.vias(layer);
    let discs: Vec<Polygon> = vias
        .iter()
        .map(|v| {
            let radius = nm_to_um(v.diameter) as f64 / 2.0 + clearance;
            circle_polygon(v.position.to_um(), radius, BUFFER_SEGMENTS)
        })
        .collect();
    finish(ObstacleKind::Vias, &discs, 0.0, vias.len())
}
