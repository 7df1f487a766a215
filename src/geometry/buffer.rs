//! Polygon buffering (clearance inflation and margin erosion)
//!
//! A buffer of radius `r` is the Minkowski sum with a disc. It is built from
//! boolean operations only: the polygon plus a capsule of radius `r` around
//! every ring edge. Dilation unions the capsules in, erosion subtracts them.

use super::boolean::{difference, snap, union};
use super::primitives::{circle_polygon, circumscribed_radius};
use super::types::{MultiPolygon, Point, Polygon};
use std::f64::consts::PI;

/// Chords per full turn for capsule ends and discs
pub const BUFFER_SEGMENTS: usize = 32;

/// Capsule of `radius` around the segment `a`→`b`; a disc when the segment
/// has zero length. Vertices sit on the circumscribing radius so the polygon
/// covers the true capsule.
pub fn capsule(a: Point, b: Point, radius: f64) -> Polygon {
    if a == b {
        return circle_polygon(a, radius, BUFFER_SEGMENTS);
    }

    let half = BUFFER_SEGMENTS / 2;
    let r = circumscribed_radius(radius, BUFFER_SEGMENTS);
    let theta = (b.y - a.y).atan2(b.x - a.x);
    let mut ring = Vec::with_capacity(2 * (half + 1));

    // half turn around `b`, right side to left side
    for i in 0..=half {
        let angle = theta - PI / 2.0 + PI * i as f64 / half as f64;
        ring.push(Point::new(b.x + r * angle.cos(), b.y + r * angle.sin()));
    }
    // half turn around `a`, left side back to right side
    for i in 0..=half {
        let angle = theta + PI / 2.0 + PI * i as f64 / half as f64;
        ring.push(Point::new(a.x + r * angle.cos(), a.y + r * angle.sin()));
    }

    Polygon::new(ring)
}

/// Capsules around every edge of every ring of `polygon`
fn edge_capsules(polygon: &Polygon, radius: f64) -> Vec<Polygon> {
    polygon
        .rings()
        .flat_map(|ring| {
            (0..ring.len()).filter_map(move |i| {
                let a = ring[i];
                let b = ring[(i + 1) % ring.len()];
                (a != b).then(|| capsule(a, b, radius))
            })
        })
        .collect()
}

/// Grow `polygon` outward by `radius`
pub fn dilate(polygon: &Polygon, radius: f64) -> MultiPolygon {
    dilate_all(std::slice::from_ref(polygon), radius)
}

/// Grow every polygon by `radius` and union the results
pub fn dilate_all(polygons: &[Polygon], radius: f64) -> MultiPolygon {
    if radius <= 0.0 {
        let snapped: Vec<Polygon> = polygons.iter().filter_map(snap).collect();
        return union(&snapped);
    }

    let mut parts: Vec<Polygon> = polygons.iter().filter_map(snap).collect();
    let capsules: Vec<Polygon> = parts.iter().flat_map(|p| edge_capsules(p, radius)).collect();
    parts.extend(capsules);
    union(&parts)
}

/// Shrink `polygon` inward by `radius`
pub fn erode(polygon: &Polygon, radius: f64) -> MultiPolygon {
    let Some(snapped) = snap(polygon) else {
        return MultiPolygon::default();
    };
    let base = union([&snapped]);
    if radius <= 0.0 {
        return base;
    }
    let capsules = edge_capsules(&snapped, radius);
    difference(&base, &capsules)
}
