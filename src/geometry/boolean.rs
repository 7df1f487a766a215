//! Polygon boolean operations backed by `i_overlay`
//!
//! Inputs are orientation-normalised before every overlay (exterior rings
//! counter-clockwise, holes clockwise) so the non-zero fill rule merges
//! overlapping inputs instead of cancelling them. Outputs are snapped to the
//! fixed precision.

use i_overlay::core::fill_rule::FillRule;
use i_overlay::core::overlay_rule::OverlayRule;
use i_overlay::float::single::SingleFloatOverlay;

use super::primitives::signed_area;
use super::types::{MultiPolygon, Point, Polygon, Ring};

type Contour = Vec<[f64; 2]>;
type Shape = Vec<Contour>;
type Shapes = Vec<Shape>;

/// Union of any number of possibly overlapping polygons
pub fn union<'a>(polygons: impl IntoIterator<Item = &'a Polygon>) -> MultiPolygon {
    let subject = to_shapes(polygons);
    if subject.is_empty() {
        return MultiPolygon::default();
    }
    let clip: Shapes = Vec::new();
    from_shapes(subject.overlay(&clip, OverlayRule::Union, FillRule::NonZero))
}

/// Part of `subject` covered by `clip`
pub fn intersection<'a>(
    subject: &MultiPolygon,
    clip: impl IntoIterator<Item = &'a Polygon>,
) -> MultiPolygon {
    let clip = to_shapes(clip);
    if subject.is_empty() || clip.is_empty() {
        return MultiPolygon::default();
    }
    let subject = to_shapes(subject.polygons());
    from_shapes(subject.overlay(&clip, OverlayRule::Intersect, FillRule::NonZero))
}

/// Part of `subject` not covered by `clip`
pub fn difference<'a>(
    subject: &MultiPolygon,
    clip: impl IntoIterator<Item = &'a Polygon>,
) -> MultiPolygon {
    if subject.is_empty() {
        return MultiPolygon::default();
    }
    let clip = to_shapes(clip);
    if clip.is_empty() {
        return subject.clone();
    }
    let subject = to_shapes(subject.polygons());
    from_shapes(subject.overlay(&clip, OverlayRule::Difference, FillRule::NonZero))
}

/// Snap every coordinate to the fixed precision and drop what collapses
pub fn snap(polygon: &Polygon) -> Option<Polygon> {
    let exterior = clean_ring(polygon.exterior.iter().map(|p| Point::new(p.x, p.y)))?;
    let holes = polygon
        .holes
        .iter()
        .filter_map(|h| clean_ring(h.iter().map(|p| Point::new(p.x, p.y))))
        .collect();
    Some(Polygon::with_holes(exterior, holes))
}

fn to_shapes<'a>(polygons: impl IntoIterator<Item = &'a Polygon>) -> Shapes {
    polygons
        .into_iter()
        .filter(|p| p.exterior.len() >= 3)
        .map(|p| {
            let mut shape = Vec::with_capacity(1 + p.holes.len());
            shape.push(oriented(&p.exterior, true));
            for hole in p.holes.iter().filter(|h| h.len() >= 3) {
                shape.push(oriented(hole, false));
            }
            shape
        })
        .collect()
}

fn oriented(ring: &[Point], counter_clockwise: bool) -> Contour {
    let is_ccw = signed_area(ring) > 0.0;
    let contour = ring.iter().map(|p| [p.x, p.y]);
    if is_ccw == counter_clockwise {
        contour.collect()
    } else {
        contour.rev().collect()
    }
}

fn from_shapes(shapes: Shapes) -> MultiPolygon {
    let polygons = shapes
        .into_iter()
        .filter_map(|shape| {
            let mut contours = shape.into_iter();
            let exterior = clean_ring(contours.next()?.into_iter().map(|[x, y]| Point::new(x, y)))?;
            let holes = contours
                .filter_map(|c| clean_ring(c.into_iter().map(|[x, y]| Point::new(x, y))))
                .collect();
            Some(Polygon::with_holes(exterior, holes))
        })
        .collect();
    MultiPolygon(polygons)
}

/// Remove consecutive duplicates (and a repeated closing point); a ring with
/// fewer than 3 distinct vertices or no area is dropped
fn clean_ring(points: impl Iterator<Item = Point>) -> Option<Ring> {
    let mut ring: Ring = Vec::new();
    for p in points {
        if ring.last() != Some(&p) {
            ring.push(p);
        }
    }
    while ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }
    if ring.len() < 3 || signed_area(&ring) == 0.0 {
        return None;
    }
    Some(ring)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::types::Bounds;

    fn square(x: f64, y: f64, side: f64) -> Polygon {
        Bounds::new(x, y, x + side, y + side).to_polygon()
    }

    #[test]
    fn test_union_of_overlapping_squares() {
        let a = square(0.0, 0.0, 10.0);
        let b = square(5.0, 0.0, 10.0);
        let merged = union([&a, &b]);
        assert_eq!(merged.len(), 1);
        assert!((merged.area() - 150.0).abs() < 1e-6);
    }

    #[test]
    fn test_union_ignores_input_winding() {
        let a = square(0.0, 0.0, 10.0);
        let mut b = square(5.0, 5.0, 10.0);
        b.exterior.reverse();
        let merged = union([&a, &b]);
        assert!((merged.area() - 175.0).abs() < 1e-6);
    }

    #[test]
    fn test_difference_produces_hole() {
        let outer = MultiPolygon::from(square(0.0, 0.0, 10.0));
        let inner = square(4.0, 4.0, 2.0);
        let result = difference(&outer, [&inner]);
        assert_eq!(result.len(), 1);
        assert_eq!(result.polygons()[0].holes.len(), 1);
        assert!((result.area() - 96.0).abs() < 1e-6);
    }

    #[test]
    fn test_intersection_of_disjoint_is_empty() {
        let a = MultiPolygon::from(square(0.0, 0.0, 10.0));
        let b = square(20.0, 20.0, 5.0);
        assert!(intersection(&a, [&b]).is_empty());
    }

    #[test]
    fn test_difference_fully_covered_is_empty() {
        let a = MultiPolygon::from(square(2.0, 2.0, 2.0));
        let b = square(0.0, 0.0, 10.0);
        assert!(difference(&a, [&b]).is_empty());
    }

    #[test]
    fn test_snap_drops_collapsed_ring() {
        let sliver = Polygon::new(vec![
            Point { x: 0.0, y: 0.0 },
            Point { x: 0.001, y: 0.0 },
            Point { x: 0.002, y: 0.001 },
        ]);
        assert!(snap(&sliver).is_none());
    }
}
