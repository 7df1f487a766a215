//! Geometric primitives: area, arc/circle interpolation, squares
//!
//! Every point produced here goes through [`Point::new`], so results are
//! already snapped to the fixed precision.

use super::types::{Point, Polygon, Ring};
use std::f64::consts::{PI, TAU};

/// Default chord count for an arc
pub const ARC_STEPS: usize = 10;

/// Default chord count for a full circle
pub const CIRCLE_STEPS: usize = 32;

/// Shoelace area over the cyclic ring.
/// Positive for counter-clockwise winding, negative for clockwise.
pub fn signed_area(ring: &[Point]) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..ring.len() {
        let a = ring[i];
        let b = ring[(i + 1) % ring.len()];
        sum += a.x * b.y - b.x * a.y;
    }
    sum / 2.0
}

/// Sample `steps + 1` points along the arc from `start` to `end` around `center`.
///
/// The sweep always runs with increasing angle; when the end angle is below
/// the start angle a full turn is added to it.
pub fn interpolate_arc(start: Point, end: Point, center: Point, steps: usize) -> Vec<Point> {
    let steps = steps.max(1);
    let radius = start.distance(&center);
    let a1 = (start.y - center.y).atan2(start.x - center.x);
    let mut a2 = (end.y - center.y).atan2(end.x - center.x);
    if a2 < a1 {
        a2 += TAU;
    }

    (0..=steps)
        .map(|i| {
            let a = a1 + (a2 - a1) * i as f64 / steps as f64;
            Point::new(center.x + radius * a.cos(), center.y + radius * a.sin())
        })
        .collect()
}

/// Sample a circle (or a circular span) given its center and a point on it.
///
/// A full turn uses `steps` chords; a partial span scales the chord count to
/// the swept angle with a minimum of 2. Returns `chords + 1` points, so a
/// full circle ends on its starting point.
pub fn interpolate_circle(
    center: Point,
    radius_point: Point,
    start_angle: f64,
    end_angle: f64,
    steps: usize,
) -> Vec<Point> {
    let radius = center.distance(&radius_point);
    let mut end_angle = end_angle;
    if end_angle < start_angle {
        end_angle += TAU;
    }

    let span = end_angle - start_angle;
    let chords = if (span - TAU).abs() < 1e-6 {
        steps.max(1)
    } else {
        ((steps as f64 * span / TAU) as usize).max(2)
    };

    (0..=chords)
        .map(|i| {
            let a = start_angle + span * i as f64 / chords as f64;
            Point::new(center.x + radius * a.cos(), center.y + radius * a.sin())
        })
        .collect()
}

/// Full circle with the default chord count
pub fn interpolate_full_circle(center: Point, radius_point: Point) -> Vec<Point> {
    interpolate_circle(center, radius_point, 0.0, TAU, CIRCLE_STEPS)
}

/// The 4 axis-aligned corners spanned by two opposite corners
pub fn build_square(corner1: Point, corner2: Point) -> Ring {
    vec![
        Point::new(corner1.x, corner1.y),
        Point::new(corner2.x, corner1.y),
        Point::new(corner2.x, corner2.y),
        Point::new(corner1.x, corner2.y),
    ]
}

/// Regular polygon with vertices on the given radius
pub fn regular_polygon(center: Point, radius: f64, segments: usize) -> Polygon {
    let segments = segments.max(3);
    let ring = (0..segments)
        .map(|i| {
            let a = TAU * i as f64 / segments as f64;
            Point::new(center.x + radius * a.cos(), center.y + radius * a.sin())
        })
        .collect();
    Polygon::new(ring)
}

/// Polygon that covers the true circle: vertices sit on the circumscribing
/// radius so every edge stays outside the circle.
pub fn circle_polygon(center: Point, radius: f64, segments: usize) -> Polygon {
    let segments = segments.max(3);
    regular_polygon(center, circumscribed_radius(radius, segments), segments)
}

/// Radius whose inscribed `segments`-gon touches a circle of `radius`
pub fn circumscribed_radius(radius: f64, segments: usize) -> f64 {
    radius / (PI / segments as f64).cos()
}
