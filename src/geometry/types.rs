//! Core geometry types for the fill engine
//!
//! All coordinates are microns held as `f64` and snapped to a fixed
//! precision of 0.01 µm. Two points are equal when their snapped values are
//! equal, which is what lets independently computed segment endpoints meet
//! during contour chaining.

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Snapping grid: hundredths of a micron
pub const PRECISION: f64 = 100.0;

/// Round a coordinate to the fixed precision
pub fn round_coord(value: f64) -> f64 {
    (value * PRECISION).round() / PRECISION
}

/// A 2D point in microns
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a point snapped to the fixed precision
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: round_coord(x),
            y: round_coord(y),
        }
    }

    /// Integer key in hundredths of a micron
    pub fn key(&self) -> (i64, i64) {
        (
            (self.x * PRECISION).round() as i64,
            (self.y * PRECISION).round() as i64,
        )
    }

    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Point {}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

/// A ring of points; the closing edge back to the first point is implicit
pub type Ring = Vec<Point>;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self { min_x, min_y, max_x, max_y }
    }

    /// Bounds of a point set, `None` when empty
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bounds = Bounds::new(first.x, first.y, first.x, first.y);
        for p in iter {
            bounds.min_x = bounds.min_x.min(p.x);
            bounds.min_y = bounds.min_y.min(p.y);
            bounds.max_x = bounds.max_x.max(p.x);
            bounds.max_y = bounds.max_y.max(p.y);
        }
        Some(bounds)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds::new(
            self.min_x.min(other.min_x),
            self.min_y.min(other.min_y),
            self.max_x.max(other.max_x),
            self.max_y.max(other.max_y),
        )
    }

    /// Closed-interval overlap test (touching boxes intersect)
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.min_x <= other.max_x
            && other.min_x <= self.max_x
            && self.min_y <= other.max_y
            && other.min_y <= self.max_y
    }

    /// Rectangle polygon covering these bounds
    pub fn to_polygon(&self) -> Polygon {
        Polygon::new(vec![
            Point::new(self.min_x, self.min_y),
            Point::new(self.max_x, self.min_y),
            Point::new(self.max_x, self.max_y),
            Point::new(self.min_x, self.max_y),
        ])
    }

    pub fn as_array(&self) -> [f64; 4] {
        [self.min_x, self.min_y, self.max_x, self.max_y]
    }
}

/// A filled polygon with optional holes
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Polygon {
    pub exterior: Ring,
    pub holes: Vec<Ring>,
}

impl Polygon {
    pub fn new(exterior: Ring) -> Self {
        Self {
            exterior,
            holes: Vec::new(),
        }
    }

    pub fn with_holes(exterior: Ring, holes: Vec<Ring>) -> Self {
        Self { exterior, holes }
    }

    /// Filled area: exterior minus holes
    pub fn area(&self) -> f64 {
        let holes: f64 = self
            .holes
            .iter()
            .map(|h| super::signed_area(h).abs())
            .sum();
        super::signed_area(&self.exterior).abs() - holes
    }

    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(&self.exterior)
    }

    /// Every ring, exterior first
    pub fn rings(&self) -> impl Iterator<Item = &Ring> {
        std::iter::once(&self.exterior).chain(self.holes.iter())
    }
}

/// A set of disjoint polygons
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MultiPolygon(pub Vec<Polygon>);

impl MultiPolygon {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn area(&self) -> f64 {
        self.0.iter().map(Polygon::area).sum()
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.0
            .iter()
            .filter_map(Polygon::bounds)
            .reduce(|a, b| a.union(&b))
    }

    pub fn polygons(&self) -> &[Polygon] {
        &self.0
    }

    pub fn into_polygons(self) -> Vec<Polygon> {
        self.0
    }
}

impl From<Polygon> for MultiPolygon {
    fn from(polygon: Polygon) -> Self {
        MultiPolygon(vec![polygon])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_equality_after_rounding() {
        let a = Point::new(10.004, 20.0);
        let b = Point::new(10.0, 19.996);
        assert_eq!(a, b);
        assert_ne!(Point::new(10.0, 20.0), Point::new(10.01, 20.0));
    }

    #[test]
    fn test_bounds_intersects_touching() {
        let a = Bounds::new(0.0, 0.0, 10.0, 10.0);
        let b = Bounds::new(10.0, 0.0, 20.0, 10.0);
        let c = Bounds::new(10.5, 0.0, 20.0, 10.0);
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_polygon_area_with_hole() {
        let outer = Bounds::new(0.0, 0.0, 10.0, 10.0).to_polygon().exterior;
        let hole = Bounds::new(2.0, 2.0, 4.0, 4.0).to_polygon().exterior;
        let poly = Polygon::with_holes(outer, vec![hole]);
        assert!((poly.area() - 96.0).abs() < 1e-9);
    }
}
