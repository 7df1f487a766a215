//! Native board primitives in nanometres

use serde::{Deserialize, Serialize};

use crate::geometry::{nm_to_um, Bounds, Point};

/// Integer point in nanometres, serialized as `[x, y]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[i64; 2]", into = "[i64; 2]")]
pub struct NmPoint {
    pub x: i64,
    pub y: i64,
}

impl NmPoint {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Working-unit point (truncating nm → µm)
    pub fn to_um(self) -> Point {
        Point::new(nm_to_um(self.x) as f64, nm_to_um(self.y) as f64)
    }
}

impl From<[i64; 2]> for NmPoint {
    fn from([x, y]: [i64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<NmPoint> for [i64; 2] {
    fn from(p: NmPoint) -> Self {
        [p.x, p.y]
    }
}

/// Rectangle as position + size, the way the host reports bounding boxes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NmRect {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl NmRect {
    pub fn from_corners(min: NmPoint, max: NmPoint) -> Self {
        Self {
            x: min.x,
            y: min.y,
            width: max.x - min.x,
            height: max.y - min.y,
        }
    }

    /// Working-unit bounds (truncating nm → µm)
    pub fn to_bounds(&self) -> Bounds {
        let min = NmPoint::new(self.x, self.y).to_um();
        let max = NmPoint::new(self.end_x(), self.end_y()).to_um();
        Bounds::new(min.x, min.y, max.x, max.y)
    }

    pub fn end_x(&self) -> i64 {
        self.x + self.width
    }

    pub fn end_y(&self) -> i64 {
        self.y + self.height
    }
}

/// A shape on the board edge layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EdgePrimitive {
    Line { start: NmPoint, end: NmPoint },
    Arc { start: NmPoint, end: NmPoint, center: NmPoint },
    /// Circle given by its center and any point on it
    Circle { center: NmPoint, radius_point: NmPoint },
    /// Axis-aligned rectangle given by two opposite corners
    Rect { start: NmPoint, end: NmPoint },
    Polygon { points: Vec<NmPoint> },
}

impl EdgePrimitive {
    /// Extreme points of the primitive, for bounding boxes
    pub fn extent(&self) -> Vec<NmPoint> {
        match self {
            EdgePrimitive::Line { start, end } | EdgePrimitive::Rect { start, end } => {
                vec![*start, *end]
            }
            EdgePrimitive::Arc { start, end, center } => {
                // conservative: the full circle the arc lies on
                let r = radius_nm(*center, *start);
                vec![
                    *start,
                    *end,
                    NmPoint::new(center.x - r, center.y - r),
                    NmPoint::new(center.x + r, center.y + r),
                ]
            }
            EdgePrimitive::Circle { center, radius_point } => {
                let r = radius_nm(*center, *radius_point);
                vec![
                    NmPoint::new(center.x - r, center.y - r),
                    NmPoint::new(center.x + r, center.y + r),
                ]
            }
            EdgePrimitive::Polygon { points } => points.clone(),
        }
    }
}

fn radius_nm(center: NmPoint, on_circle: NmPoint) -> i64 {
    let dx = (on_circle.x - center.x) as f64;
    let dy = (on_circle.y - center.y) as f64;
    dx.hypot(dy).ceil() as i64
}

/// Copper zone outline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneOutline {
    #[serde(default)]
    pub name: String,
    pub outline: Vec<NmPoint>,
}

/// Straight track segment with its copper width
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackSegment {
    pub start: NmPoint,
    pub end: NmPoint,
    pub width: i64,
}

/// Via copper pad: position and outer diameter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViaPad {
    pub position: NmPoint,
    pub diameter: i64,
}
