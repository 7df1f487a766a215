//! Candidate clipping against containment boundaries and obstacles
//!
//! A candidate first has to lie inside the section rectangle and the eroded
//! board; it is then cut by every obstacle category in order. Within and
//! disjoint tests come from the overlay results themselves: an intersection
//! or difference whose area equals the input's left it untouched.

use serde::{Deserialize, Serialize};

use crate::geometry::{difference, intersection, ClipRegion, MultiPolygon, Polygon};
use crate::obstacles::{ObstacleKind, ObstacleSet};

/// Relative tolerance when comparing areas before and after an overlay
const AREA_TOLERANCE: f64 = 1e-6;

fn same_area(a: f64, b: f64) -> bool {
    (a - b).abs() <= AREA_TOLERANCE * a.abs().max(b.abs()).max(1.0)
}

/// Boundary a candidate must stay inside
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Containment {
    Section,
    Board,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// No overlap with a containment boundary
    Outside(Containment),
    /// Entirely inside an obstacle
    Covered(ObstacleKind),
    /// Residual area at or below the threshold
    BelowMinArea,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClipOutcome {
    Accepted(MultiPolygon),
    Rejected(RejectReason),
}

impl ClipOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, ClipOutcome::Accepted(_))
    }
}

pub struct ShapeClipper<'a> {
    containment: Vec<(Containment, &'a ClipRegion)>,
    subtraction: Vec<(ObstacleKind, &'a ClipRegion)>,
    min_area: f64,
}

impl<'a> ShapeClipper<'a> {
    /// Clipper for one section: section rectangle then eroded board, then
    /// the obstacle categories in subtraction order
    pub fn new(section: &'a ClipRegion, obstacles: &'a ObstacleSet, min_area: f64) -> Self {
        Self::from_parts(
            vec![
                (Containment::Section, section),
                (Containment::Board, &obstacles.board),
            ],
            obstacles
                .subtraction_layers()
                .map(|layer| (layer.kind, &layer.region))
                .collect(),
            min_area,
        )
    }

    pub fn from_parts(
        containment: Vec<(Containment, &'a ClipRegion)>,
        subtraction: Vec<(ObstacleKind, &'a ClipRegion)>,
        min_area: f64,
    ) -> Self {
        Self {
            containment,
            subtraction,
            min_area,
        }
    }

    pub fn process(&self, candidate: Polygon) -> ClipOutcome {
        let mut current = MultiPolygon::from(candidate);

        for (boundary, region) in &self.containment {
            let Some(bounds) = current.bounds() else {
                return ClipOutcome::Rejected(RejectReason::Outside(*boundary));
            };
            let parts = region.parts_near(&bounds);
            if parts.is_empty() {
                return ClipOutcome::Rejected(RejectReason::Outside(*boundary));
            }
            let clipped = intersection(&current, parts);
            if clipped.is_empty() {
                return ClipOutcome::Rejected(RejectReason::Outside(*boundary));
            }
            if !same_area(clipped.area(), current.area()) {
                current = clipped;
            }
        }

        for (kind, region) in &self.subtraction {
            let Some(bounds) = current.bounds() else {
                return ClipOutcome::Rejected(RejectReason::Covered(*kind));
            };
            let parts = region.parts_near(&bounds);
            if parts.is_empty() {
                continue;
            }
            let remaining = difference(&current, parts);
            if remaining.is_empty() {
                return ClipOutcome::Rejected(RejectReason::Covered(*kind));
            }
            if !same_area(remaining.area(), current.area()) {
                current = remaining;
            }
        }

        if current.area() <= self.min_area {
            return ClipOutcome::Rejected(RejectReason::BelowMinArea);
        }
        ClipOutcome::Accepted(current)
    }
}
