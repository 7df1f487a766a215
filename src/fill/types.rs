//! Fill data types: sections, per-section results and the run report

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::ShapeKind;
use crate::context::Stage;
use crate::geometry::{um_to_nm, Bounds, Polygon, Ring};
use crate::obstacles::ObstacleKind;
use crate::provider::NmPoint;

/// Vertical slice of the board handled by one worker
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub index: usize,
    pub bounds: Bounds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionStats {
    pub index: usize,
    pub bounds: Bounds,
    pub generated: usize,
    pub accepted: usize,
    pub shape_time: Duration,
    pub clip_time: Duration,
}

/// Accepted residual polygons of one section, in generation order
#[derive(Debug, Clone)]
pub struct SectionResult {
    pub stats: SectionStats,
    pub shapes: Vec<Polygon>,
}

/// One accepted outline in nanometres
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FillOutline {
    pub points: Vec<NmPoint>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub holes: Vec<Vec<NmPoint>>,
}

fn ring_to_nm(ring: &Ring) -> Vec<NmPoint> {
    ring.iter()
        .map(|p| NmPoint::new(um_to_nm(p.x), um_to_nm(p.y)))
        .collect()
}

impl From<&Polygon> for FillOutline {
    fn from(polygon: &Polygon) -> Self {
        Self {
            points: ring_to_nm(&polygon.exterior),
            holes: polygon.holes.iter().map(ring_to_nm).collect(),
        }
    }
}

/// Summary of a fill run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FillReport {
    pub layer: String,
    pub kind: ShapeKind,
    /// µm
    pub size: f64,
    /// µm
    pub step: f64,
    pub workers: usize,
    pub estimated_shapes: usize,
    pub generated: usize,
    pub accepted: usize,
    pub duplicates_removed: usize,
    pub sections: Vec<SectionStats>,
    pub obstacle_counts: IndexMap<ObstacleKind, usize>,
    pub open_chains: usize,
    pub stage_timings: IndexMap<Stage, Duration>,
}

impl FillReport {
    /// Share of generated candidates that survived clipping, percent
    pub fn accepted_percent(&self) -> f64 {
        if self.generated == 0 {
            0.0
        } else {
            self.accepted as f64 * 100.0 / self.generated as f64
        }
    }
}

/// Outlines ready for the host plus the run report
#[derive(Debug, Clone)]
pub struct FillOutput {
    pub outlines: Vec<FillOutline>,
    pub report: FillReport,
}
