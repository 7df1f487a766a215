//! Board contour reconstruction from edge-layer primitives
//!
//! # Submodules
//! - `chain` - Segment flattening and end-to-end chaining
//! - `classify` - Outer boundary / cutout split

mod chain;
mod classify;

pub use chain::{
    Segment,
    SegmentSource,
    ArcSpec,
    CircleSpec,
    EdgeShapes,
    ChainOutcome,
    flatten_segments,
    chain_segments,
    build_polygons,
};

pub use classify::{
    BoardContours,
    split_outer,
};

use tracing::{info, warn};

use crate::error::FillError;
use crate::provider::EdgePrimitive;

/// Result of rebuilding the board edge layer
#[derive(Debug, Clone)]
pub struct ContourBuild {
    pub contours: BoardContours,
    /// Chains that never closed; dropped from the outline
    pub open_chains: usize,
}

/// Rebuild the outer board contour and cutouts from host edge primitives
pub fn build_board_contours(primitives: &[EdgePrimitive]) -> Result<ContourBuild, FillError> {
    let shapes = EdgeShapes::from_primitives(primitives);
    let outcome = build_polygons(&shapes);

    if outcome.open_chains > 0 {
        warn!(
            open_chains = outcome.open_chains,
            "edge layer has chains that do not close; they are left out of the outline"
        );
    }

    let polygon_count = outcome.closed.len();
    let contours = split_outer(outcome.closed).ok_or(FillError::NoBoardOutline)?;
    info!(
        contours = polygon_count,
        cutouts = contours.cutouts.len(),
        "board edge contours built"
    );

    Ok(ContourBuild {
        contours,
        open_chains: outcome.open_chains,
    })
}
