//! Pattern fill: grid partition, candidate generation, clipping and the
//! parallel run that ties them together
//!
//! # Submodules
//! - `types` - Sections, per-section results, outlines and the report
//! - `sections` - Vertical split of the board into overlapping sections
//! - `generator` - Circle/square candidates on the grid
//! - `clipper` - Containment and obstacle clipping of one candidate
//! - `coordinator` - Worker pool, per-section tasks and timeouts
//! - `pipeline` - `run_fill`, the full run against a geometry provider

mod types;
mod sections;
mod generator;
mod clipper;
mod coordinator;
mod pipeline;

pub use types::{
    Section,
    SectionStats,
    SectionResult,
    FillOutline,
    FillReport,
    FillOutput,
};

pub use sections::split_into_sections;

pub use generator::{
    make_shape,
    generate_candidates,
    estimate_total_shapes,
    CIRCLE_SEGMENTS,
};

pub use clipper::{
    ShapeClipper,
    ClipOutcome,
    RejectReason,
    Containment,
};

pub use coordinator::{
    worker_count,
    process_section,
    run_sections,
    MAX_WORKERS,
};

pub use pipeline::run_fill;
