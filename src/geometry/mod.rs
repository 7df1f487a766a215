//! Geometry module for the fill engine
//!
//! Fixed-precision micron geometry plus the polygon machinery the fill
//! pipeline is built on.
//!
//! # Submodules
//! - `types` - Point, Polygon, MultiPolygon, Bounds
//! - `primitives` - Signed area, arc/circle interpolation, squares
//! - `units` - Nanometre / micron / millimetre conversion
//! - `boolean` - Union, intersection and difference via `i_overlay`
//! - `buffer` - Dilation and erosion by a radius
//! - `spatial` - R-tree indexed clip regions

mod types;
mod primitives;
mod units;
mod boolean;
mod buffer;
mod spatial;

pub use types::{
    round_coord,
    Point,
    Ring,
    Bounds,
    Polygon,
    MultiPolygon,
    PRECISION,
};

pub use primitives::{
    signed_area,
    interpolate_arc,
    interpolate_circle,
    interpolate_full_circle,
    build_square,
    regular_polygon,
    circle_polygon,
    circumscribed_radius,
    ARC_STEPS,
    CIRCLE_STEPS,
};

pub use units::{
    nm_to_um,
    um_to_nm,
    mm_to_um,
    SCALE,
};

pub use boolean::{
    union,
    intersection,
    difference,
    snap,
};

pub use buffer::{
    capsule,
    dilate,
    dilate_all,
    erode,
    BUFFER_SEGMENTS,
};

pub use spatial::ClipRegion;
