//! Geometry provider: the read-only view of the host board
//!
//! Everything crossing this boundary is in integer nanometres. The engine
//! converts to microns on the way in and back to nanometres on the way out.
//!
//! # Submodules
//! - `types` - Native board primitives (edge shapes, zones, tracks, vias)
//! - `json` - A JSON-file backed provider for running without a host

mod types;
mod json;

pub use types::{
    NmPoint,
    NmRect,
    EdgePrimitive,
    ZoneOutline,
    TrackSegment,
    ViaPad,
};

pub use json::{
    JsonBoard,
    CopperLayer,
    mask_layer_for,
};

/// Read-only access to the board geometry needed for one fill run
pub trait GeometryProvider {
    /// Shapes drawn on the board edge layer
    fn board_edges(&self) -> Vec<EdgePrimitive>;

    /// Copper zone outlines on `layer`
    fn zones(&self, layer: &str) -> Vec<ZoneOutline>;

    /// Solder mask outlines paired with copper `layer`; empty for inner layers
    fn solder_masks(&self, layer: &str) -> Vec<Vec<NmPoint>>;

    /// Track centerlines on `layer`
    fn tracks(&self, layer: &str) -> Vec<TrackSegment>;

    /// Effective pad polygons on `layer`
    fn pads(&self, layer: &str) -> Vec<Vec<NmPoint>>;

    /// Vias crossing `layer`
    fn vias(&self, layer: &str) -> Vec<ViaPad>;

    /// Board-wide minimum copper clearance
    fn min_clearance_nm(&self) -> i64;

    /// Bounding box of the board edge shapes
    fn bounding_box(&self) -> NmRect;
}
