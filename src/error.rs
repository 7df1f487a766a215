//! Error type for the fill engine
//!
//! Open board chains and sub-threshold residuals are not errors; they are
//! counted in the report instead.

use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FillError {
    /// No closed contour could be built from the board edge layer
    #[error("no closed board outline found on the edge layer")]
    NoBoardOutline,

    #[error("invalid fill configuration: {0}")]
    InvalidConfig(String),

    /// Caller asked to stop; raised only between phases
    #[error("fill cancelled by user")]
    Cancelled,

    #[error("section {section} failed: {message}")]
    SectionFailed { section: usize, message: String },

    #[error("section {section} did not finish within {timeout:?}")]
    SectionTimeout { section: usize, timeout: Duration },

    #[error("failed to build worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

impl FillError {
    /// Cancellation is reported to the user, not treated as a failure
    pub fn is_cancellation(&self) -> bool {
        matches!(self, FillError::Cancelled)
    }
}
