//! Copper pattern fill for PCB layers
//!
//! Reads a board through a [`GeometryProvider`], rebuilds its outline, merges
//! every obstacle on the target copper layer into clearance-inflated regions
//! and fills the remaining space with a grid of circles or squares, clipped
//! in parallel, one board section per worker.
//!
//! ```ignore
//! let board = JsonBoard::from_file("board.json")?;
//! let mut ctx = FillContext::new();
//! let output = run_fill(&board, &FillConfig::default(), &mut ctx)?;
//! println!("{} outlines", output.outlines.len());
//! ```

pub mod config;
pub mod context;
pub mod contour;
pub mod error;
pub mod fill;
pub mod geometry;
pub mod obstacles;
pub mod provider;

pub use config::{BoardClasses, FillConfig, FillParams, ShapeKind};
pub use context::{CancelToken, FillContext, Stage};
pub use error::FillError;
pub use fill::{run_fill, FillOutline, FillOutput, FillReport};
pub use provider::{GeometryProvider, JsonBoard};

/// Install a stderr `tracing` subscriber filtered by `RUST_LOG`, `info` when unset
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialise logging: {}", e))?;

    Ok(())
}
