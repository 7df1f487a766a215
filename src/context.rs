//! Run context threaded through the fill stages
//!
//! Carries the caller's cancel token, an optional progress callback and the
//! per-stage timings that end up in the report.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, info_span, warn};

use crate::error::FillError;

/// Shared flag a caller flips to stop the run between phases
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Pipeline phase, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    EdgeContours,
    BoardOutline,
    Zones,
    Masks,
    Tracks,
    Pads,
    Vias,
    Partition,
    MainLoop,
    Collect,
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Stage::EdgeContours => "edge_contours",
            Stage::BoardOutline => "board_outline",
            Stage::Zones => "zones",
            Stage::Masks => "masks",
            Stage::Tracks => "tracks",
            Stage::Pads => "pads",
            Stage::Vias => "vias",
            Stage::Partition => "partition",
            Stage::MainLoop => "main_loop",
            Stage::Collect => "collect",
        }
    }
}

pub type ProgressFn = Box<dyn Fn(u8, &str) + Send + Sync>;

#[derive(Default)]
pub struct FillContext {
    cancel: CancelToken,
    progress: Option<ProgressFn>,
    timings: IndexMap<Stage, Duration>,
}

impl FillContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn with_progress<F>(mut self, progress: F) -> Self
    where
        F: Fn(u8, &str) + Send + Sync + 'static,
    {
        self.progress = Some(Box::new(progress));
        self
    }

    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    /// Report progress, then stop with `Cancelled` if the token is set
    pub fn checkpoint(&self, percent: u8, message: &str) -> Result<(), FillError> {
        if self.cancel.is_cancelled() {
            warn!(percent, "fill cancelled before '{}'", message);
            return Err(FillError::Cancelled);
        }
        self.report_progress(percent, message);
        Ok(())
    }

    pub fn report_progress(&self, percent: u8, message: &str) {
        if let Some(progress) = &self.progress {
            progress(percent.min(100), message);
        }
    }

    /// Run `f` as `stage`, recording its duration
    pub fn time<T>(&mut self, stage: Stage, f: impl FnOnce() -> T) -> T {
        let span = info_span!("stage", name = stage.name());
        let _guard = span.enter();
        let start = Instant::now();
        let out = f();
        let elapsed = start.elapsed();
        info!(elapsed_ms = elapsed.as_secs_f64() * 1000.0, "stage finished");
        *self.timings.entry(stage).or_default() += elapsed;
        out
    }

    pub fn timings(&self) -> &IndexMap<Stage, Duration> {
        &self.timings
    }
}

impl std::fmt::Debug for FillContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FillContext")
            .field("cancelled", &self.cancel.is_cancelled())
            .field("progress", &self.progress.is_some())
            .field("timings", &self.timings)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_checkpoint_reports_progress() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let ctx = FillContext::new().with_progress(move |p, msg| {
            sink.lock().unwrap().push((p, msg.to_string()));
        });
        ctx.checkpoint(15, "Building edges").unwrap();
        ctx.checkpoint(120, "Done").unwrap();
        let seen = seen.lock().unwrap();
        assert_eq!(seen[0], (15, "Building edges".to_string()));
        assert_eq!(seen[1].0, 100);
    }

    #[test]
    fn test_checkpoint_observes_cancel() {
        let token = CancelToken::new();
        let ctx = FillContext::new().with_cancel(token.clone());
        assert!(ctx.checkpoint(10, "start").is_ok());
        token.cancel();
        assert!(matches!(ctx.checkpoint(20, "next"), Err(FillError::Cancelled)));
    }

    #[test]
    fn test_time_records_stages_in_order() {
        let mut ctx = FillContext::new();
        let v = ctx.time(Stage::Zones, || 7);
        ctx.time(Stage::EdgeContours, || ());
        ctx.time(Stage::Zones, || ());
        assert_eq!(v, 7);
        let stages: Vec<Stage> = ctx.timings().keys().copied().collect();
        assert_eq!(stages, vec![Stage::Zones, Stage::EdgeContours]);
    }
}
