//! Parallel section processing
//!
//! One task per section on a fixed-size rayon pool. Results come back over a
//! channel and are reassembled in section order, so the output does not
//! depend on which worker finishes first. A task that panics, fails or stays
//! silent past the timeout aborts the whole run.

use rayon::ThreadPoolBuilder;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, error};

use super::clipper::{ClipOutcome, ShapeClipper};
use super::generator::generate_candidates;
use super::types::{Section, SectionResult, SectionStats};
use crate::config::FillParams;
use crate::error::FillError;
use crate::geometry::ClipRegion;
use crate::obstacles::ObstacleSet;

/// Upper bound on the default worker count
pub const MAX_WORKERS: usize = 10;

/// Worker count: the override when given, otherwise the physical core
/// count clamped to `1..=MAX_WORKERS`
pub fn worker_count(requested: Option<usize>) -> usize {
    match requested {
        Some(n) => n.max(1),
        None => num_cpus::get_physical().clamp(1, MAX_WORKERS),
    }
}

/// Generate and clip every candidate of one section
pub fn process_section(section: &Section, params: &FillParams, obstacles: &ObstacleSet) -> SectionResult {
    let shape_start = Instant::now();
    let candidates = generate_candidates(&section.bounds, params);
    let shape_time = shape_start.elapsed();

    let clip_start = Instant::now();
    let region = ClipRegion::rectangle(&section.bounds);
    let clipper = ShapeClipper::new(&region, obstacles, params.min_area);
    let generated = candidates.len();
    let mut accepted = 0;
    let mut shapes = Vec::new();
    for candidate in candidates {
        if let ClipOutcome::Accepted(residual) = clipper.process(candidate) {
            accepted += 1;
            shapes.extend(residual.into_polygons());
        }
    }
    let clip_time = clip_start.elapsed();

    debug!(
        section = section.index,
        generated,
        accepted,
        shape_ms = shape_time.as_secs_f64() * 1000.0,
        clip_ms = clip_time.as_secs_f64() * 1000.0,
        "section processed"
    );

    SectionResult {
        stats: SectionStats {
            index: section.index,
            bounds: section.bounds,
            generated,
            accepted,
            shape_time,
            clip_time,
        },
        shapes,
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "worker panicked".to_string()
    }
}

type TaskOutcome = thread::Result<Result<SectionResult, FillError>>;

enum TaskEvent {
    Started(usize, Instant),
    Finished(usize, TaskOutcome),
}

/// Slot of the unfinished task whose clock started first, and its deadline.
/// Queued tasks have no clock yet; with none running the wait restarts from now.
fn next_deadline(started: &[Option<Instant>], done: &[bool], timeout: Duration) -> (Option<usize>, Instant) {
    started
        .iter()
        .zip(done)
        .enumerate()
        .filter(|(_, (_, done))| !**done)
        .filter_map(|(slot, (start, _))| start.map(|t| (slot, t)))
        .min_by_key(|(_, t)| *t)
        .map_or((None, Instant::now() + timeout), |(slot, t)| (Some(slot), t + timeout))
}

/// Run `task` for every section on a pool of `workers` threads.
///
/// Each task gets `timeout` from the moment a worker picks it up, no matter
/// how many other sections report in the meantime. Results are returned in
/// section order. A hung worker is abandoned with the pool.
pub fn run_sections<F>(
    sections: &[Section],
    workers: usize,
    timeout: Duration,
    task: F,
) -> Result<Vec<SectionResult>, FillError>
where
    F: Fn(&Section) -> Result<SectionResult, FillError> + Send + Sync + 'static,
{
    let pool = ThreadPoolBuilder::new()
        .num_threads(workers.max(1))
        .thread_name(|i| format!("fill-worker-{}", i))
        .build()?;

    let task = Arc::new(task);
    let (tx, rx) = mpsc::channel::<TaskEvent>();
    for (slot, section) in sections.iter().copied().enumerate() {
        let tx = tx.clone();
        let task = Arc::clone(&task);
        pool.spawn(move || {
            // receiver gone means the run was already aborted
            let _ = tx.send(TaskEvent::Started(slot, Instant::now()));
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| (*task)(&section)));
            let _ = tx.send(TaskEvent::Finished(slot, outcome));
        });
    }
    drop(tx);

    let mut started: Vec<Option<Instant>> = vec![None; sections.len()];
    let mut done = vec![false; sections.len()];
    let mut results: Vec<Option<SectionResult>> = sections.iter().map(|_| None).collect();
    let mut pending = sections.len();
    while pending > 0 {
        let (running, deadline) = next_deadline(&started, &done, timeout);
        let event = match rx.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
            Ok(event) => event,
            Err(_) => {
                let slot = running.or_else(|| done.iter().position(|d| !d)).unwrap_or(0);
                let section = sections.get(slot).map_or(0, |s| s.index);
                error!(section, ?timeout, "section timed out; aborting fill");
                return Err(FillError::SectionTimeout { section, timeout });
            }
        };
        let (slot, outcome) = match event {
            TaskEvent::Started(slot, at) => {
                started[slot] = Some(at);
                continue;
            }
            TaskEvent::Finished(slot, outcome) => (slot, outcome),
        };
        let section = sections[slot].index;
        let result = match outcome {
            Ok(Ok(result)) => result,
            Ok(Err(err)) => {
                let message = err.to_string();
                error!(section, error = message.as_str(), "section failed; aborting fill");
                return Err(FillError::SectionFailed { section, message });
            }
            Err(payload) => {
                let message = panic_message(payload);
                error!(section, error = message.as_str(), "section worker panicked; aborting fill");
                return Err(FillError::SectionFailed { section, message });
            }
        };
        done[slot] = true;
        results[slot] = Some(result);
        pending -= 1;
    }

    Ok(results.into_iter().flatten().collect())
}
