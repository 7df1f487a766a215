//! The fill run: contours, obstacles, partition, parallel clip, collect

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use super::coordinator::{process_section, run_sections, worker_count};
use super::generator::estimate_total_shapes;
use super::sections::split_into_sections;
use super::types::{FillOutline, FillOutput, FillReport};
use crate::config::{FillConfig, FillParams};
use crate::context::{FillContext, Stage};
use crate::contour::build_board_contours;
use crate::error::FillError;
use crate::geometry::nm_to_um;
use crate::obstacles::{
    board_region, cutout_layer, mask_layer, pad_layer, track_layer, via_layer, zone_layer,
    ObstacleSet,
};
use crate::provider::GeometryProvider;

/// Fill the empty space of `config.layer_name` with the configured pattern.
///
/// Nothing is written back to the host: the accepted outlines come back in
/// nanometres together with a report. Any section failure aborts the whole
/// run without partial output.
pub fn run_fill<P: GeometryProvider + ?Sized>(
    provider: &P,
    config: &FillConfig,
    ctx: &mut FillContext,
) -> Result<FillOutput, FillError> {
    config.validate()?;
    let params = FillParams::from_config(config);
    let layer = config.layer_name.as_str();
    let clearance = nm_to_um(provider.min_clearance_nm()) as f64;
    info!(
        layer,
        kind = %params.kind,
        size = params.size,
        step = params.step,
        margin = params.board_margin,
        clearance,
        "starting fill"
    );

    ctx.checkpoint(15, "Building board edge contours")?;
    let build = ctx.time(Stage::EdgeContours, || build_board_contours(&provider.board_edges()))?;

    ctx.checkpoint(20, "Preparing board outline")?;
    let mut obstacles = ctx.time(Stage::BoardOutline, || {
        let mut set = ObstacleSet::board_only(board_region(&build.contours.outer, params.board_margin));
        set.set_layer(cutout_layer(&build.contours.cutouts, params.board_margin));
        set
    });

    ctx.checkpoint(25, "Collecting zones")?;
    let zones = ctx.time(Stage::Zones, || {
        zone_layer(provider, layer, params.board_margin, &config.fill_zone_name)
    });
    obstacles.set_layer(zones);

    ctx.checkpoint(30, "Collecting solder masks")?;
    let masks = ctx.time(Stage::Masks, || mask_layer(provider, layer, params.board_margin));
    obstacles.set_layer(masks);

    ctx.checkpoint(35, "Collecting tracks")?;
    let tracks = ctx.time(Stage::Tracks, || track_layer(provider, layer, clearance));
    obstacles.set_layer(tracks);

    ctx.checkpoint(40, "Collecting pads")?;
    let pads = ctx.time(Stage::Pads, || pad_layer(provider, layer, clearance));
    obstacles.set_layer(pads);

    ctx.checkpoint(45, "Collecting vias")?;
    let vias = ctx.time(Stage::Vias, || via_layer(provider, layer, clearance));
    obstacles.set_layer(vias);

    let obstacle_counts = obstacles.source_counts();
    info!(?obstacle_counts, "obstacles ready");

    ctx.checkpoint(50, "Filling sections")?;
    let workers = worker_count(config.workers);
    let bbox = provider.bounding_box().to_bounds();
    let sections = ctx.time(Stage::Partition, || {
        split_into_sections(&bbox, workers, params.size, params.step)
    });
    let estimated_shapes = estimate_total_shapes(&bbox, params.size, params.step);
    info!(workers, sections = sections.len(), estimated_shapes, "board partitioned");

    let shared = Arc::new(obstacles);
    let task_obstacles = Arc::clone(&shared);
    let timeout = Duration::from_secs(config.section_timeout_secs);
    let results = ctx.time(Stage::MainLoop, || {
        run_sections(&sections, workers, timeout, move |section| {
            Ok(process_section(section, &params, &task_obstacles))
        })
    })?;

    ctx.checkpoint(90, "Collecting results")?;
    let (outlines, section_stats, duplicates_removed) = ctx.time(Stage::Collect, || {
        let mut seen = HashSet::new();
        let mut duplicates = 0;
        let mut outlines = Vec::new();
        let mut stats = Vec::with_capacity(results.len());
        for result in results {
            for polygon in &result.shapes {
                let outline = FillOutline::from(polygon);
                if config.dedupe_overlap && !seen.insert(outline.clone()) {
                    duplicates += 1;
                    continue;
                }
                outlines.push(outline);
            }
            stats.push(result.stats);
        }
        (outlines, stats, duplicates)
    });

    let report = FillReport {
        layer: config.layer_name.clone(),
        kind: params.kind,
        size: params.size,
        step: params.step,
        workers,
        estimated_shapes,
        generated: section_stats.iter().map(|s| s.generated).sum(),
        accepted: section_stats.iter().map(|s| s.accepted).sum(),
        duplicates_removed,
        sections: section_stats,
        obstacle_counts,
        open_chains: build.open_chains,
        stage_timings: ctx.timings().clone(),
    };
    info!(
        generated = report.generated,
        accepted = report.accepted,
        accepted_percent = report.accepted_percent(),
        outlines = outlines.len(),
        duplicates_removed,
        "fill finished"
    );
    ctx.report_progress(100, "Done");

    Ok(FillOutput { outlines, report })
}
