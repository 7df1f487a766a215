//! Grid partitioning and candidate generation

use copper_filler::config::{FillParams, ShapeKind};
use copper_filler::fill::{estimate_total_shapes, generate_candidates, split_into_sections};
use copper_filler::geometry::Bounds;
use proptest::prelude::*;

fn params(size: f64, step: f64) -> FillParams {
    FillParams {
        kind: ShapeKind::Square,
        size,
        step,
        shift_x: 0.0,
        shift_y: 0.0,
        board_margin: 0.0,
        min_area: 0.0,
    }
}

proptest! {
    #[test]
    fn sections_overlap_by_one_pitch(
        width in 1_000u32..200_000,
        count in 1usize..12,
        size in 600u32..2_000,
        step in 100u32..3_000,
    ) {
        let bbox = Bounds::new(0.0, -50.0, width as f64, 5_000.0);
        let (size, step) = (size as f64, step as f64);
        let pitch = size + step;
        let sections = split_into_sections(&bbox, count, size, step);

        prop_assert_eq!(sections.len(), count);
        prop_assert_eq!(sections[0].bounds.min_x, 0.0);
        prop_assert_eq!(sections[count - 1].bounds.max_x, width as f64);

        let per_section = ((width as f64 / pitch).ceil() as usize).div_ceil(count).max(1);
        for pair in sections.windows(2) {
            let (a, b) = (&pair[0].bounds, &pair[1].bounds);
            prop_assert!((a.width() - per_section as f64 * pitch).abs() < 1e-6);
            prop_assert!((a.max_x - b.min_x - pitch).abs() < 1e-6);
        }
        for s in &sections {
            prop_assert_eq!(s.bounds.min_y, -50.0);
            prop_assert_eq!(s.bounds.max_y, 5_000.0);
        }
    }

    #[test]
    fn row_holds_floor_plus_one_candidates(
        width in 1_000u32..50_000,
        size in 600u32..2_000,
        step in 100u32..3_000,
    ) {
        let (size, step) = (size as f64, step as f64);
        let pitch = size + step;
        let width = width as f64;
        prop_assume!((width / pitch).fract() != 0.0);

        // a single row: height below one pitch
        let section = Bounds::new(0.0, 0.0, width, pitch / 2.0);
        let shapes = generate_candidates(&section, &params(size, step));
        prop_assert_eq!(shapes.len(), (width / pitch).floor() as usize + 1);
    }
}

#[test]
fn test_estimate_matches_full_grid() {
    let bbox = Bounds::new(0.0, 0.0, 10_000.0, 7_000.0);
    let shapes = generate_candidates(&bbox, &params(800.0, 800.0));
    assert_eq!(estimate_total_shapes(&bbox, 800.0, 800.0), shapes.len());
}

#[test]
fn test_every_candidate_starts_inside_its_section() {
    let bbox = Bounds::new(0.0, 0.0, 20_000.0, 3_000.0);
    for section in split_into_sections(&bbox, 4, 1_000.0, 500.0) {
        for shape in generate_candidates(&section.bounds, &params(1_000.0, 500.0)) {
            let corner = shape.exterior[0];
            assert!(corner.x >= section.bounds.min_x && corner.x < section.bounds.max_x);
        }
    }
}
