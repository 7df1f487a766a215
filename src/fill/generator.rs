//! Candidate shape generation on the fill grid

use crate::config::{FillParams, ShapeKind};
use crate::geometry::{regular_polygon, Bounds, Point, Polygon};

/// Vertices of a circular fill element
pub const CIRCLE_SEGMENTS: usize = 12;

/// One fill element at grid position `(x, y)`.
///
/// A circle is centred on the position; a square has it as its first corner.
pub fn make_shape(kind: ShapeKind, x: f64, y: f64, size: f64) -> Polygon {
    match kind {
        ShapeKind::Circle => regular_polygon(Point::new(x, y), size / 2.0, CIRCLE_SEGMENTS),
        ShapeKind::Square => Polygon::new(vec![
            Point::new(x, y),
            Point::new(x, y + size),
            Point::new(x + size, y + size),
            Point::new(x + size, y),
        ]),
    }
}

/// Grid coordinates from `start` (inclusive) up to `end` (exclusive)
fn axis(start: f64, end: f64, pitch: f64) -> impl Iterator<Item = f64> {
    (0..)
        .map(move |i| start + i as f64 * pitch)
        .take_while(move |v| *v < end)
}

/// Every candidate of a section, row by row from the bottom
pub fn generate_candidates(section: &Bounds, params: &FillParams) -> Vec<Polygon> {
    let pitch = params.pitch();
    if pitch <= 0.0 || !pitch.is_finite() {
        return Vec::new();
    }
    axis(section.min_y + params.shift_y, section.max_y, pitch)
        .flat_map(|y| {
            axis(section.min_x + params.shift_x, section.max_x, pitch)
                .map(move |x| make_shape(params.kind, x, y, params.size))
        })
        .collect()
}

/// Expected candidate count over the whole board, for progress reporting
pub fn estimate_total_shapes(bbox: &Bounds, size: f64, step: f64) -> usize {
    let pitch = size + step;
    if pitch <= 0.0 {
        return 0;
    }
    let cols = (bbox.width() / pitch).floor().max(0.0) as usize + 1;
    let rows = (bbox.height() / pitch).floor().max(0.0) as usize + 1;
    cols * rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(kind: ShapeKind, size: f64, step: f64) -> FillParams {
        FillParams {
            kind,
            size,
            step,
            shift_x: 0.0,
            shift_y: 0.0,
            board_margin: 0.0,
            min_area: 0.0,
        }
    }

    #[test]
    fn test_square_corners() {
        let sq = make_shape(ShapeKind::Square, 10.0, 20.0, 5.0);
        assert_eq!(
            sq.exterior,
            vec![
                Point::new(10.0, 20.0),
                Point::new(10.0, 25.0),
                Point::new(15.0, 25.0),
                Point::new(15.0, 20.0),
            ]
        );
    }

    #[test]
    fn test_circle_is_centred() {
        let c = make_shape(ShapeKind::Circle, 100.0, 100.0, 50.0);
        assert_eq!(c.exterior.len(), CIRCLE_SEGMENTS);
        for p in &c.exterior {
            assert!((p.distance(&Point::new(100.0, 100.0)) - 25.0).abs() < 0.01);
        }
    }

    #[test]
    fn test_row_count_matches_floor_formula() {
        // W = 10_000, pitch = 1_600 -> floor(6.25) + 1 = 7 per row
        let section = Bounds::new(0.0, 0.0, 10_000.0, 1_000.0);
        let shapes = generate_candidates(&section, &params(ShapeKind::Square, 800.0, 800.0));
        assert_eq!(shapes.len(), 7);
        assert_eq!(shapes[6].exterior[0], Point::new(9_600.0, 0.0));
    }

    #[test]
    fn test_shift_moves_grid() {
        let section = Bounds::new(0.0, 0.0, 2_000.0, 2_000.0);
        let mut p = params(ShapeKind::Square, 500.0, 500.0);
        p.shift_x = 250.0;
        p.shift_y = 100.0;
        let shapes = generate_candidates(&section, &p);
        assert_eq!(shapes.len(), 4);
        assert_eq!(shapes[0].exterior[0], Point::new(250.0, 100.0));
        assert_eq!(shapes[1].exterior[0], Point::new(1_250.0, 100.0));
    }

    #[test]
    fn test_estimate_total_shapes() {
        let bbox = Bounds::new(0.0, 0.0, 10_000.0, 10_000.0);
        assert_eq!(estimate_total_shapes(&bbox, 800.0, 800.0), 49);
    }
}
