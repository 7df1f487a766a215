//! Segment chaining: closed polygons from unordered edge primitives

use std::collections::VecDeque;

use crate::geometry::{
    build_square, interpolate_arc, interpolate_full_circle, Point, Ring, ARC_STEPS,
};
use crate::provider::EdgePrimitive;

/// Where a segment came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentSource {
    Line,
    ArcChord,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
    pub source: SegmentSource,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSpec {
    pub start: Point,
    pub end: Point,
    pub center: Point,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleSpec {
    pub center: Point,
    pub radius_point: Point,
}

/// Board edge shapes in microns, grouped by kind
#[derive(Debug, Clone, Default)]
pub struct EdgeShapes {
    pub lines: Vec<(Point, Point)>,
    pub arcs: Vec<ArcSpec>,
    pub circles: Vec<CircleSpec>,
    pub squares: Vec<(Point, Point)>,
    pub polygons: Vec<Ring>,
}

impl EdgeShapes {
    /// Group host primitives by kind, converting nm → µm
    pub fn from_primitives(primitives: &[EdgePrimitive]) -> Self {
        let mut shapes = EdgeShapes::default();
        for prim in primitives {
            match prim {
                EdgePrimitive::Line { start, end } => {
                    shapes.lines.push((start.to_um(), end.to_um()));
                }
                EdgePrimitive::Arc { start, end, center } => shapes.arcs.push(ArcSpec {
                    start: start.to_um(),
                    end: end.to_um(),
                    center: center.to_um(),
                }),
                EdgePrimitive::Circle { center, radius_point } => {
                    shapes.circles.push(CircleSpec {
                        center: center.to_um(),
                        radius_point: radius_point.to_um(),
                    })
                }
                EdgePrimitive::Rect { start, end } => {
                    shapes.squares.push((start.to_um(), end.to_um()));
                }
                EdgePrimitive::Polygon { points } => {
                    shapes.polygons.push(points.iter().map(|p| p.to_um()).collect());
                }
            }
        }
        shapes
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
            && self.arcs.is_empty()
            && self.circles.is_empty()
            && self.squares.is_empty()
            && self.polygons.is_empty()
    }
}

/// Closed polygons plus the number of chains that never closed
#[derive(Debug, Clone, Default)]
pub struct ChainOutcome {
    pub closed: Vec<Ring>,
    pub open_chains: usize,
}

/// Lines and arc chords as one segment list
pub fn flatten_segments(shapes: &EdgeShapes) -> Vec<Segment> {
    let mut segments: Vec<Segment> = shapes
        .lines
        .iter()
        .map(|(a, b)| Segment {
            start: *a,
            end: *b,
            source: SegmentSource::Line,
        })
        .collect();

    for arc in &shapes.arcs {
        let points = interpolate_arc(arc.start, arc.end, arc.center, ARC_STEPS);
        segments.extend(points.windows(2).map(|w| Segment {
            start: w[0],
            end: w[1],
            source: SegmentSource::ArcChord,
        }));
    }

    segments
}

/// Splice segments end to end until no more fit.
///
/// Each chain starts from the first unused segment; every pass scans the
/// remaining segments in order and attaches any whose endpoint equals
/// either chain end. A chain whose ends meet is closed; any other chain is
/// dropped and counted.
pub fn chain_segments(segments: Vec<Segment>) -> ChainOutcome {
    let mut unused = segments;
    let mut outcome = ChainOutcome::default();

    while !unused.is_empty() {
        let seed = unused.remove(0);
        let mut chain: VecDeque<Point> = VecDeque::from([seed.start, seed.end]);

        let mut extended = true;
        while extended {
            extended = false;
            let mut i = 0;
            while i < unused.len() {
                let s = unused[i];
                let (front, back) = (chain[0], chain[chain.len() - 1]);
                if back == s.start {
                    chain.push_back(s.end);
                } else if back == s.end {
                    chain.push_back(s.start);
                } else if front == s.start {
                    chain.push_front(s.end);
                } else if front == s.end {
                    chain.push_front(s.start);
                } else {
                    i += 1;
                    continue;
                }
                unused.remove(i);
                extended = true;
            }
        }

        if chain.front() == chain.back() {
            outcome.closed.push(chain.into_iter().collect());
        } else {
            outcome.open_chains += 1;
        }
    }

    outcome
}

/// Every closed contour on the edge layer: chained lines and arcs first,
/// then circles, squares and pre-closed polygons
pub fn build_polygons(shapes: &EdgeShapes) -> ChainOutcome {
    let mut outcome = chain_segments(flatten_segments(shapes));

    for circle in &shapes.circles {
        outcome
            .closed
            .push(interpolate_full_circle(circle.center, circle.radius_point));
    }
    for (a, b) in &shapes.squares {
        outcome.closed.push(build_square(*a, *b));
    }
    for poly in &shapes.polygons {
        outcome.closed.push(poly.clone());
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::signed_area;

    fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> (Point, Point) {
        (Point::new(x1, y1), Point::new(x2, y2))
    }

    #[test]
    fn test_open_chain_is_dropped_and_counted() {
        let shapes = EdgeShapes {
            lines: vec![line(0.0, 0.0, 10.0, 0.0), line(10.0, 0.0, 10.0, 10.0)],
            ..Default::default()
        };
        let outcome = build_polygons(&shapes);
        assert!(outcome.closed.is_empty());
        assert_eq!(outcome.open_chains, 1);
    }

    #[test]
    fn test_lines_and_arc_close_a_rounded_outline() {
        // U shape closed by a half circle on top
        let shapes = EdgeShapes {
            lines: vec![
                line(0.0, 0.0, 100.0, 0.0),
                line(100.0, 0.0, 100.0, 50.0),
                line(0.0, 50.0, 0.0, 0.0),
            ],
            arcs: vec![ArcSpec {
                start: Point::new(100.0, 50.0),
                end: Point::new(0.0, 50.0),
                center: Point::new(50.0, 50.0),
            }],
            ..Default::default()
        };
        let outcome = build_polygons(&shapes);
        assert_eq!(outcome.open_chains, 0);
        assert_eq!(outcome.closed.len(), 1);
        let ring = &outcome.closed[0];
        assert_eq!(ring.first(), ring.last());
        // 3 lines + 10 arc chords -> 13 edges -> 14 points with the repeated start
        assert_eq!(ring.len(), 14);
        let expected = 100.0 * 50.0 + std::f64::consts::PI * 50.0 * 50.0 / 2.0;
        assert!((signed_area(ring).abs() - expected).abs() < expected * 0.02);
    }

    #[test]
    fn test_circles_squares_and_polygons_pass_through() {
        let shapes = EdgeShapes {
            circles: vec![CircleSpec {
                center: Point::new(0.0, 0.0),
                radius_point: Point::new(10.0, 0.0),
            }],
            squares: vec![line(0.0, 0.0, 5.0, 5.0)],
            polygons: vec![vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(0.0, 1.0)]],
            ..Default::default()
        };
        let outcome = build_polygons(&shapes);
        assert_eq!(outcome.closed.len(), 3);
        assert_eq!(outcome.closed[1].len(), 4);
    }

    #[test]
    fn test_from_primitives_converts_units() {
        let prims = vec![EdgePrimitive::Line {
            start: crate::provider::NmPoint::new(1_000, 2_000),
            end: crate::provider::NmPoint::new(3_999, 4_000),
        }];
        let shapes = EdgeShapes::from_primitives(&prims);
        assert_eq!(shapes.lines[0], line(1.0, 2.0, 3.0, 4.0));
    }
}
