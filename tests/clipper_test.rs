//! Clipping candidates against a full obstacle set

use copper_filler::config::ShapeKind;
use copper_filler::fill::{make_shape, ClipOutcome, Containment, RejectReason, ShapeClipper};
use copper_filler::geometry::{build_square, Bounds, ClipRegion, MultiPolygon, Point};
use copper_filler::obstacles::{
    board_region, pad_layer, track_layer, via_layer, zone_layer, ObstacleKind, ObstacleSet,
};
use copper_filler::provider::{CopperLayer, JsonBoard, NmPoint, TrackSegment, ViaPad, ZoneOutline};

const MM: i64 = 1_000_000;

fn nm_rect(x0: i64, y0: i64, x1: i64, y1: i64) -> Vec<NmPoint> {
    vec![
        NmPoint::new(x0, y0),
        NmPoint::new(x1, y0),
        NmPoint::new(x1, y1),
        NmPoint::new(x0, y1),
    ]
}

/// 20 x 20 mm board, 0.5 mm margin, a zone, a pad, a track and a via
fn obstacle_set() -> ObstacleSet {
    let mut board = JsonBoard::default();
    board.layers.insert(
        "F.Cu".to_string(),
        CopperLayer {
            zones: vec![ZoneOutline {
                name: "GND".into(),
                outline: nm_rect(2 * MM, 2 * MM, 6 * MM, 6 * MM),
            }],
            pads: vec![nm_rect(12 * MM, 2 * MM, 14 * MM, 4 * MM)],
            tracks: vec![TrackSegment {
                start: NmPoint::new(2 * MM, 15 * MM),
                end: NmPoint::new(18 * MM, 15 * MM),
                width: 250_000,
            }],
            vias: vec![ViaPad {
                position: NmPoint::new(10 * MM, 10 * MM),
                diameter: 800_000,
            }],
        },
    );

    let outer = build_square(Point::new(0.0, 0.0), Point::new(20_000.0, 20_000.0));
    let mut set = ObstacleSet::board_only(board_region(&outer, 500.0));
    set.set_layer(zone_layer(&board, "F.Cu", 500.0, "EmptySpace"));
    set.set_layer(pad_layer(&board, "F.Cu", 200.0));
    set.set_layer(track_layer(&board, "F.Cu", 200.0));
    set.set_layer(via_layer(&board, "F.Cu", 200.0));
    set
}

fn whole_board_section() -> ClipRegion {
    ClipRegion::rectangle(&Bounds::new(0.0, 0.0, 20_000.0, 20_000.0))
}

#[test]
fn test_free_candidate_is_unchanged() {
    let obstacles = obstacle_set();
    let section = whole_board_section();
    let clipper = ShapeClipper::new(&section, &obstacles, 250_000.0);
    let candidate = make_shape(ShapeKind::Square, 8_000.0, 2_000.0, 800.0);
    assert_eq!(
        clipper.process(candidate.clone()),
        ClipOutcome::Accepted(MultiPolygon::from(candidate))
    );
}

#[test]
fn test_candidate_inside_each_obstacle_is_rejected() {
    let obstacles = obstacle_set();
    let section = whole_board_section();
    let clipper = ShapeClipper::new(&section, &obstacles, 0.0);

    let cases = [
        (3_000.0, 3_000.0, 400.0, ObstacleKind::Zones),
        (12_500.0, 2_500.0, 500.0, ObstacleKind::Pads),
        (9_900.0, 9_900.0, 200.0, ObstacleKind::Vias),
        (5_000.0, 14_900.0, 100.0, ObstacleKind::Tracks),
    ];
    for (x, y, size, kind) in cases {
        let candidate = make_shape(ShapeKind::Square, x, y, size);
        assert_eq!(
            clipper.process(candidate),
            ClipOutcome::Rejected(RejectReason::Covered(kind)),
            "candidate at ({x}, {y})"
        );
    }
}

#[test]
fn test_candidate_in_board_margin_is_outside() {
    let obstacles = obstacle_set();
    let section = whole_board_section();
    let clipper = ShapeClipper::new(&section, &obstacles, 0.0);
    let candidate = make_shape(ShapeKind::Square, 100.0, 8_000.0, 300.0);
    assert_eq!(
        clipper.process(candidate),
        ClipOutcome::Rejected(RejectReason::Outside(Containment::Board))
    );
}

#[test]
fn test_candidate_near_via_is_trimmed() {
    let obstacles = obstacle_set();
    let section = whole_board_section();
    let clipper = ShapeClipper::new(&section, &obstacles, 0.0);

    // via keep-out reaches 600 µm from (10_000, 10_000)
    let candidate = make_shape(ShapeKind::Square, 10_300.0, 9_000.0, 1_000.0);
    let ClipOutcome::Accepted(residual) = clipper.process(candidate.clone()) else {
        panic!("residual should survive");
    };
    assert!(residual.area() < candidate.area());
    assert!(residual.area() > 0.5 * candidate.area());
}

#[test]
fn test_small_residual_is_dropped() {
    let obstacles = obstacle_set();
    let section = whole_board_section();
    let clipper = ShapeClipper::new(&section, &obstacles, 250_000.0);
    // only a 0.3 mm wide strip remains inside the board margin
    let candidate = make_shape(ShapeKind::Square, 19_200.0, 8_000.0, 800.0);
    assert_eq!(
        clipper.process(candidate),
        ClipOutcome::Rejected(RejectReason::BelowMinArea)
    );
}
