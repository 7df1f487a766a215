//! Outer boundary vs. interior cutout classification

use crate::geometry::{signed_area, Ring};

/// Board edge contours split by role
#[derive(Debug, Clone, PartialEq)]
pub struct BoardContours {
    /// Largest-area contour: the board outline
    pub outer: Ring,
    /// Every other contour: holes the fill must avoid
    pub cutouts: Vec<Ring>,
}

/// Pick the contour with the largest absolute area as the outer boundary.
/// On ties the first one in list order wins. `None` when there are no contours.
pub fn split_outer(polygons: Vec<Ring>) -> Option<BoardContours> {
    let mut best: Option<(usize, f64)> = None;
    for (i, ring) in polygons.iter().enumerate() {
        let area = signed_area(ring).abs();
        if best.map_or(true, |(_, max)| area > max) {
            best = Some((i, area));
        }
    }
    let (outer_idx, _) = best?;

    let mut outer = Vec::new();
    let mut cutouts = Vec::with_capacity(polygons.len().saturating_sub(1));
    for (i, ring) in polygons.into_iter().enumerate() {
        if i == outer_idx {
            outer = ring;
        } else {
            cutouts.push(ring);
        }
    }

    Some(BoardContours { outer, cutouts })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{build_square, Point};

    fn square(x: f64, y: f64, side: f64) -> Ring {
        build_square(Point::new(x, y), Point::new(x + side, y + side))
    }

    #[test]
    fn test_larger_contour_is_outer_in_any_order() {
        let big = square(0.0, 0.0, 100.0);
        let small = square(10.0, 10.0, 5.0);

        let a = split_outer(vec![small.clone(), big.clone()]).unwrap();
        assert_eq!(a.outer, big);
        assert_eq!(a.cutouts, vec![small.clone()]);

        let b = split_outer(vec![big.clone(), small.clone()]).unwrap();
        assert_eq!(b.outer, big);
        assert_eq!(b.cutouts, vec![small]);
    }

    #[test]
    fn test_winding_does_not_matter() {
        let mut big = square(0.0, 0.0, 100.0);
        big.reverse();
        let small = square(10.0, 10.0, 5.0);
        let contours = split_outer(vec![small, big.clone()]).unwrap();
        assert_eq!(contours.outer, big);
    }

    #[test]
    fn test_tie_keeps_first() {
        let a = square(0.0, 0.0, 10.0);
        let b = square(50.0, 50.0, 10.0);
        let contours = split_outer(vec![a.clone(), b]).unwrap();
        assert_eq!(contours.outer, a);
    }

    #[test]
    fn test_no_contours() {
        assert!(split_outer(Vec::new()).is_none());
    }
}
