//! R-tree indexed clip regions
//!
//! A clip region is an immutable multi-polygon with an R-tree over the
//! bounding boxes of its parts, so each candidate only meets the parts that
//! can actually touch it.

use rstar::{RTree, RTreeObject, AABB};

use super::types::{Bounds, MultiPolygon, Polygon};

/// Bounding box of one part of a region
#[derive(Clone, Debug)]
struct PartEnvelope {
    index: usize,
    bounds: AABB<[f64; 2]>,
}

impl RTreeObject for PartEnvelope {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        self.bounds
    }
}

fn aabb(bounds: &Bounds) -> AABB<[f64; 2]> {
    AABB::from_corners([bounds.min_x, bounds.min_y], [bounds.max_x, bounds.max_y])
}

#[derive(Debug)]
pub struct ClipRegion {
    shape: MultiPolygon,
    index: RTree<PartEnvelope>,
}

impl ClipRegion {
    pub fn new(shape: MultiPolygon) -> Self {
        let envelopes = shape
            .polygons()
            .iter()
            .enumerate()
            .filter_map(|(index, poly)| {
                poly.bounds().map(|b| PartEnvelope {
                    index,
                    bounds: aabb(&b),
                })
            })
            .collect();
        Self {
            shape,
            index: RTree::bulk_load(envelopes),
        }
    }

    pub fn empty() -> Self {
        Self::new(MultiPolygon::default())
    }

    /// Axis-aligned rectangle region
    pub fn rectangle(bounds: &Bounds) -> Self {
        Self::new(MultiPolygon::from(bounds.to_polygon()))
    }

    pub fn shape(&self) -> &MultiPolygon {
        &self.shape
    }

    pub fn is_empty(&self) -> bool {
        self.shape.is_empty()
    }

    pub fn area(&self) -> f64 {
        self.shape.area()
    }

    /// Parts whose bounding boxes touch `bounds`, in their original order
    pub fn parts_near(&self, bounds: &Bounds) -> Vec<&Polygon> {
        let mut hits: Vec<usize> = self
            .index
            .locate_in_envelope_intersecting(&aabb(bounds))
            .map(|part| part.index)
            .collect();
        hits.sort_unstable();
        hits.into_iter().map(|i| &self.shape.polygons()[i]).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parts_near_filters_by_bounds() {
        let region = ClipRegion::new(MultiPolygon(vec![
            Bounds::new(0.0, 0.0, 10.0, 10.0).to_polygon(),
            Bounds::new(100.0, 0.0, 110.0, 10.0).to_polygon(),
            Bounds::new(200.0, 0.0, 210.0, 10.0).to_polygon(),
        ]));
        let near = region.parts_near(&Bounds::new(95.0, 2.0, 205.0, 4.0));
        assert_eq!(near.len(), 2);
        assert_eq!(near[0].bounds().unwrap().min_x, 100.0);
        assert_eq!(near[1].bounds().unwrap().min_x, 200.0);
        assert!(region.parts_near(&Bounds::new(50.0, 50.0, 60.0, 60.0)).is_empty());
    }

    #[test]
    fn test_empty_region() {
        let region = ClipRegion::empty();
        assert!(region.is_empty());
        assert!(region.parts_near(&Bounds::new(0.0, 0.0, 1.0, 1.0)).is_empty());
    }
}
