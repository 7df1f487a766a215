//! Grid partitioning into vertical sections, one per worker

use super::types::Section;
use crate::geometry::Bounds;

/// Split `bbox` into `count` left-to-right sections spanning its full height.
///
/// Each section covers a whole number of grid pitches (`size + gap`) and
/// starts one pitch before the previous one ends, so neighbours share one
/// column of candidates. The last section ends exactly at the bbox edge.
pub fn split_into_sections(bbox: &Bounds, count: usize, size: f64, gap: f64) -> Vec<Section> {
    let count = count.max(1);
    let pitch = size + gap;
    let elem_count = (bbox.width() / pitch).ceil().max(0.0) as usize;
    let per_section = elem_count.div_ceil(count).max(1);
    let span = per_section as f64 * pitch;
    let advance = (per_section - 1) as f64 * pitch;

    let mut sections = Vec::with_capacity(count);
    let mut start = bbox.min_x;
    for index in 0..count {
        let end = if index + 1 == count { bbox.max_x } else { start + span };
        sections.push(Section {
            index,
            bounds: Bounds::new(start, bbox.min_y, end, bbox.max_y),
        });
        start += advance;
    }
    sections
}
