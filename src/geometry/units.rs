//! Unit conversion between the host's fine unit and the working micron unit
//!
//! Host coordinates are integer nanometres. The engine works in microns;
//! conversions truncate toward zero in both directions.

/// Nanometres per micron (and microns per millimetre)
pub const SCALE: i64 = 1000;

/// Nanometres to microns, truncating
pub fn nm_to_um(value: i64) -> i64 {
    value / SCALE
}

/// Microns to nanometres, truncating
pub fn um_to_nm(value: f64) -> i64 {
    (value * SCALE as f64) as i64
}

/// Millimetres to microns, truncating
pub fn mm_to_um(value: f64) -> i64 {
    (value * SCALE as f64) as i64
}
