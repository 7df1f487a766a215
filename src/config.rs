//! Fill configuration: user settings, clamping rules and derived parameters
//!
//! Settings arrive in millimetres and percent, the way the host dialog shows
//! them; [`FillParams`] holds the same values in the engine's micron unit.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::FillError;
use crate::geometry::mm_to_um;

/// Element size limits in mm
pub const SIZE_RANGE_MM: (f64, f64) = (0.6, 2.0);

/// Density limits in percent
pub const DENSITY_RANGE: (f64, f64) = (25.0, 90.0);

/// Upper clearance limit in mm
pub const MAX_CLEARANCE_MM: f64 = 3.0;

/// Fill element shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    #[serde(alias = "Circle")]
    Circle,
    #[serde(alias = "Square")]
    Square,
}

impl FromStr for ShapeKind {
    type Err = FillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "circle" => Ok(ShapeKind::Circle),
            "square" => Ok(ShapeKind::Square),
            other => Err(FillError::InvalidConfig(format!("unknown shape kind '{}'", other))),
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeKind::Circle => write!(f, "circle"),
            ShapeKind::Square => write!(f, "square"),
        }
    }
}

/// User-facing fill settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FillConfig {
    /// Target copper layer, e.g. "F.Cu"
    pub layer_name: String,
    pub kind: ShapeKind,
    /// Element diameter / side in mm
    pub size_mm: f64,
    /// Share of the grid covered by elements, percent
    pub density: f64,
    /// Board margin in mm: distance kept from board edges, zones and masks
    pub clearance_mm: f64,
    pub shift_x_mm: f64,
    pub shift_y_mm: f64,
    /// 1-based board class, selects the minimum clearance
    pub class_index: usize,
    /// Worker override; defaults to the core count capped at 10
    pub workers: Option<usize>,
    pub section_timeout_secs: u64,
    /// Residuals at or below this area are dropped
    pub min_area_mm2: f64,
    /// Zone holding a previous fill; never treated as an obstacle
    pub fill_zone_name: String,
    /// Drop identical outlines produced twice in section overlap columns
    pub dedupe_overlap: bool,
}

impl Default for FillConfig {
    fn default() -> Self {
        Self {
            layer_name: "F.Cu".to_string(),
            kind: ShapeKind::Square,
            size_mm: 0.8,
            density: 50.0,
            clearance_mm: 0.25,
            shift_x_mm: 0.0,
            shift_y_mm: 0.0,
            class_index: 1,
            workers: None,
            section_timeout_secs: 300,
            min_area_mm2: 0.25,
            fill_zone_name: "EmptySpace".to_string(),
            dedupe_overlap: false,
        }
    }
}

impl FillConfig {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("failed to parse config {}", path.display()))
    }

    /// Reject settings the engine cannot run with
    pub fn validate(&self) -> Result<(), FillError> {
        if self.layer_name.trim().is_empty() {
            return Err(FillError::InvalidConfig("layer name is empty".into()));
        }
        let numbers = [
            ("size", self.size_mm),
            ("density", self.density),
            ("clearance", self.clearance_mm),
            ("shift x", self.shift_x_mm),
            ("shift y", self.shift_y_mm),
            ("minimum area", self.min_area_mm2),
        ];
        if let Some((name, _)) = numbers.iter().find(|(_, v)| !v.is_finite()) {
            return Err(FillError::InvalidConfig(format!("{} is not a finite number", name)));
        }
        if self.size_mm <= 0.0 {
            return Err(FillError::InvalidConfig("element size must be positive".into()));
        }
        if self.density <= 0.0 || self.density > 100.0 {
            return Err(FillError::InvalidConfig(format!(
                "density {}% is outside (0, 100]",
                self.density
            )));
        }
        if self.clearance_mm < 0.0 {
            return Err(FillError::InvalidConfig("clearance must not be negative".into()));
        }
        if self.workers == Some(0) {
            return Err(FillError::InvalidConfig("worker count must be at least 1".into()));
        }
        if self.section_timeout_secs == 0 {
            return Err(FillError::InvalidConfig("section timeout must be at least 1 s".into()));
        }
        Ok(())
    }

    /// Apply the dialog limits: size, density, and clearance bounded below
    /// by the selected board class
    pub fn clamped(&self, classes: &BoardClasses) -> Self {
        let min_clearance = classes.min_clearance_mm(self.class_index);
        Self {
            size_mm: self.size_mm.clamp(SIZE_RANGE_MM.0, SIZE_RANGE_MM.1),
            density: self.density.clamp(DENSITY_RANGE.0, DENSITY_RANGE.1),
            clearance_mm: self.clearance_mm.clamp(min_clearance, MAX_CLEARANCE_MM.max(min_clearance)),
            class_index: classes.clamp_index(self.class_index),
            ..self.clone()
        }
    }
}

/// Engine parameters in microns
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillParams {
    pub kind: ShapeKind,
    pub size: f64,
    /// Gap between neighbouring elements
    pub step: f64,
    pub shift_x: f64,
    pub shift_y: f64,
    pub board_margin: f64,
    /// µm²
    pub min_area: f64,
}

impl FillParams {
    pub fn from_config(config: &FillConfig) -> Self {
        let size = mm_to_um(config.size_mm) as f64;
        let board_margin = mm_to_um(config.clearance_mm) as f64;
        let step = step_from_density(config.density, size).max(board_margin);
        Self {
            kind: config.kind,
            size,
            step,
            shift_x: mm_to_um(config.shift_x_mm) as f64,
            shift_y: mm_to_um(config.shift_y_mm) as f64,
            board_margin,
            min_area: config.min_area_mm2 * 1e6,
        }
    }

    /// Grid pitch: element size plus gap
    pub fn pitch(&self) -> f64 {
        self.size + self.step
    }
}

/// Gap that gives `density_percent` coverage along one axis
pub fn step_from_density(density_percent: f64, size: f64) -> f64 {
    let d = density_percent / 100.0;
    size * ((1.0 - d) / d)
}

/// Minimum clearance per board class, in mm
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBoardClasses")]
pub struct BoardClasses {
    clearances: Vec<f64>,
}

impl Default for BoardClasses {
    /// Classes 1-5 of the usual PCB accuracy table
    fn default() -> Self {
        Self {
            clearances: vec![0.75, 0.45, 0.25, 0.15, 0.10],
        }
    }
}

impl BoardClasses {
    pub fn new(clearances: Vec<f64>) -> Self {
        Self { clearances }
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read board classes {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("failed to parse board classes {}", path.display()))
    }

    pub fn len(&self) -> usize {
        self.clearances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clearances.is_empty()
    }

    /// Nearest valid 1-based class index
    pub fn clamp_index(&self, index: usize) -> usize {
        index.clamp(1, self.clearances.len().max(1))
    }

    /// Minimum clearance of the class; 0 when the table is empty
    pub fn min_clearance_mm(&self, index: usize) -> f64 {
        self.clearances
            .get(self.clamp_index(index) - 1)
            .copied()
            .unwrap_or(0.0)
    }
}

/// On-disk layout: `{"ClassCount": 2, "Class1": {"Clearance": 0.75}, ...}`
#[derive(Deserialize)]
struct RawBoardClasses {
    #[serde(rename = "ClassCount")]
    class_count: usize,
    #[serde(flatten)]
    entries: HashMap<String, RawBoardClass>,
}

#[derive(Deserialize)]
struct RawBoardClass {
    #[serde(rename = "Clearance")]
    clearance: f64,
}

impl TryFrom<RawBoardClasses> for BoardClasses {
    type Error = String;

    fn try_from(raw: RawBoardClasses) -> Result<Self, Self::Error> {
        let clearances = (1..=raw.class_count)
            .map(|i| {
                raw.entries
                    .get(&format!("Class{}", i))
                    .map(|c| c.clearance)
                    .ok_or_else(|| format!("board class table is missing Class{}", i))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { clearances })
    }
}
