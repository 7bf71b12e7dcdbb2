use std::path::PathBuf;

use clap::ValueEnum;

/// Radius used until the user types another one, in meters.
pub const DEFAULT_RADIUS: f64 = 1000.0;

// ---------------------------------------------------------------------------
// Predictor column assignment
// ---------------------------------------------------------------------------

/// Which area field feeds which predictor column of the regression.
///
/// The design matrix is always `[1, building, land]`; this only decides
/// which raw field lands in each column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PredictorLayout {
    /// `building_area` → building column, `land_area` → land column.
    #[default]
    Standard,
    /// `land_area` → building column, `building_area` → land column.
    Swapped,
}

impl PredictorLayout {
    /// Return `(building, land)` predictor values for a pair of raw areas.
    pub fn assign(self, land_area: f64, building_area: f64) -> (f64, f64) {
        match self {
            PredictorLayout::Standard => (building_area, land_area),
            PredictorLayout::Swapped => (land_area, building_area),
        }
    }
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Startup settings, filled from the command line by the binary.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Dataset loaded before the first frame, if any.
    pub data_path: Option<PathBuf>,
    /// Initial content of the radius field, in meters.
    pub radius: f64,
    pub predictors: PredictorLayout,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_path: None,
            radius: DEFAULT_RADIUS,
            predictors: PredictorLayout::default(),
        }
    }
}
