//! JSON analysis configuration
//!
//! An [`AnalysisConfig`] names one operation and carries the options of
//! every operation, each section falling back to its defaults when absent:
//!
//! ```json
//! {
//!   "operation": "canny",
//!   "canny": { "sigma": 1.4, "low_ratio": 0.1, "high_ratio": 0.3 }
//! }
//! ```

use crate::{GraylabError, GraylabResult};
use graylab_filter::{CannyOptions, MarrHildrethOptions};
use graylab_region::{ObjectCountMethod, TraceOptions, WatershedOptions};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Operation selected by a configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Canny edge map
    #[default]
    Canny,
    /// Marr-Hildreth edge map
    MarrHildreth,
    /// Otsu binarization
    Otsu,
    /// Watershed segmentation map
    Watershed,
    /// Freeman chain code contours
    FreemanChain,
    /// Object count
    ObjectCount,
}

/// Options for object counting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CountConfig {
    /// Binarization threshold: samples `> threshold` are foreground
    pub threshold: u8,
    /// Counting technique
    pub method: ObjectCountMethod,
}

impl Default for CountConfig {
    fn default() -> Self {
        Self {
            threshold: 128,
            method: ObjectCountMethod::ConnectedComponents,
        }
    }
}

/// Full analysis configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Operation to run
    pub operation: Operation,
    /// Canny options
    pub canny: CannyOptions,
    /// Marr-Hildreth options
    pub marr_hildreth: MarrHildrethOptions,
    /// Watershed options
    pub watershed: WatershedOptions,
    /// Boundary tracing options
    pub trace: TraceOptions,
    /// Object counting options
    pub count: CountConfig,
}

impl AnalysisConfig {
    /// Create a configuration for `operation` with default options
    pub fn new(operation: Operation) -> Self {
        Self {
            operation,
            ..Self::default()
        }
    }

    /// Parse and validate a configuration from JSON text
    pub fn from_json_str(json: &str) -> GraylabResult<Self> {
        let config: AnalysisConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges of the options used by the selected operation
    ///
    /// Sigmas must be positive, Canny ratios within [0, 1], kernel sides
    /// odd, and Marr-Hildreth needs a threshold. Watershed smoothing may be
    /// disabled with a sigma of 0 but not made negative.
    pub fn validate(&self) -> GraylabResult<()> {
        match self.operation {
            Operation::Canny => {
                let c = &self.canny;
                check_sigma("canny.sigma", c.sigma)?;
                check_ratio("canny.low_ratio", c.low_ratio)?;
                check_ratio("canny.high_ratio", c.high_ratio)?;
                check_odd("canny.kernel_size", c.kernel_size)?;
            }
            Operation::MarrHildreth => {
                let m = &self.marr_hildreth;
                check_sigma("marr_hildreth.sigma", m.sigma)?;
                match m.threshold {
                    None => {
                        return Err(graylab_filter::FilterError::MissingParameter("threshold").into());
                    }
                    Some(t) if !t.is_finite() || t < 0.0 => {
                        return Err(invalid(format!("marr_hildreth.threshold must be >= 0, got {t}")));
                    }
                    Some(_) => {}
                }
            }
            Operation::Watershed => {
                let w = &self.watershed;
                if !w.smoothing_sigma.is_finite() || w.smoothing_sigma < 0.0 {
                    return Err(invalid(format!(
                        "watershed.smoothing_sigma must be >= 0, got {}",
                        w.smoothing_sigma
                    )));
                }
                check_odd("watershed.smoothing_size", w.smoothing_size)?;
            }
            Operation::Otsu | Operation::FreemanChain | Operation::ObjectCount => {}
        }
        debug!("config: {:?} validated", self.operation);
        Ok(())
    }
}

fn invalid(message: String) -> GraylabError {
    GraylabError::InvalidConfig(message)
}

fn check_sigma(name: &str, sigma: f32) -> GraylabResult<()> {
    if sigma.is_finite() && sigma > 0.0 {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be > 0, got {sigma}")))
    }
}

fn check_ratio(name: &str, ratio: f32) -> GraylabResult<()> {
    if (0.0..=1.0).contains(&ratio) {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be within [0, 1], got {ratio}")))
    }
}

fn check_odd(name: &str, size: u32) -> GraylabResult<()> {
    if size % 2 == 1 {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be odd, got {size}")))
    }
}

/// Read, parse and validate a configuration file
pub fn load_config(path: &Path) -> GraylabResult<AnalysisConfig> {
    let data = fs::read_to_string(path).map_err(|source| GraylabError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    AnalysisConfig::from_json_str(&data)
}
