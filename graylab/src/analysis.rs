//! Operation dispatch
//!
//! Runs the operation named by an [`AnalysisConfig`] on one raster.

use crate::GraylabResult;
use crate::config::{AnalysisConfig, Operation};
use graylab_core::Raster;
use graylab_filter::{canny, marr_hildreth};
use graylab_region::{ContourSet, ObjectCount, count_objects, trace_boundaries, watershed_segment};
use graylab_threshold::threshold_otsu;
use log::debug;

/// Result of [`run`]
#[derive(Debug, Clone)]
pub enum AnalysisOutput {
    /// Edge map, binary image or rendered segmentation
    Raster(Raster),
    /// Traced boundaries
    Contours(ContourSet),
    /// Object count
    Count(ObjectCount),
}

impl AnalysisOutput {
    /// The raster, if this output is one
    pub fn as_raster(&self) -> Option<&Raster> {
        match self {
            AnalysisOutput::Raster(r) => Some(r),
            _ => None,
        }
    }
}

/// Validate `config` and run its operation on `raster`
pub fn run(raster: &Raster, config: &AnalysisConfig) -> GraylabResult<AnalysisOutput> {
    config.validate()?;
    let (w, h) = raster.dimensions();
    debug!("run: {:?} on {}x{}", config.operation, w, h);

    let output = match config.operation {
        Operation::Canny => AnalysisOutput::Raster(canny(raster, &config.canny)?),
        Operation::MarrHildreth => {
            AnalysisOutput::Raster(marr_hildreth(raster, &config.marr_hildreth)?)
        }
        Operation::Otsu => AnalysisOutput::Raster(threshold_otsu(raster)?),
        Operation::Watershed => {
            AnalysisOutput::Raster(watershed_segment(raster, &config.watershed)?.rendered)
        }
        Operation::FreemanChain => {
            AnalysisOutput::Contours(trace_boundaries(raster, &config.trace)?)
        }
        Operation::ObjectCount => AnalysisOutput::Count(count_objects(
            raster,
            config.count.threshold,
            config.count.method,
        )?),
    };
    Ok(output)
}
