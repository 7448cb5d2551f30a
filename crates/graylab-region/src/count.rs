//! Object counting
//!
//! Counts foreground objects of a thresholded raster, either as
//! 4-connected components or as traced Freeman boundaries.

use crate::chain::{Contour, trace_binary};
use crate::conncomp::{binarize, count_components};
use crate::{RegionError, RegionResult};
use graylab_core::Raster;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Counting technique
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ObjectCountMethod {
    /// 4-connected component labeling (`"ccl"`)
    #[default]
    #[serde(rename = "connected_component_labeling", alias = "ccl")]
    ConnectedComponents,
    /// Freeman chain code contours (`"freeman"`)
    #[serde(rename = "freeman_chain_code", alias = "freeman")]
    FreemanChain,
}

impl ObjectCountMethod {
    /// Descriptive name used in results
    pub fn name(self) -> &'static str {
        match self {
            ObjectCountMethod::ConnectedComponents => "connected_component_labeling",
            ObjectCountMethod::FreemanChain => "freeman_chain_code",
        }
    }
}

impl fmt::Display for ObjectCountMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ObjectCountMethod {
    type Err = RegionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ccl" => Ok(ObjectCountMethod::ConnectedComponents),
            "freeman" => Ok(ObjectCountMethod::FreemanChain),
            other => Err(RegionError::UnknownMethod(other.to_string())),
        }
    }
}

/// Result of [`count_objects`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectCount {
    /// Number of objects found
    pub object_count: usize,
    /// Binarization threshold applied
    pub threshold_used: u8,
    /// Technique used
    pub method: ObjectCountMethod,
    /// Traced contours, only for [`ObjectCountMethod::FreemanChain`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contours: Option<Vec<Contour>>,
}

/// Count objects in a raster binarized with `sample > threshold`
pub fn count_objects(
    raster: &Raster,
    threshold: u8,
    method: ObjectCountMethod,
) -> RegionResult<ObjectCount> {
    let binary = binarize(raster, threshold);

    let result = match method {
        ObjectCountMethod::ConnectedComponents => ObjectCount {
            object_count: count_components(&binary)?,
            threshold_used: threshold,
            method,
            contours: None,
        },
        ObjectCountMethod::FreemanChain => {
            let set = trace_binary(&binary)?;
            ObjectCount {
                object_count: set.total_contours,
                threshold_used: threshold,
                method,
                contours: Some(set.contours),
            }
        }
    };

    debug!(
        "count: {} objects by {} at threshold {}",
        result.object_count, method, threshold
    );
    Ok(result)
}
