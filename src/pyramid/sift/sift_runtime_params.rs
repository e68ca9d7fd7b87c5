use serde::{Serialize, Deserialize};

use crate::Float;
use crate::matching::{matches::DEFAULT_MATCH_RATIO, sift_descriptor::{ANGLE_BINS,RADIUS_BINS}};

#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
#[serde(default)]
pub struct SiftRuntimeParams {
    /// `None` derives the count from the image size.
    pub octave_count: Option<usize>,
    pub scales_per_octave: usize,
    pub initial_scale: Float,
    pub contrast_threshold: Float,
    pub edge_threshold: Float,
    /// Reserved. The refinement step limit is fixed at `MAX_OFFSET`.
    pub offset_limit: Float,
    pub num_angular_bins: usize,
    pub num_radial_bins: usize,
    pub match_ratio: Float
}

impl Default for SiftRuntimeParams {
    fn default() -> SiftRuntimeParams {
        SiftRuntimeParams {
            octave_count: None,
            scales_per_octave: 5,
            initial_scale: 1.6,
            contrast_threshold: 0.04,
            edge_threshold: 10.0,
            offset_limit: 1.0,
            num_angular_bins: ANGLE_BINS,
            num_radial_bins: RADIUS_BINS,
            match_ratio: DEFAULT_MATCH_RATIO
        }
    }
}

impl SiftRuntimeParams {
    pub fn from_yaml(yaml: &str) -> Result<SiftRuntimeParams, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    /// Explicit count, or `floor(log2(min(rows,cols))) - 3` clamped to at least one octave.
    pub fn octave_count_for(&self, rows: usize, cols: usize) -> usize {
        match self.octave_count {
            Some(count) => count,
            None => {
                let min_dim = std::cmp::min(rows, cols).max(1) as Float;
                std::cmp::max(min_dim.log2().floor() as isize - 3, 1) as usize
            }
        }
    }
}
