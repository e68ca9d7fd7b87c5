use rayon::prelude::*;
use serde::{Serialize, Deserialize};

use crate::{Float, reconstruct_original_coordiantes};
use crate::pyramid::{DogPyramid, octave::Octave};

pub mod sampler;
pub mod processing;

pub use self::processing::{RefinementOutcome, subpixel_refinement};

/// DoG extremum. `x`, `y` are in the pixel frame of the feature's own octave;
/// `image_x`/`image_y` map them back to the full resolution image.
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct SiftFeature {
    pub x: Float,
    pub y: Float,
    pub sigma_level: Float,
    pub octave_level: usize,
    pub dog_value: Float
}

impl SiftFeature {
    pub fn image_x(&self) -> Float {
        reconstruct_original_coordiantes(self.x, self.y, self.octave_level).0
    }

    pub fn image_y(&self) -> Float {
        reconstruct_original_coordiantes(self.x, self.y, self.octave_level).1
    }
}

/// Strict extremum over the 3x3x3 neighbourhood of `(row, col)` at `sigma_level`.
/// Ties disqualify. Neighbours outside the image are skipped, a position outside of it is never an extremum.
pub fn is_local_extremum(dog_octave: &Octave, sigma_level: usize, row: usize, col: usize, contrast_threshold: Float) -> bool {
    if sigma_level == 0 || sigma_level+1 >= dog_octave.images.len() {
        return false;
    }

    let sample_value = match dog_octave.images[sigma_level].buffer.get((row,col)) {
        Some(&v) => v,
        None => return false
    };
    if sample_value.abs() <= contrast_threshold {
        return false;
    }

    let mut is_smallest = true;
    let mut is_largest = true;

    for (ds, neighbourhood) in dog_octave.images[sigma_level-1..sigma_level+2].iter().enumerate() {
        for dr in -1..2isize {
            for dc in -1..2isize {
                if ds == 1 && dr == 0 && dc == 0 {
                    continue;
                }

                let value = match neighbourhood.get_signed(row as isize + dr, col as isize + dc) {
                    Some(v) => v,
                    None => continue
                };
                is_smallest &= sample_value < value;
                is_largest &= sample_value > value;

                if !(is_smallest || is_largest) {
                    return false;
                }
            }
        }
    }

    is_smallest || is_largest
}

pub fn detect_sift_feature(dog_octave: &Octave, octave_level: usize, sigma_level: usize, contrast_threshold: Float) -> Vec<SiftFeature> {
    let mut extrema_vec: Vec<SiftFeature> = Vec::new();
    let rows = dog_octave.rows();
    let cols = dog_octave.cols();

    if rows < 3 || cols < 3 {
        return extrema_vec;
    }

    for row in 1..rows-1 {
        for col in 1..cols-1 {
            if is_local_extremum(dog_octave, sigma_level, row, col, contrast_threshold) {
                extrema_vec.push(SiftFeature{
                    x: col as Float,
                    y: row as Float,
                    sigma_level: sigma_level as Float,
                    octave_level,
                    dog_value: dog_octave.images[sigma_level].buffer[(row,col)]
                });
            }
        }
    }

    extrema_vec
}

/// Coarse extrema ordered by octave, scale, row, column.
pub fn detect_sift_features(dog_pyramid: &DogPyramid, contrast_threshold: Float) -> Vec<SiftFeature> {
    let levels = dog_pyramid.octaves.iter().enumerate()
        .flat_map(|(octave_level, octave)| (1..octave.len().saturating_sub(1)).map(move |sigma_level| (octave_level, sigma_level)))
        .collect::<Vec<(usize,usize)>>();

    levels.par_iter()
        .map(|&(octave_level, sigma_level)| detect_sift_feature(&dog_pyramid.octaves[octave_level], octave_level, sigma_level, contrast_threshold))
        .collect::<Vec<Vec<SiftFeature>>>()
        .into_iter()
        .flatten()
        .collect()
}
