use crate::Float;
use crate::error::{Result, SiftError};
use crate::features::sift_feature::SiftFeature;
use crate::pyramid::DogPyramid;

/// Neighbour lookups around a fixed feature for finite differences.
///
/// Any probe that leaves the pyramid (octave, scale, row or column) reads as `0.0`
/// instead of failing. Border candidates therefore stay processable, at the cost of
/// biased derivatives next to the border.
#[derive(Debug,Clone,Copy)]
pub struct DogSampler<'a> {
    dog_pyramid: &'a DogPyramid,
    feature: SiftFeature
}

impl<'a> DogSampler<'a> {
    pub fn new(dog_pyramid: &'a DogPyramid, feature: &SiftFeature) -> DogSampler<'a> {
        DogSampler{dog_pyramid, feature: *feature}
    }

    pub fn sample(&self, dx: isize, dy: isize, ds: isize) -> Float {
        let octave = match self.dog_pyramid.octaves.get(self.feature.octave_level) {
            Some(octave) => octave,
            None => return 0.0
        };

        let sigma_level = (self.feature.sigma_level + ds as Float).round();
        if sigma_level < 0.0 || sigma_level >= octave.len() as Float {
            return 0.0;
        }

        let row = (self.feature.y + dy as Float).round() as isize;
        let col = (self.feature.x + dx as Float).round() as isize;
        octave.images[sigma_level as usize].get_signed(row, col).unwrap_or(0.0)
    }
}

/// Value of the DoG pyramid at the rounded location of `feature`. Unlike `DogSampler`
/// this is a hard contract: leaving the pyramid is an `OutOfRange` error.
pub fn access_scale_space(dog_pyramid: &DogPyramid, feature: &SiftFeature) -> Result<Float> {
    let octave = dog_pyramid.octave(feature.octave_level)?;

    let sigma_level = feature.sigma_level.round();
    if sigma_level < 0.0 || sigma_level >= octave.len() as Float {
        return Err(SiftError::OutOfRange(format!("scale index {} outside of octave with {} levels", feature.sigma_level, octave.len())));
    }

    let image = &octave.images[sigma_level as usize];
    let (row, col) = (feature.y.round(), feature.x.round());
    if row < 0.0 || col < 0.0 {
        return Err(SiftError::OutOfRange(format!("keypoint ({},{}) has negative coordinates", feature.x, feature.y)));
    }
    image.get(row as usize, col as usize)
}
