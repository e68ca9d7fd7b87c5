use crate::image::{Image,filter::gaussian_blur};
use crate::error::{Result, SiftError};
use crate::Float;

/// Progressively blurred images sharing one resolution.
#[derive(Debug,Clone)]
pub struct Octave {
    pub images: Vec<Image>,
    pub sigmas: Vec<Float>
}

pub fn compute_sigma_for_level(base_sigma: Float, level: usize, scales_per_octave: usize) -> Float {
    base_sigma*(level as Float/scales_per_octave as Float).exp2()
}

/// Blur that takes an image at `prev_sigma` to `curr_sigma`.
pub fn compute_delta_sigma(prev_sigma: Float, curr_sigma: Float) -> Result<Float> {
    if curr_sigma < prev_sigma {
        return Err(SiftError::InvalidArgument(format!("sigma values must be non-decreasing, got {} after {}", curr_sigma, prev_sigma)));
    }
    Ok((curr_sigma.powi(2) - prev_sigma.powi(2)).sqrt())
}

impl Octave {

    /// `scales_per_octave + 2` images. Each level blurs the previous one by the
    /// incremental sigma, so blur compounds along the octave.
    pub fn build_octave(base_image: &Image, scales_per_octave: usize, sigma_initial: Float) -> Result<Octave> {
        let image_count = scales_per_octave + 2;
        let sigmas: Vec<Float> = (0..image_count).map(|level| compute_sigma_for_level(sigma_initial, level, scales_per_octave)).collect();

        let mut images: Vec<Image> = Vec::with_capacity(image_count);
        images.push(base_image.clone());

        for level in 1..image_count {
            let previous = &images[level-1];
            if previous.is_empty() {
                return Err(SiftError::LogicError(format!("image at level {} is unexpectedly empty", level-1)));
            }
            let delta_sigma = compute_delta_sigma(sigmas[level-1], sigmas[level])?;
            let blurred = gaussian_blur(previous, delta_sigma);
            images.push(blurred);
        }

        Ok(Octave {images,sigmas})
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn rows(&self) -> usize {
        self.images.first().map_or(0, |image| image.rows())
    }

    pub fn cols(&self) -> usize {
        self.images.first().map_or(0, |image| image.cols())
    }

    pub fn base_image_for_next_octave(&self) -> Option<&Image> {
        self.images.last()
    }
}
