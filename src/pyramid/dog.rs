use crate::error::{Result, SiftError};
use crate::pyramid::{Pyramid,ScaleSpace,DogPyramid,octave::Octave};

pub fn validate_octave_images(octave: &Octave) -> Result<()> {
    let first = octave.images.first().ok_or_else(|| SiftError::InvalidArgument("octave must contain at least one image".to_string()))?;
    match octave.images.iter().skip(1).all(|image| image.same_shape(first)) {
        true => Ok(()),
        false => Err(SiftError::InvalidArgument("all images in an octave must have the same dimensions".to_string()))
    }
}

pub fn difference_of_gaussians_for_octave(octave: &Octave) -> Result<Octave> {
    if octave.images.len() < 2 {
        return Err(SiftError::InvalidArgument(format!("an octave needs at least 2 images, got {}", octave.images.len())));
    }
    validate_octave_images(octave)?;

    let images = octave.images.windows(2).map(|pair| pair[1].difference(&pair[0])).collect();
    let sigmas = octave.sigmas.iter().take(octave.images.len()-1).cloned().collect();
    Ok(Octave{images, sigmas})
}

/// Pointwise difference of consecutive levels, octave by octave.
pub fn compute_difference_of_gaussians(scale_space: &ScaleSpace) -> Result<DogPyramid> {
    if scale_space.is_empty() {
        return Err(SiftError::InvalidArgument("scale space should not be empty".to_string()));
    }

    let mut dog_pyramid = Pyramid::<Octave>::empty(scale_space.len());
    for (octave_level, octave) in scale_space.octaves.iter().enumerate() {
        if octave.is_empty() {
            return Err(SiftError::InvalidArgument(format!("octave {} is empty", octave_level)));
        }
        dog_pyramid.octaves.push(difference_of_gaussians_for_octave(octave)?);
    }

    Ok(dog_pyramid)
}
