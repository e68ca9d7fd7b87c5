extern crate image as image_rs;

use std::collections::BTreeMap;

use image_rs::GrayImage;
use log::{debug, info, warn};
use rayon::prelude::*;
use serde::{Serialize, Deserialize};

use crate::Float;
use crate::error::{Result, SiftError};
use crate::image::Image;
use crate::pyramid::{Pyramid,ScaleSpace,DogPyramid,octave::Octave,dog::compute_difference_of_gaussians};
use crate::features::sift_feature::{SiftFeature,RefinementOutcome,detect_sift_features,subpixel_refinement};
use crate::matching::{matches::{Match,match_descriptor_sets}, sift_descriptor::feature_vector::SiftDescriptor};
use self::sift_runtime_params::SiftRuntimeParams;

pub mod sift_runtime_params;

/// Refined feature together with its descriptor.
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct SiftKeypoint {
    pub feature: SiftFeature,
    pub descriptor: SiftDescriptor
}

pub fn build_sift_pyramid(base_image: &Image, octave_count: usize, scales_per_octave: usize, sigma_initial: Float) -> Result<ScaleSpace> {

    if base_image.is_empty() {
        return Err(SiftError::InvalidArgument("base image must be non-empty".to_string()));
    }
    if octave_count == 0 || scales_per_octave == 0 {
        return Err(SiftError::InvalidArgument(format!("octave count ({}) and scales per octave ({}) must be positive", octave_count, scales_per_octave)));
    }
    if !(sigma_initial > 0.0) || !sigma_initial.is_finite() {
        return Err(SiftError::InvalidArgument(format!("initial sigma must be positive, got {}", sigma_initial)));
    }

    let mut octaves: Vec<Octave> = Vec::with_capacity(octave_count);

    for i in 0..octave_count {
        let new_octave = match i {
            0 => Octave::build_octave(base_image, scales_per_octave, sigma_initial)?,
            _ => {
                let previous_last = octaves[i-1].base_image_for_next_octave()
                    .ok_or_else(|| SiftError::LogicError(format!("octave {} has no images", i-1)))?;
                let octave_image = Image::downsample_half(previous_last)
                    .ok_or_else(|| SiftError::LogicError(format!("base image of octave {} is empty after downsampling a {}x{} image", i, previous_last.rows(), previous_last.cols())))?;
                Octave::build_octave(&octave_image, scales_per_octave, sigma_initial)?
            }
        };

        debug!("octave {}: {}x{} with {} levels", i, new_octave.rows(), new_octave.cols(), new_octave.len());
        octaves.push(new_octave);
    }

    Ok(Pyramid{octaves})
}

/// Survivors of the refinement in input order; rejection reasons are only logged.
pub fn sift_feature_refinement(dog_pyramid: &DogPyramid, features: &[SiftFeature], runtime_params: &SiftRuntimeParams) -> Vec<SiftFeature> {
    let outcomes = features.par_iter()
        .map(|feature| subpixel_refinement(dog_pyramid, feature, runtime_params.edge_threshold))
        .collect::<Vec<RefinementOutcome>>();

    let mut rejections = BTreeMap::<String,usize>::new();
    for outcome in outcomes.iter().filter(|o| !o.is_refined()) {
        *rejections.entry(format!("{:?}", outcome)).or_insert(0) += 1;
    }
    debug!("refinement rejections: {:?}", rejections);

    outcomes.iter().filter_map(|outcome| outcome.refined()).collect()
}

pub fn generate_descriptors(image: &Image, features: &[SiftFeature], runtime_params: &SiftRuntimeParams) -> Result<Vec<SiftKeypoint>> {
    features.par_iter()
        .map(|feature| {
            let descriptor = SiftDescriptor::new(image, feature, runtime_params.num_angular_bins, runtime_params.num_radial_bins)?;
            Ok(SiftKeypoint{feature: *feature, descriptor})
        })
        .collect()
}

/// Full pipeline on one image: scale-space, DoG, extrema, refinement, descriptors.
pub fn execute_sift(image: &Image, runtime_params: &SiftRuntimeParams) -> Result<Vec<SiftKeypoint>> {
    if runtime_params.num_angular_bins == 0 || runtime_params.num_radial_bins == 0 {
        return Err(SiftError::InvalidArgument(format!("descriptor bins must be positive, got {}x{}", runtime_params.num_angular_bins, runtime_params.num_radial_bins)));
    }

    let octave_count = runtime_params.octave_count_for(image.rows(), image.cols());
    info!("building scale space with {} octaves", octave_count);
    let scale_space = build_sift_pyramid(image, octave_count, runtime_params.scales_per_octave, runtime_params.initial_scale)?;

    info!("building difference of gaussian pyramid");
    let dog_pyramid = compute_difference_of_gaussians(&scale_space)?;

    let features = detect_sift_features(&dog_pyramid, runtime_params.contrast_threshold);
    info!("coarse keypoint detection found {} candidates", features.len());

    let refined_features = sift_feature_refinement(&dog_pyramid, &features, runtime_params);
    info!("{} keypoints survived refinement", refined_features.len());

    if refined_features.is_empty() {
        warn!("0 keypoints for {}x{} image", image.rows(), image.cols());
    }

    generate_descriptors(image, &refined_features, runtime_params)
}

pub fn execute_sift_on_gray_image(gray_image: &GrayImage, runtime_params: &SiftRuntimeParams) -> Result<Vec<SiftKeypoint>> {
    execute_sift(&Image::from_gray_image(gray_image), runtime_params)
}

pub fn generate_match_pairs(keypoints_a: &[SiftKeypoint], keypoints_b: &[SiftKeypoint], ratio: Float) -> Vec<Match> {
    let descriptors_a = keypoints_a.iter().map(|k| k.descriptor.clone()).collect::<Vec<SiftDescriptor>>();
    let descriptors_b = keypoints_b.iter().map(|k| k.descriptor.clone()).collect::<Vec<SiftDescriptor>>();
    match_descriptor_sets(&descriptors_a, &descriptors_b, ratio)
}
