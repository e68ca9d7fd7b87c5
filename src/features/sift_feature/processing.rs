extern crate nalgebra as na;

use na::{Matrix3,Vector3};
use serde::{Serialize, Deserialize};

use crate::{Float,EPSILON};
use crate::numerics::{calculate_determinant,calculate_inverse,spatial_block};
use crate::pyramid::DogPyramid;
use crate::features::sift_feature::{SiftFeature,sampler::{DogSampler,access_scale_space}};

/// Largest accepted Newton step per axis. The step is taken once, never iterated.
pub const MAX_OFFSET: Float = 0.5;
/// Minimum |DoG| at the refined location.
pub const REFINED_CONTRAST_THRESHOLD: Float = 0.03;

#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub enum RefinementOutcome {
    Refined(SiftFeature),
    ScaleBoundary,
    DegenerateHessian,
    OffsetTooLarge,
    OutOfBounds,
    LowContrast,
    EdgeResponse
}

impl RefinementOutcome {
    pub fn refined(&self) -> Option<SiftFeature> {
        match self {
            RefinementOutcome::Refined(feature) => Some(*feature),
            _ => None
        }
    }

    pub fn is_refined(&self) -> bool {
        self.refined().is_some()
    }
}

/// Central differences along x, y and scale.
pub fn calculate_keypoint_gradients(dog_pyramid: &DogPyramid, feature: &SiftFeature) -> Vector3<Float> {
    let dog = DogSampler::new(dog_pyramid, feature);
    Vector3::new(
        0.5*(dog.sample(1,0,0) - dog.sample(-1,0,0)),
        0.5*(dog.sample(0,1,0) - dog.sample(0,-1,0)),
        0.5*(dog.sample(0,0,1) - dog.sample(0,0,-1))
    )
}

pub fn calculate_keypoint_hessian(dog_pyramid: &DogPyramid, feature: &SiftFeature) -> Matrix3<Float> {
    let dog = DogSampler::new(dog_pyramid, feature);
    let center = dog.sample(0,0,0);

    let dxx = dog.sample(1,0,0) + dog.sample(-1,0,0) - 2.0*center;
    let dyy = dog.sample(0,1,0) + dog.sample(0,-1,0) - 2.0*center;
    let dss = dog.sample(0,0,1) + dog.sample(0,0,-1) - 2.0*center;

    let dxy = 0.25*(dog.sample(1,1,0) - dog.sample(1,-1,0) - dog.sample(-1,1,0) + dog.sample(-1,-1,0));
    let dxs = 0.25*(dog.sample(1,0,1) - dog.sample(1,0,-1) - dog.sample(-1,0,1) + dog.sample(-1,0,-1));
    let dys = 0.25*(dog.sample(0,1,1) - dog.sample(0,1,-1) - dog.sample(0,-1,1) + dog.sample(0,-1,-1));

    Matrix3::new(dxx,dxy,dxs,
                 dxy,dyy,dys,
                 dxs,dys,dss)
}

/// Principal curvature ratio test on the spatial block of `hessian`.
/// A block without usable determinant is not treated as an edge.
pub fn is_on_edge(hessian: &Matrix3<Float>, edge_r: Float) -> bool {
    let spatial = spatial_block(hessian);
    let trace = spatial.trace();
    let determinant = spatial[(0,0)]*spatial[(1,1)] - spatial[(0,1)].powi(2);

    if determinant.abs() < EPSILON {
        return false;
    }

    let hessian_factor = trace.powi(2)/determinant;
    let r_factor = (edge_r+1.0).powi(2)/edge_r;
    hessian_factor >= r_factor
}

/// Single Newton step from the discrete extremum to the stationary point of the
/// local quadratic, followed by contrast and edge checks.
pub fn subpixel_refinement(dog_pyramid: &DogPyramid, feature: &SiftFeature, edge_r: Float) -> RefinementOutcome {

    let level_count = match dog_pyramid.octaves.get(feature.octave_level) {
        Some(octave) => octave.len() as Float,
        None => return RefinementOutcome::OutOfBounds
    };

    if feature.sigma_level <= 0.0 || feature.sigma_level >= level_count - 1.0 {
        return RefinementOutcome::ScaleBoundary;
    }

    let gradient = calculate_keypoint_gradients(dog_pyramid, feature);
    let hessian = calculate_keypoint_hessian(dog_pyramid, feature);

    if calculate_determinant(&hessian).abs() < EPSILON {
        return RefinementOutcome::DegenerateHessian;
    }

    let offset = -(calculate_inverse(&hessian)*gradient);
    if offset.iter().any(|v| v.abs() >= MAX_OFFSET) {
        return RefinementOutcome::OffsetTooLarge;
    }

    let mut refined = *feature;
    refined.x += offset[0];
    refined.y += offset[1];
    refined.sigma_level += offset[2];

    let octave = &dog_pyramid.octaves[refined.octave_level];
    let closest_sigma_level = refined.sigma_level.round();
    if closest_sigma_level < 0.0 || closest_sigma_level >= level_count {
        return RefinementOutcome::OutOfBounds;
    }

    let cols = octave.cols() as Float;
    let rows = octave.rows() as Float;
    // Half open: a refined x in [cols-2, cols-1) is kept, likewise for y and scale.
    if refined.x < 0.0 || refined.x >= cols - 1.0 ||
       refined.y < 0.0 || refined.y >= rows - 1.0 ||
       refined.sigma_level < 0.0 || refined.sigma_level >= level_count - 1.0 {
        return RefinementOutcome::OutOfBounds;
    }

    let refined_value = match access_scale_space(dog_pyramid, &refined) {
        Ok(v) => v,
        Err(_) => return RefinementOutcome::OutOfBounds
    };
    if refined_value.abs() < REFINED_CONTRAST_THRESHOLD {
        return RefinementOutcome::LowContrast;
    }

    if is_on_edge(&hessian, edge_r) {
        return RefinementOutcome::EdgeResponse;
    }

    RefinementOutcome::Refined(refined)
}
