extern crate nalgebra as na;

use na::{DMatrix,Matrix3};
use logpolar_sift::Float;
use logpolar_sift::error::SiftError;
use logpolar_sift::image::Image;
use logpolar_sift::pyramid::{Pyramid,DogPyramid,octave::Octave};
use logpolar_sift::features::sift_feature::{SiftFeature,RefinementOutcome,subpixel_refinement};
use logpolar_sift::features::sift_feature::processing::{calculate_keypoint_gradients,calculate_keypoint_hessian,is_on_edge};
use logpolar_sift::features::sift_feature::sampler::{DogSampler,access_scale_space};

const EDGE_R: Float = 10.0;

/// `f(x,y,s)` sampled on a `size x size x levels` grid.
fn sampled_dog(size: usize, levels: usize, f: impl Fn(Float,Float,Float) -> Float) -> DogPyramid {
    let images = (0..levels).map(|s| Image{buffer: DMatrix::from_fn(size,size,|r,c| f(c as Float,r as Float,s as Float))}).collect();
    Pyramid{octaves: vec![Octave{images, sigmas: vec![1.6; levels]}]}
}

fn candidate(x: Float, y: Float, s: Float) -> SiftFeature {
    SiftFeature{x, y, sigma_level: s, octave_level: 0, dog_value: 0.0}
}

fn peak_dog() -> DogPyramid {
    let mut images = vec![Image::zeros(5,5),Image::from_element(5,5,0.0),Image::zeros(5,5)];
    for r in 1..4 {
        for c in 1..4 {
            images[1].buffer[(r,c)] = 8.0;
        }
    }
    images[1].buffer[(2,2)] = 10.0;
    images[0].buffer[(2,2)] = 5.0;
    images[2].buffer[(2,2)] = 6.0;
    Pyramid{octaves: vec![Octave{images, sigmas: vec![1.6,2.0,2.5]}]}
}

#[test]
fn gradient_by_central_differences() {
    let gradient = calculate_keypoint_gradients(&peak_dog(),&candidate(2.0,2.0,1.0));
    assert_eq!(gradient,na::Vector3::new(0.0,0.0,0.5));
}

#[test]
fn hessian_by_finite_differences() {
    let hessian = calculate_keypoint_hessian(&peak_dog(),&candidate(2.0,2.0,1.0));
    assert_eq!(hessian[(0,0)],-4.0);
    assert_eq!(hessian[(1,1)],-4.0);
    assert_eq!(hessian[(2,2)],-9.0);
    assert_eq!(hessian,hessian.transpose());
    assert_eq!(hessian[(0,1)],0.0);
}

#[test]
fn sampler_reads_zero_outside() {
    let dog = peak_dog();
    let sampler = DogSampler::new(&dog,&candidate(0.0,0.0,0.0));
    assert_eq!(sampler.sample(-1,0,0),0.0);
    assert_eq!(sampler.sample(0,0,-1),0.0);
    assert_eq!(sampler.sample(0,0,5),0.0);
    assert_eq!(sampler.sample(2,2,1),10.0);
}

#[test]
fn direct_access_is_bounds_checked() {
    let dog = peak_dog();
    assert_eq!(access_scale_space(&dog,&candidate(2.0,2.0,1.0)),Ok(10.0));
    assert_eq!(access_scale_space(&dog,&candidate(2.2,1.9,0.8)),Ok(10.0));
    assert!(matches!(access_scale_space(&dog,&candidate(5.0,2.0,1.0)),Err(SiftError::OutOfRange(_))));
    assert!(matches!(access_scale_space(&dog,&candidate(-1.0,2.0,1.0)),Err(SiftError::OutOfRange(_))));
    assert!(matches!(access_scale_space(&dog,&candidate(2.0,2.0,3.0)),Err(SiftError::OutOfRange(_))));
    let mut other_octave = candidate(2.0,2.0,1.0);
    other_octave.octave_level = 1;
    assert!(matches!(access_scale_space(&dog,&other_octave),Err(SiftError::OutOfRange(_))));
}

#[test]
fn quadratic_peak_is_recovered() {
    let dog = sampled_dog(7,3,|x,y,s| 1.0 - 0.1*(x-3.2).powi(2) - 0.1*(y-3.0).powi(2) - 0.2*(s-1.0).powi(2));
    let feature = SiftFeature{dog_value: 0.996, ..candidate(3.0,3.0,1.0)};
    let refined = match subpixel_refinement(&dog,&feature,EDGE_R) {
        RefinementOutcome::Refined(refined) => refined,
        outcome => panic!("expected refinement, got {:?}", outcome)
    };
    assert!((refined.x - 3.2).abs() < 1e-6);
    assert!((refined.y - 3.0).abs() < 1e-6);
    assert!((refined.sigma_level - 1.0).abs() < 1e-6);
    assert_eq!(refined.octave_level,0);
    assert_eq!(refined.dog_value,0.996);
}

#[test]
fn scale_boundaries_are_rejected() {
    let dog = sampled_dog(7,3,|x,y,s| 1.0 - 0.1*(x-3.0).powi(2) - 0.1*(y-3.0).powi(2) - 0.2*(s-1.0).powi(2));
    assert_eq!(subpixel_refinement(&dog,&candidate(3.0,3.0,0.0),EDGE_R),RefinementOutcome::ScaleBoundary);
    assert_eq!(subpixel_refinement(&dog,&candidate(3.0,3.0,2.0),EDGE_R),RefinementOutcome::ScaleBoundary);
}

#[test]
fn flat_neighbourhood_is_degenerate() {
    let dog = sampled_dog(7,3,|_,_,_| 0.5);
    assert_eq!(subpixel_refinement(&dog,&candidate(3.0,3.0,1.0),EDGE_R),RefinementOutcome::DegenerateHessian);
}

#[test]
fn distant_peak_is_rejected() {
    let dog = sampled_dog(7,3,|x,y,s| 1.0 - 0.1*(x-3.8).powi(2) - 0.1*(y-3.0).powi(2) - 0.2*(s-1.0).powi(2));
    assert_eq!(subpixel_refinement(&dog,&candidate(3.0,3.0,1.0),EDGE_R),RefinementOutcome::OffsetTooLarge);
}

#[test]
fn refined_location_outside_image_is_rejected() {
    let mut images = vec![Image::zeros(5,5),Image::zeros(5,5),Image::zeros(5,5)];
    images[1].buffer[(2,0)] = -1.0;
    images[1].buffer[(2,1)] = 0.5;
    let dog = Pyramid{octaves: vec![Octave{images, sigmas: vec![1.6,2.0,2.5]}]};
    assert_eq!(subpixel_refinement(&dog,&candidate(0.0,2.0,1.0),EDGE_R),RefinementOutcome::OutOfBounds);
}

#[test]
fn missing_octave_is_out_of_bounds() {
    let dog = peak_dog();
    let feature = SiftFeature{octave_level: 3, ..candidate(2.0,2.0,1.0)};
    assert_eq!(subpixel_refinement(&dog,&feature,EDGE_R),RefinementOutcome::OutOfBounds);
}

#[test]
fn weak_peak_is_rejected() {
    let dog = sampled_dog(7,3,|x,y,s| 0.02 - 0.01*(x-3.0).powi(2) - 0.01*(y-3.0).powi(2) - 0.01*(s-1.0).powi(2));
    assert_eq!(subpixel_refinement(&dog,&candidate(3.0,3.0,1.0),EDGE_R),RefinementOutcome::LowContrast);
}

#[test]
fn ridge_is_rejected_as_edge() {
    let dog = sampled_dog(7,3,|x,y,s| 1.0 - 0.1*(x-3.0).powi(2) - 0.001*(y-3.0).powi(2) - 0.2*(s-1.0).powi(2));
    assert_eq!(subpixel_refinement(&dog,&candidate(3.0,3.0,1.0),EDGE_R),RefinementOutcome::EdgeResponse);
}

#[test]
fn edge_ratio_test() {
    let isotropic = Matrix3::<Float>::from_diagonal(&na::Vector3::new(-1.0,-1.0,-1.0));
    let elongated = Matrix3::<Float>::from_diagonal(&na::Vector3::new(-20.0,-1.0,-1.0));
    let saddle = Matrix3::<Float>::from_diagonal(&na::Vector3::new(-1.0,1.0,-1.0));
    let flat = Matrix3::<Float>::zeros();
    assert!(!is_on_edge(&isotropic,EDGE_R));
    assert!(is_on_edge(&elongated,EDGE_R));
    assert!(!is_on_edge(&saddle,EDGE_R));
    assert!(!is_on_edge(&flat,EDGE_R));
}

#[test]
fn outcome_helpers() {
    let feature = candidate(1.0,1.0,1.0);
    assert_eq!(RefinementOutcome::Refined(feature).refined(),Some(feature));
    assert!(!RefinementOutcome::EdgeResponse.is_refined());
}

#[test]
fn refined_position_past_last_interior_column_is_kept() {
    let dog = sampled_dog(7,3,|x,y,s| 1.0 - 0.1*(x-5.3).powi(2) - 0.1*(y-3.0).powi(2) - 0.2*(s-1.0).powi(2));
    let refined = subpixel_refinement(&dog,&candidate(5.0,3.0,1.0),EDGE_R).refined().unwrap();
    assert!((refined.x - 5.3).abs() < 1e-6);
    assert!(refined.x > 7.0 - 2.0 && refined.x < 7.0 - 1.0);
}
