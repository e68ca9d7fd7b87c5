extern crate image as image_rs;

use rand::{Rng, SeedableRng, rngs::SmallRng};
use logpolar_sift::Float;
use logpolar_sift::error::SiftError;
use logpolar_sift::image::Image;
use logpolar_sift::pyramid::sift::{execute_sift,execute_sift_on_gray_image,generate_match_pairs,sift_runtime_params::SiftRuntimeParams};
use logpolar_sift::visualize::{draw_keypoints,display_matches,KEYPOINT_COLOR};
use logpolar_sift::features::sift_feature::SiftFeature;

fn noise_image(rows: usize, cols: usize, seed: u64) -> Image {
    let mut rng = SmallRng::seed_from_u64(seed);
    let data = (0..rows*cols).map(|_| rng.gen_range(1.0..255.0)).collect::<Vec<Float>>();
    Image::from_row_slice(rows,cols,&data)
}

#[test]
fn flat_image_has_no_keypoints() {
    let keypoints = execute_sift(&Image::from_element(64,64,100.0),&SiftRuntimeParams::default()).unwrap();
    assert!(keypoints.is_empty());
}

#[test]
fn flat_gray_image_has_no_keypoints() {
    let gray = image_rs::GrayImage::from_pixel(48,32,image_rs::Luma([90]));
    assert!(execute_sift_on_gray_image(&gray,&SiftRuntimeParams::default()).unwrap().is_empty());
}

#[test]
fn keypoints_on_noise() {
    let image = noise_image(64,64,42);
    let params = SiftRuntimeParams::default();
    let keypoints = execute_sift(&image,&params).unwrap();
    assert!(!keypoints.is_empty());

    let octave_count = params.octave_count_for(64,64);
    for keypoint in &keypoints {
        let feature = keypoint.feature;
        assert!(feature.octave_level < octave_count);
        assert!(feature.image_x() >= 0.0 && feature.image_x() < 64.0);
        assert!(feature.image_y() >= 0.0 && feature.image_y() < 64.0);
        assert!(feature.sigma_level > 0.0 && feature.sigma_level < (params.scales_per_octave+1) as Float - 1.0);

        assert_eq!(keypoint.descriptor.len(),params.num_angular_bins*params.num_radial_bins);
        let energy = keypoint.descriptor.descriptor.iter().map(|c| c.norm_sqr()).sum::<Float>();
        assert!((energy - 1.0).abs() < 1e-5);
    }
}

#[test]
fn self_matches_are_exact() {
    let image = noise_image(64,64,7);
    let params = SiftRuntimeParams::default();
    let keypoints = execute_sift(&image,&params).unwrap();
    let matches = generate_match_pairs(&keypoints,&keypoints,params.match_ratio);

    assert!(!matches.is_empty());
    for m in &matches {
        assert_eq!(m.index_one,m.index_two);
        assert!(m.distance < 1e-9);
    }
}

#[test]
fn pipeline_is_deterministic() {
    let image = noise_image(48,48,3);
    let params = SiftRuntimeParams::default();
    assert_eq!(execute_sift(&image,&params).unwrap(),execute_sift(&image,&params).unwrap());
}

#[test]
fn too_many_octaves_fail() {
    let params = SiftRuntimeParams{octave_count: Some(3), ..SiftRuntimeParams::default()};
    assert!(matches!(execute_sift(&Image::from_element(2,2,1.0),&params),Err(SiftError::LogicError(_))));
}

#[test]
fn invalid_parameters_fail() {
    let image = noise_image(16,16,1);
    let no_bins = SiftRuntimeParams{num_radial_bins: 0, ..SiftRuntimeParams::default()};
    let no_scales = SiftRuntimeParams{scales_per_octave: 0, ..SiftRuntimeParams::default()};
    assert!(matches!(execute_sift(&image,&no_bins),Err(SiftError::InvalidArgument(_))));
    assert!(matches!(execute_sift(&image,&no_scales),Err(SiftError::InvalidArgument(_))));
    assert!(matches!(execute_sift(&Image::zeros(0,0),&SiftRuntimeParams::default()),Err(SiftError::InvalidArgument(_))));
}

#[test]
fn params_from_yaml() {
    let params = SiftRuntimeParams::from_yaml("scales_per_octave: 3\ncontrast_threshold: 0.1\n").unwrap();
    assert_eq!(params.scales_per_octave,3);
    assert_eq!(params.contrast_threshold,0.1);
    assert_eq!(params.initial_scale,1.6);
    assert_eq!(params.octave_count,None);

    let default = SiftRuntimeParams::default();
    assert_eq!(SiftRuntimeParams::from_yaml(&default.to_yaml().unwrap()).unwrap(),default);
}

#[test]
fn octave_count_from_image_size() {
    let params = SiftRuntimeParams::default();
    assert_eq!(params.octave_count_for(512,640),6);
    assert_eq!(params.octave_count_for(64,64),3);
    assert_eq!(params.octave_count_for(8,8),1);
    assert_eq!(params.octave_count_for(0,0),1);
    assert_eq!(SiftRuntimeParams{octave_count: Some(2), ..params}.octave_count_for(512,512),2);
}

#[test]
fn keypoints_are_drawn_at_full_resolution() {
    let image = Image::zeros(40,40);
    let feature = SiftFeature{x: 5.0, y: 5.0, sigma_level: 1.0, octave_level: 1, dog_value: 1.0};
    let canvas = draw_keypoints(&image,&[feature]);
    assert_eq!(canvas.dimensions(),(40,40));
    assert_eq!(*canvas.get_pixel(12,10),KEYPOINT_COLOR);
    assert_ne!(*canvas.get_pixel(10,10),KEYPOINT_COLOR);
}

#[test]
fn match_canvas_is_side_by_side() {
    let canvas = display_matches(&Image::zeros(20,30),&Image::zeros(25,10),&[],&[],&[]);
    assert_eq!(canvas.dimensions(),(40,25));
}
