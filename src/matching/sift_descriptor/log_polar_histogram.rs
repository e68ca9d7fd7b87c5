extern crate nalgebra as na;

use na::DMatrix;

use crate::{Float,float,EPSILON};
use crate::error::{Result, SiftError};
use crate::image::Image;
use crate::features::sift_feature::SiftFeature;

/// Integer offsets `(dx,dy)` inside the closed disk of `radius`.
pub fn generate_circular_mask(radius: Float) -> Vec<(isize,isize)> {
    let r = radius.ceil() as isize;
    let mut mask = Vec::<(isize,isize)>::new();
    for dy in -r..r+1 {
        for dx in -r..r+1 {
            if ((dx*dx + dy*dy) as Float) <= radius*radius {
                mask.push((dx,dy));
            }
        }
    }
    mask
}

/// Polar angle in degrees within `[0,360)` and `ln(radius + eps)`.
pub fn calculate_angle_and_log_radius(dx: isize, dy: isize) -> (Float,Float) {
    let angle = match (dy as Float).atan2(dx as Float) {
        angle if angle < 0.0 => 2.0*float::consts::PI + angle,
        angle => angle
    };
    let radius = ((dx*dx + dy*dy) as Float).sqrt();
    (angle.to_degrees(), (radius + EPSILON).ln())
}

pub fn calculate_gaussian_window_weight(dx: isize, dy: isize, sigma: Float) -> Float {
    let sigma_window = (1.5*sigma).max(EPSILON);
    let dist_sq = (dx*dx + dy*dy) as Float;
    (-dist_sq/(2.0*sigma_window*sigma_window)).exp()
}

/// Gaussian weighted intensities around the feature, binned by angle (rows) and
/// normalized log radius (columns). The feature's scale index doubles as its spatial scale.
pub fn generate_log_polar_histogram(image: &Image, feature: &SiftFeature, num_angle_bins: usize, num_radius_bins: usize) -> Result<DMatrix<Float>> {
    if num_angle_bins == 0 || num_radius_bins == 0 {
        return Err(SiftError::InvalidArgument(format!("descriptor bins must be positive, got {}x{}", num_angle_bins, num_radius_bins)));
    }

    let mut histogram = DMatrix::<Float>::zeros(num_angle_bins, num_radius_bins);

    let x_center = feature.image_x().round() as isize;
    let y_center = feature.image_y().round() as isize;
    let sigma = feature.sigma_level;
    let max_radius = (4.5*sigma).max(EPSILON);
    let log_max_radius = max_radius.ln();

    for (dx,dy) in generate_circular_mask(max_radius) {
        let intensity = match image.get_signed(y_center + dy, x_center + dx) {
            Some(v) => v,
            None => continue
        };

        let (angle_degrees, log_radius) = match (dx,dy) {
            (0,0) => (0.0, EPSILON.ln()),
            _ => calculate_angle_and_log_radius(dx, dy)
        };

        let normalized_log_radius = match log_max_radius {
            l if l > EPSILON => log_radius/l,
            _ => 0.0
        };

        let angle_bin = ((angle_degrees/360.0*num_angle_bins as Float).floor() as isize).rem_euclid(num_angle_bins as isize) as usize;
        let radius_bin = ((normalized_log_radius*num_radius_bins as Float).floor() as isize).clamp(0, num_radius_bins as isize - 1) as usize;

        histogram[(angle_bin,radius_bin)] += intensity*calculate_gaussian_window_weight(dx, dy, sigma);
    }

    Ok(histogram)
}
