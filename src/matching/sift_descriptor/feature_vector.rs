extern crate nalgebra as na;

use na::DMatrix;
use num_complex::Complex;
use serde::{Serialize, Deserialize};

use crate::{Float,float,EPSILON};
use crate::error::Result;
use crate::image::Image;
use crate::features::sift_feature::SiftFeature;
use crate::matching::sift_descriptor::log_polar_histogram::generate_log_polar_histogram;

/// DFT encoded log-polar histogram. A cyclic shift of the histogram only changes the phase
/// of the coefficients, which keeps the descriptor stable under rotation.
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct SiftDescriptor {
    pub descriptor: Vec<Complex<Float>>,
    pub dominant_orientation: Float
}

/// Row major (angle major) flattening.
pub fn flatten_histogram(histogram: &DMatrix<Float>) -> Vec<Float> {
    histogram.transpose().iter().cloned().collect()
}

/// First index holding the maximum.
fn argmax(values: &[Float]) -> Option<usize> {
    values.iter().enumerate().fold(None, |best: Option<(usize,Float)>, (i,&v)| match best {
        Some((_,b)) if v <= b => best,
        _ => Some((i,v))
    }).map(|(i,_)| i)
}

/// Orientation of the strongest bin of a plain orientation histogram, in degrees.
pub fn find_dominant_orientation(histogram: &[Float]) -> Float {
    match argmax(histogram) {
        Some(bin) => (360.0/histogram.len() as Float)*bin as Float,
        None => 0.0
    }
}

/// Angle of the strongest cell of an `angle x radius` histogram, in degrees.
pub fn find_dominant_orientation_log_polar(histogram: &DMatrix<Float>) -> Float {
    let flattened = flatten_histogram(histogram);
    match argmax(&flattened) {
        Some(idx) => (360.0/histogram.nrows() as Float)*(idx/histogram.ncols()) as Float,
        None => 0.0
    }
}

pub fn l2_normalize(descriptor: &mut [Float]) {
    let norm = descriptor.iter().map(|v| v*v).sum::<Float>().sqrt();
    if norm > EPSILON {
        descriptor.iter_mut().for_each(|v| *v /= norm);
    }
}

pub fn l2_normalize_complex(descriptor: &mut [Complex<Float>]) {
    let norm = descriptor.iter().map(|v| v.norm_sqr()).sum::<Float>().sqrt();
    if norm > EPSILON {
        descriptor.iter_mut().for_each(|v| *v /= norm);
    }
}

/// Naive O(N^2) transform: `X[k] = sum_n x[n] exp(-2 pi i k n / N)`.
pub fn calculate_dft(signal: &[Float]) -> Vec<Complex<Float>> {
    let n_samples = signal.len() as Float;
    (0..signal.len()).map(|k| {
        signal.iter().enumerate().map(|(n,&x)| {
            let angle = -2.0*float::consts::PI*(k as Float)*(n as Float)/n_samples;
            Complex::from_polar(x, angle)
        }).sum()
    }).collect()
}

pub fn euclidean_distance(a: &[Complex<Float>], b: &[Complex<Float>]) -> Float {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b.iter()).map(|(x,y)| (x-y).norm_sqr()).sum::<Float>().sqrt()
}

impl SiftDescriptor {

    /// Fails with `InvalidArgument` when either bin count is zero.
    pub fn new(image: &Image, feature: &SiftFeature, num_angle_bins: usize, num_radius_bins: usize) -> Result<SiftDescriptor> {
        let histogram = generate_log_polar_histogram(image, feature, num_angle_bins, num_radius_bins)?;
        Ok(SiftDescriptor::from_histogram(&histogram))
    }

    pub fn from_histogram(histogram: &DMatrix<Float>) -> SiftDescriptor {
        let mut flattened = flatten_histogram(histogram);
        let dominant_orientation = find_dominant_orientation_log_polar(histogram);
        l2_normalize(&mut flattened);
        let mut descriptor = calculate_dft(&flattened);
        l2_normalize_complex(&mut descriptor);
        SiftDescriptor{descriptor, dominant_orientation}
    }

    pub fn len(&self) -> usize {
        self.descriptor.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptor.is_empty()
    }

    pub fn distance_between(&self, other: &SiftDescriptor) -> Float {
        euclidean_distance(&self.descriptor, &other.descriptor)
    }
}
