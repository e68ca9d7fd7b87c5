pub mod error;
pub mod image;
pub mod numerics;
pub mod pyramid;
pub mod features;
pub mod matching;
pub mod visualize;

pub use self::error::SiftError;

macro_rules! define_float {
    ($f:tt) => {
        pub use std::$f as float;
        pub type Float = $f;
    }
}

define_float!(f64);

/// Marks "no usable curvature / norm" across the crate.
pub const EPSILON: Float = 1e-6;

pub fn reconstruct_original_coordiantes(x: Float, y: Float, octave_level: usize) -> (Float,Float) {
    let factor = (octave_level as Float).exp2();
    (x*factor,y*factor)
}
