extern crate nalgebra as na;

use na::DMatrix;
use crate::Float;
use super::kernel::Kernel;

/// Zero mean sampled Gaussian, truncated at `ceil(4*std)`. The taps are divided by
/// their sum when filtering so that constant regions stay constant.
#[derive(Debug,Clone)]
pub struct GaussKernel1D {
    kernel: DMatrix<Float>,
    tap_sum: Float
}

impl GaussKernel1D {

    pub fn with_std(std: Float) -> GaussKernel1D {
        GaussKernel1D::with_radius(std, GaussKernel1D::radius_for_std(std))
    }

    pub fn with_radius(std: Float, radius: usize) -> GaussKernel1D {
        assert!(std > 0.0);
        let two_var = 2.0*std*std;
        let kernel = DMatrix::<Float>::from_fn(1, 2*radius+1, |_,c| {
            let x = c as Float - radius as Float;
            (-x*x/two_var).exp()
        });
        let tap_sum = kernel.sum();
        GaussKernel1D{kernel, tap_sum}
    }

    pub fn radius_for_std(std: Float) -> usize {
        std::cmp::max((4.0*std).ceil() as usize, 1)
    }
}

impl Kernel for GaussKernel1D {
    fn kernel(&self) -> &DMatrix<Float> {
        &self.kernel
    }

    fn step(&self) -> usize {
        1
    }

    fn normalizing_constant(&self) -> Float {
        self.tap_sum
    }
}
