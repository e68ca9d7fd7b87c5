use crate::image::Image;
use self::{kernel::Kernel,gauss_kernel::GaussKernel1D};

pub mod gauss_kernel;
pub mod kernel;

#[repr(u8)]
#[derive(Debug,Copy,Clone,PartialEq)]
pub enum FilterDirection {
    HORIZONTAL,
    VERTICAL
}

/// Mirrors an index into `0..len` without repeating the border sample (`gfedcb|abcdefgh|gfedcba`).
pub fn reflect_101(idx: isize, len: usize) -> usize {
    if len == 1 {
        return 0;
    }
    let period = 2*(len as isize - 1);
    match idx.rem_euclid(period) {
        i if i >= len as isize => (period - i) as usize,
        i => i as usize
    }
}

pub fn filter_1d_convolution(source: &Image, filter_direction: FilterDirection, filter_kernel: &dyn Kernel) -> Image {
    let kernel = filter_kernel.kernel();
    let step = filter_kernel.step();
    let kernel_radius_signed = filter_kernel.radius() as isize;

    let buffer = &source.buffer;
    let width = buffer.ncols();
    let height = buffer.nrows();
    let mut target = Image::zeros(height, width);

    for y in 0..height {
        for x in 0..width {
            let mut acc = 0.0;
            for kenel_idx in (-kernel_radius_signed..kernel_radius_signed+1).step_by(step) {
                let sample_value = match filter_direction {
                    FilterDirection::HORIZONTAL => buffer[(y,reflect_101(x as isize + kenel_idx, width))],
                    FilterDirection::VERTICAL => buffer[(reflect_101(y as isize + kenel_idx, height),x)]
                };
                let kenel_value = kernel[(0,(kenel_idx + kernel_radius_signed) as usize)];
                acc += sample_value*kenel_value;
            }

            target.buffer[(y,x)] = acc/filter_kernel.normalizing_constant();
        }
    }

    target
}

pub fn gaussian_2_d_convolution(image: &Image, filter_kernel: &GaussKernel1D) -> Image {
    let blur_hor = filter_1d_convolution(image, FilterDirection::HORIZONTAL, filter_kernel);
    filter_1d_convolution(&blur_hor, FilterDirection::VERTICAL, filter_kernel)
}

/// Separable Gaussian blur. A zero sigma leaves the image untouched.
pub fn gaussian_blur(image: &Image, sigma: crate::Float) -> Image {
    match sigma {
        s if s <= 0.0 || image.is_empty() => image.clone(),
        s => gaussian_2_d_convolution(image, &GaussKernel1D::with_std(s))
    }
}
