extern crate nalgebra as na;

use na::DMatrix;
use crate::Float;

pub trait Kernel {
    // Filter as a 1 x n row
    fn kernel(&self) -> &DMatrix<Float>;
    // Size at which the filter is traversed
    fn step(&self) -> usize;
    // Half of the width of the kernel save the center element
    fn radius(&self) -> usize {
        (self.kernel().ncols()-1)/2
    }

    fn normalizing_constant(&self) -> Float;
}
