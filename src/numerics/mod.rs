extern crate nalgebra as na;

use na::{Matrix2,Matrix3};
use crate::{Float,EPSILON};

/// Cofactor expansion along the first row.
pub fn calculate_determinant(m: &Matrix3<Float>) -> Float {
    (0..3).map(|col| {
        m[(0,col)]*(m[(1,(col+1)%3)]*m[(2,(col+2)%3)] - m[(1,(col+2)%3)]*m[(2,(col+1)%3)])
    }).sum()
}

/// Transposed cofactor matrix.
pub fn calculate_adjugate(m: &Matrix3<Float>) -> Matrix3<Float> {
    let mut adjugate = Matrix3::<Float>::zeros();
    for row in 0..3 {
        for col in 0..3 {
            let cofactor = m[((row+1)%3,(col+1)%3)]*m[((row+2)%3,(col+2)%3)]
                         - m[((row+1)%3,(col+2)%3)]*m[((row+2)%3,(col+1)%3)];
            adjugate[(col,row)] = cofactor;
        }
    }
    adjugate
}

/// Closed form inverse. Returns the zero matrix for a (near) singular input.
pub fn calculate_inverse(m: &Matrix3<Float>) -> Matrix3<Float> {
    let det = calculate_determinant(m);
    match det.abs() {
        d if d < EPSILON => Matrix3::<Float>::zeros(),
        _ => calculate_adjugate(m)/det
    }
}

/// Upper left spatial block of a (x,y,s) Hessian.
pub fn spatial_block(m: &Matrix3<Float>) -> Matrix2<Float> {
    m.fixed_view::<2,2>(0,0).into_owned()
}
