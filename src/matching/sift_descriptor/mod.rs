pub mod log_polar_histogram;
pub mod feature_vector;

pub const ANGLE_BINS: usize = 8;
pub const RADIUS_BINS: usize = 4;
