pub mod sift_descriptor;
pub mod matches;
