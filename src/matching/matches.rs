use rayon::prelude::*;
use serde::{Serialize, Deserialize};

use crate::Float;
use crate::matching::sift_descriptor::feature_vector::SiftDescriptor;

pub const DEFAULT_MATCH_RATIO: Float = 0.8;

#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct Match {
    pub index_one: usize,
    pub index_two: usize,
    pub distance: Float
}

/// Nearest neighbour of `a` in `bs` if it passes Lowe's ratio test against the second nearest.
pub fn match_feature(a: &SiftDescriptor, bs: &[SiftDescriptor], ratio: Float) -> Option<(usize,Float)> {
    let mut best_distance = Float::INFINITY;
    let mut second_best_distance = Float::INFINITY;
    let mut best_index: Option<usize> = None;

    for (index, b) in bs.iter().enumerate() {
        let distance = a.distance_between(b);
        if distance < best_distance {
            second_best_distance = best_distance;
            best_distance = distance;
            best_index = Some(index);
        } else if distance < second_best_distance {
            second_best_distance = distance;
        }
    }

    match best_index {
        Some(index) if best_distance < ratio*second_best_distance => Some((index,best_distance)),
        _ => None
    }
}

/// One directional matching of every descriptor of `set_one` into `set_two`, ordered by `index_one`.
pub fn match_descriptor_sets(set_one: &[SiftDescriptor], set_two: &[SiftDescriptor], ratio: Float) -> Vec<Match> {
    set_one.par_iter()
        .enumerate()
        .filter_map(|(index_one, a)| match_feature(a, set_two, ratio).map(|(index_two,distance)| Match{index_one,index_two,distance}))
        .collect()
}
