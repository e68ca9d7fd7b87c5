use crate::error::{Result, SiftError};
use self::octave::Octave;

pub mod octave;
pub mod dog;
pub mod sift;

#[derive(Debug,Clone)]
pub struct Pyramid<T> {
    pub octaves: Vec<T>
}

impl<T> Pyramid<T> {
    pub fn empty(octave_count: usize) -> Pyramid<T> {
        Pyramid{octaves: Vec::<T>::with_capacity(octave_count)}
    }

    pub fn len(&self) -> usize {
        self.octaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.octaves.is_empty()
    }
}

/// Gaussian scale-space: octave `i+1` starts from the last image of octave `i`, downsampled by 2.
pub type ScaleSpace = Pyramid<Octave>;
/// Same shape as a `ScaleSpace` with one image less per octave.
pub type DogPyramid = Pyramid<Octave>;

impl Pyramid<Octave> {

    /// Bounds checked lookup used by the direct accessors.
    pub fn octave(&self, octave_level: usize) -> Result<&Octave> {
        self.octaves.get(octave_level).ok_or_else(|| SiftError::OutOfRange(format!("octave {} of {}", octave_level, self.octaves.len())))
    }
}
