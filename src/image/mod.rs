extern crate image as image_rs;
extern crate nalgebra as na;

use image_rs::{GrayImage, Luma};
use na::DMatrix;

use crate::Float;
use crate::error::{Result, SiftError};

pub mod filter;

/// Single channel floating point grid. Rows index y, columns index x.
#[derive(Debug,Clone,PartialEq)]
pub struct Image {
    pub buffer: DMatrix<Float>
}

impl Image {

    pub fn zeros(rows: usize, cols: usize) -> Image {
        Image::from_element(rows, cols, 0.0)
    }

    pub fn from_element(rows: usize, cols: usize, value: Float) -> Image {
        Image{ buffer: DMatrix::<Float>::from_element(rows,cols,value) }
    }

    pub fn from_row_slice(rows: usize, cols: usize, data: &[Float]) -> Image {
        Image{ buffer: DMatrix::<Float>::from_row_slice(rows,cols,data) }
    }

    /// Intensities are kept in their original 0..255 range.
    pub fn from_gray_image(image: &GrayImage) -> Image {
        Image{ buffer: Image::image8_to_matrix(image) }
    }

    pub fn rows(&self) -> usize {
        self.buffer.nrows()
    }

    pub fn cols(&self) -> usize {
        self.buffer.ncols()
    }

    pub fn size(&self) -> usize {
        self.buffer.ncols()*self.buffer.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    pub fn same_shape(&self, other: &Image) -> bool {
        self.buffer.shape() == other.buffer.shape()
    }

    pub fn get(&self, row: usize, col: usize) -> Result<Float> {
        match self.buffer.get((row,col)) {
            Some(&v) => Ok(v),
            None => Err(SiftError::OutOfRange(format!("({},{}) outside of {}x{} image",row,col,self.rows(),self.cols())))
        }
    }

    /// Signed lookup, `None` outside of the grid.
    pub fn get_signed(&self, row: isize, col: isize) -> Option<Float> {
        match (row, col) {
            (r,c) if r < 0 || c < 0 => None,
            (r,c) => self.buffer.get((r as usize,c as usize)).copied()
        }
    }

    pub fn difference(&self, other: &Image) -> Image {
        Image{ buffer: &self.buffer - &other.buffer }
    }

    pub fn to_image(&self) -> GrayImage {
        Image::matrix_to_image(&self.buffer)
    }

    /// Halves both dimensions (rounding down) by averaging 2x2 blocks.
    /// `None` if the result would have no pixels.
    pub fn downsample_half(image: &Image) -> Option<Image> {
        let new_width = image.cols()/2;
        let new_height = image.rows()/2;

        if new_height == 0 || new_width == 0 {
            return None;
        }

        let buffer = &image.buffer;
        let mut new_buffer = DMatrix::<Float>::zeros(new_height,new_width);
        for x in 0..new_width {
            for y in 0..new_height {
                let (r,c) = (2*y,2*x);
                new_buffer[(y,x)] = 0.25*(buffer[(r,c)] + buffer[(r+1,c)] + buffer[(r,c+1)] + buffer[(r+1,c+1)]);
            }
        }

        Some(Image{ buffer: new_buffer })
    }

    fn image8_to_matrix(gray_image: &GrayImage) -> DMatrix<Float> {
        let (width, height) = gray_image.dimensions();
        DMatrix::<Float>::from_fn(height as usize, width as usize, |r,c| gray_image.get_pixel(c as u32, r as u32).0[0] as Float)
    }

    /// Min-max stretch into `0..=255`. A constant matrix maps to black.
    fn matrix_to_image(matrix: &DMatrix<Float>) -> GrayImage {
        let (rows, cols) = matrix.shape();
        let (min, max) = match rows*cols {
            0 => (0.0, 0.0),
            _ => (matrix.min(), matrix.max())
        };
        let range = max - min;
        GrayImage::from_fn(cols as u32, rows as u32, |x,y| {
            let value = matrix[(y as usize, x as usize)];
            match range {
                range if range <= 0.0 => Luma([0]),
                range => Luma([((value - min)*(255.0/range)).round() as u8])
            }
        })
    }
}
