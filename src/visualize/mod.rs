extern crate image as image_rs;

use image_rs::{RgbImage, Rgb};

use crate::{Float,float};
use float::consts::PI;
use crate::image::Image;
use crate::features::sift_feature::SiftFeature;
use crate::matching::matches::Match;
use crate::pyramid::sift::SiftKeypoint;

pub const KEYPOINT_COLOR: Rgb<u8> = Rgb([255,0,0]);
pub const MATCH_COLOR: Rgb<u8> = Rgb([0,255,0]);

fn to_rgb(image: &Image) -> RgbImage {
    let gray = image.to_image();
    RgbImage::from_fn(gray.width(), gray.height(), |x,y| {
        let v = gray.get_pixel(x,y).0[0];
        Rgb([v,v,v])
    })
}

fn put_pixel_checked(image: &mut RgbImage, x: isize, y: isize, color: Rgb<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < image.width() && (y as u32) < image.height() {
        image.put_pixel(x as u32, y as u32, color);
    }
}

pub fn draw_circle(image: &mut RgbImage, x_center: Float, y_center: Float, radius: Float, color: Rgb<u8>) {
    let steps = std::cmp::max((2.0*PI*radius).ceil() as usize*4, 8);
    for i in 0..steps {
        let t = 2.0*PI*(i as Float)/(steps as Float);
        let x = (x_center + radius*t.cos()).round() as isize;
        let y = (y_center + radius*t.sin()).round() as isize;
        put_pixel_checked(image, x, y, color);
    }
}

pub fn draw_line(image: &mut RgbImage, (x_start,y_start): (Float,Float), (x_end,y_end): (Float,Float), color: Rgb<u8>) {
    let steps = std::cmp::max((x_end-x_start).abs().max((y_end-y_start).abs()).ceil() as usize, 1);
    for i in 0..steps+1 {
        let t = i as Float/steps as Float;
        let x = (x_start + t*(x_end-x_start)).round() as isize;
        let y = (y_start + t*(y_end-y_start)).round() as isize;
        put_pixel_checked(image, x, y, color);
    }
}

/// Circles at the full resolution position of every feature.
pub fn draw_keypoints(image: &Image, features: &[SiftFeature]) -> RgbImage {
    let mut canvas = to_rgb(image);
    for feature in features {
        draw_circle(&mut canvas, feature.image_x(), feature.image_y(), 2.0, KEYPOINT_COLOR);
    }
    canvas
}

/// Both images side by side with a line per match.
pub fn display_matches(image_a: &Image, image_b: &Image, keypoints_a: &[SiftKeypoint], keypoints_b: &[SiftKeypoint], matches: &[Match]) -> RgbImage {
    let rgb_a = to_rgb(image_a);
    let rgb_b = to_rgb(image_b);
    let width = rgb_a.width() + rgb_b.width();
    let height = std::cmp::max(rgb_a.height(), rgb_b.height());
    let offset = rgb_a.width() as Float;

    let mut canvas = RgbImage::new(width, height);
    for (x,y,p) in rgb_a.enumerate_pixels() {
        canvas.put_pixel(x, y, *p);
    }
    for (x,y,p) in rgb_b.enumerate_pixels() {
        canvas.put_pixel(x + rgb_a.width(), y, *p);
    }

    for m in matches {
        let (feature_a, feature_b) = match (keypoints_a.get(m.index_one), keypoints_b.get(m.index_two)) {
            (Some(a), Some(b)) => (a.feature, b.feature),
            _ => continue
        };
        let start = (feature_a.image_x(), feature_a.image_y());
        let end = (offset + feature_b.image_x(), feature_b.image_y());
        draw_circle(&mut canvas, start.0, start.1, 2.0, KEYPOINT_COLOR);
        draw_circle(&mut canvas, end.0, end.1, 2.0, KEYPOINT_COLOR);
        draw_line(&mut canvas, start, end, MATCH_COLOR);
    }

    canvas
}
