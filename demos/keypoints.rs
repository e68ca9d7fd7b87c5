extern crate image as image_rs;
extern crate color_eyre;
extern crate logpolar_sift;

use std::path::Path;

use color_eyre::eyre::Result;
use logpolar_sift::image::Image;
use logpolar_sift::pyramid::sift::{execute_sift, sift_runtime_params::SiftRuntimeParams};
use logpolar_sift::visualize::draw_keypoints;

fn main() -> Result<()> {
    color_eyre::install()?;
    env_logger::init();

    let image_name = "tower";
    let image_format = "png";
    let image_folder = "images/";
    let image_out_folder = "output/";
    let image_path = format!("{}{}.{}",image_folder,image_name, image_format);
    let keypoints_out_path = format!("{}{}_keypoints.{}",image_out_folder,image_name,image_format);
    let keypoints_yaml_path = format!("{}{}_keypoints.yaml",image_out_folder,image_name);

    let runtime_params = SiftRuntimeParams::default();

    let gray_image = image_rs::open(&Path::new(&image_path))?.to_luma8();
    let image = Image::from_gray_image(&gray_image);

    let keypoints = execute_sift(&image, &runtime_params)?;
    println!("number of keypoints: {}", keypoints.len());

    let features = keypoints.iter().map(|k| k.feature).collect::<Vec<_>>();
    draw_keypoints(&image, &features).save(keypoints_out_path)?;
    std::fs::write(keypoints_yaml_path, serde_yaml::to_string(&(runtime_params, &keypoints))?)?;

    Ok(())
}
