extern crate image as image_rs;
extern crate color_eyre;
extern crate logpolar_sift;

use std::path::Path;

use color_eyre::eyre::Result;
use logpolar_sift::image::Image;
use logpolar_sift::pyramid::sift::{execute_sift, generate_match_pairs, sift_runtime_params::SiftRuntimeParams};
use logpolar_sift::visualize::display_matches;

fn main() -> Result<()> {
    color_eyre::install()?;
    env_logger::init();

    let image_name = "blur";
    let image_name_2 = "blur_rotated";
    let image_format = "png";
    let image_folder = "images/";
    let image_out_folder = "output/";
    let image_path = format!("{}{}.{}",image_folder,image_name, image_format);
    let image_path_2 = format!("{}{}.{}",image_folder,image_name_2, image_format);
    let params_path = format!("{}sift.yaml",image_folder);
    let matches_out_path = format!("{}{}_matches.{}",image_out_folder,image_name,image_format);
    let matches_yaml_path = format!("{}{}_matches.yaml",image_out_folder,image_name);

    let runtime_params = match std::fs::read_to_string(&params_path) {
        Ok(yaml) => SiftRuntimeParams::from_yaml(&yaml)?,
        Err(_) => SiftRuntimeParams::default()
    };

    let image = Image::from_gray_image(&image_rs::open(&Path::new(&image_path))?.to_luma8());
    let image_2 = Image::from_gray_image(&image_rs::open(&Path::new(&image_path_2))?.to_luma8());

    let keypoints = execute_sift(&image, &runtime_params)?;
    let keypoints_2 = execute_sift(&image_2, &runtime_params)?;

    let match_pairs = generate_match_pairs(&keypoints, &keypoints_2, runtime_params.match_ratio);
    println!("number of matched pairs: {}", match_pairs.len());

    display_matches(&image, &image_2, &keypoints, &keypoints_2, &match_pairs).save(matches_out_path)?;
    std::fs::write(matches_yaml_path, serde_yaml::to_string(&match_pairs)?)?;

    Ok(())
}
