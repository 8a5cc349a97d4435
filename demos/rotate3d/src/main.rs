use clap::Parser;
use std::path::PathBuf;

use tilt::image::ImageSize;
use tilt::io::functional as F;
use tilt::{PerspectiveRotator, RotationArgs};

#[derive(Parser)]
/// Rotate an image in 3D perspective and save the result
struct Args {
    /// path to an input image
    #[arg(short, long)]
    image_path: PathBuf,

    /// path to write the rotated image to (jpg or png)
    #[arg(short, long)]
    output_path: PathBuf,

    /// rotation around the x axis in degrees
    #[arg(long, default_value_t = 0.0)]
    theta: f32,

    /// rotation around the y axis in degrees
    #[arg(long, default_value_t = 0.0)]
    phi: f32,

    /// rotation around the z axis in degrees
    #[arg(long, default_value_t = 0.0)]
    gamma: f32,

    /// translation along the x axis in pixels
    #[arg(long, default_value_t = 0.0)]
    dx: f32,

    /// translation along the y axis in pixels
    #[arg(long, default_value_t = 0.0)]
    dy: f32,

    /// resize the input to this width before rotating
    #[arg(long, requires = "height")]
    width: Option<usize>,

    /// resize the input to this height before rotating
    #[arg(long, requires = "width")]
    height: Option<usize>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = Args::parse();

    let shape = match (args.width, args.height) {
        (Some(width), Some(height)) => Some(ImageSize { width, height }),
        _ => None,
    };

    let rotator = PerspectiveRotator::from_file(&args.image_path, shape)?;
    log::info!(
        "loaded {} with size {}",
        args.image_path.display(),
        rotator.size()
    );

    let rotated = rotator.rotate_along_axis(RotationArgs {
        theta: args.theta,
        phi: args.phi,
        gamma: args.gamma,
        dx: args.dx,
        dy: args.dy,
        ..Default::default()
    })?;

    let rotated = rotated.cast::<u8>()?;
    F::write_image_any_rgb8(&args.output_path, &rotated)?;

    log::info!(
        "wrote {} with size {}",
        args.output_path.display(),
        rotated.size()
    );

    Ok(())
}
