use std::path::Path;

use tilt_image::{Image, ImageSize};
use tilt_imgproc::interpolation::InterpolationMode;
use tilt_imgproc::resize::resize_fast;
use tilt_imgproc::warp::{get_projection_matrix3d, warp_perspective};
use tilt_io::functional::read_image_any_rgb8;

/// An error type for the rotator module.
#[derive(thiserror::Error, Debug)]
pub enum RotatorError {
    /// Error when loading or saving the image file.
    #[error(transparent)]
    Io(#[from] tilt_io::IoError),

    /// Error when creating or transforming the image.
    #[error(transparent)]
    Image(#[from] tilt_image::ImageError),
}

/// Rotation angles and translation offsets for [`PerspectiveRotator::rotate_along_axis`].
///
/// All fields default to zero, so partial requests read naturally:
///
/// ```
/// use tilt::RotationArgs;
///
/// let args = RotationArgs {
///     gamma: 30.0,
///     ..Default::default()
/// };
/// assert_eq!(args.theta, 0.0);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RotationArgs {
    /// Rotation around the x axis in degrees.
    pub theta: f32,
    /// Rotation around the y axis in degrees.
    pub phi: f32,
    /// Rotation around the z axis in degrees (an in-plane rotation).
    pub gamma: f32,
    /// Translation along the x axis in pixels.
    pub dx: f32,
    /// Translation along the y axis in pixels.
    pub dy: f32,
    /// Translation along the z axis in pixels.
    ///
    /// Kept for compatibility with the classic interface, but it has no
    /// effect: the z translation is always replaced by the focal length
    /// derived from `gamma` before the transform is built.
    pub dz: f32,
}

/// Applies simulated 3D perspective rotations to a loaded image.
///
/// The rotator holds an rgb image in f32 and its fixed dimensions. Each
/// call to [`rotate_along_axis`](Self::rotate_along_axis) is an independent,
/// pure computation over the held image, so a rotator can be shared across
/// threads.
///
/// # Example
///
/// ```no_run
/// use tilt::{PerspectiveRotator, RotationArgs};
///
/// let rotator = PerspectiveRotator::from_file("dog.jpg", None)?;
/// let rotated = rotator.rotate_along_axis(RotationArgs {
///     gamma: 30.0,
///     dx: 100.0,
///     dy: 100.0,
///     ..Default::default()
/// })?;
///
/// assert_eq!(rotated.width(), rotator.size().width * 2);
/// # Ok::<(), tilt::RotatorError>(())
/// ```
pub struct PerspectiveRotator {
    image: Image<f32, 3>,
}

impl PerspectiveRotator {
    /// Create a rotator from an image already in f32.
    pub fn new(image: Image<f32, 3>) -> Self {
        Self { image }
    }

    /// Create a rotator from an rgb8 image.
    pub fn from_rgb8(image: &Image<u8, 3>) -> Result<Self, RotatorError> {
        Ok(Self {
            image: image.cast::<f32>()?,
        })
    }

    /// Create a rotator by loading an image file, optionally resized to a
    /// target shape.
    ///
    /// # Arguments
    ///
    /// * `file_path` - The path to a valid image file.
    /// * `shape` - Resize the loaded image to this size, or keep the
    ///   original size when `None`.
    ///
    /// # Errors
    ///
    /// Fails if the path cannot be read or decoded.
    pub fn from_file(
        file_path: impl AsRef<Path>,
        shape: Option<ImageSize>,
    ) -> Result<Self, RotatorError> {
        let image = read_image_any_rgb8(file_path)?;

        let image = match shape {
            Some(shape) if shape != image.size() => {
                let mut resized = Image::from_size_val(shape, 0)?;
                resize_fast(&image, &mut resized, InterpolationMode::Bilinear)?;
                resized
            }
            _ => image,
        };

        Self::from_rgb8(&image)
    }

    /// Get the size of the held image in pixels.
    pub fn size(&self) -> ImageSize {
        self.image.size()
    }

    /// Get a reference to the held image.
    pub fn image(&self) -> &Image<f32, 3> {
        &self.image
    }

    /// Rotate the held image along the x, y and z axes and translate it,
    /// producing a new image of twice the width and height.
    ///
    /// Angles are in degrees. The output canvas is doubled in both
    /// dimensions so rotated content has room to stay in view; pixels with
    /// no source mapping are filled black.
    ///
    /// Note that repeated rotations do not compose into a round trip: each
    /// call derives a fresh focal length from its own `gamma` and doubles
    /// the canvas, so rotating by `gamma` and then by `-gamma` does not
    /// reconstruct the original image.
    pub fn rotate_along_axis(&self, args: RotationArgs) -> Result<Image<f32, 3>, RotatorError> {
        let size = self.image.size();

        // args.dz is deliberately not consulted here, see RotationArgs
        let m = get_projection_matrix3d(size, args.theta, args.phi, args.gamma, args.dx, args.dy);

        let mut dst = Image::from_size_val(
            ImageSize {
                width: size.width * 2,
                height: size.height * 2,
            },
            0.0,
        )?;

        warp_perspective(&self.image, &mut dst, &m, InterpolationMode::Bilinear)?;

        Ok(dst)
    }
}
