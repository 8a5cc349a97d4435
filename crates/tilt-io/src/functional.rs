use std::path::Path;

use tilt_image::{Image, ImageSize};

use crate::error::IoError;
use crate::{jpeg, png};

/// Reads an RGB image from the given file path.
///
/// The method tries to read from any image format supported by the
/// [image](https://crates.io/crates/image) crate and converts the result to
/// rgb8.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Returns
///
/// An image containing the rgb8 pixel data.
pub fn read_image_any_rgb8(file_path: impl AsRef<Path>) -> Result<Image<u8, 3>, IoError> {
    let file_path = file_path.as_ref().to_owned();

    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    // map the file to memory and decode directly from there
    let file = std::fs::File::open(file_path)?;
    let mmap = unsafe { memmap2::Mmap::map(&file)? };

    let img = image::ImageReader::new(std::io::Cursor::new(&mmap))
        .with_guessed_format()?
        .decode()?;

    let size = ImageSize {
        width: img.width() as usize,
        height: img.height() as usize,
    };

    Ok(Image::new(size, img.into_rgb8().into_raw())?)
}

/// Writes an RGB image to the given file path, choosing the format from the
/// file extension.
///
/// Supported extensions are `jpg`, `jpeg` (quality 95) and `png`.
///
/// # Arguments
///
/// * `file_path` - The destination path, with a supported extension.
/// * `image` - The image containing the rgb8 pixel data.
pub fn write_image_any_rgb8(
    file_path: impl AsRef<Path>,
    image: &Image<u8, 3>,
) -> Result<(), IoError> {
    let file_path = file_path.as_ref();

    let ext = file_path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .ok_or_else(|| IoError::InvalidFileExtension(file_path.to_path_buf()))?;

    match ext.as_str() {
        "jpg" | "jpeg" => jpeg::write_image_jpeg_rgb8(file_path, image, 95),
        "png" => png::write_image_png_rgb8(file_path, image),
        _ => Err(IoError::InvalidFileExtension(file_path.to_path_buf())),
    }
}

#[cfg(test)]
mod tests {
    use crate::error::IoError;
    use tilt_image::{Image, ImageSize};

    #[test]
    fn read_any_from_png() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("flat.png");

        let size = ImageSize {
            width: 6,
            height: 3,
        };
        let image = Image::<u8, 3>::from_size_val(size, 128)?;
        crate::png::write_image_png_rgb8(&file_path, &image)?;

        let image_back = super::read_image_any_rgb8(&file_path)?;
        assert_eq!(image_back.size(), size);
        assert_eq!(image_back.as_slice(), image.as_slice());

        Ok(())
    }

    #[test]
    fn read_any_missing_file() {
        let res = super::read_image_any_rgb8("not_there.jpg");
        assert!(matches!(res, Err(IoError::FileDoesNotExist(_))));
    }

    #[test]
    fn write_any_unknown_extension() -> Result<(), IoError> {
        let image = Image::<u8, 3>::from_size_val(
            ImageSize {
                width: 2,
                height: 2,
            },
            0,
        )?;
        let res = super::write_image_any_rgb8("out.gif", &image);
        assert!(matches!(res, Err(IoError::InvalidFileExtension(_))));
        Ok(())
    }
}
