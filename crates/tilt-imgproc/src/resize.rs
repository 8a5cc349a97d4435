use crate::interpolation::{grid::meshgrid_from_fn, interpolate_pixel, InterpolationMode};
use crate::parallel;
use fast_image_resize as fr;
use std::num::NonZeroU32;
use tilt_image::{Image, ImageDtype, ImageError};

/// Resize an image to a new size.
///
/// The function resizes an image to a new size using the specified interpolation mode.
/// It supports any number of channels and data types.
///
/// # Arguments
///
/// * `src` - The input image container.
/// * `dst` - The output image container, allocated with the target size.
/// * `interpolation` - The interpolation mode to use.
///
/// # Example
///
/// ```
/// use tilt_image::{Image, ImageSize};
/// use tilt_imgproc::interpolation::InterpolationMode;
/// use tilt_imgproc::resize::resize_native;
///
/// let image = Image::<_, 3>::new(
///     ImageSize {
///         width: 4,
///         height: 5,
///     },
///     vec![0f32; 4 * 5 * 3],
/// )
/// .unwrap();
///
/// let new_size = ImageSize {
///     width: 2,
///     height: 3,
/// };
///
/// let mut image_resized = Image::<_, 3>::from_size_val(new_size, 0.0).unwrap();
///
/// resize_native(&image, &mut image_resized, InterpolationMode::Nearest).unwrap();
///
/// assert_eq!(image_resized.num_channels(), 3);
/// assert_eq!(image_resized.size().width, 2);
/// assert_eq!(image_resized.size().height, 3);
/// ```
pub fn resize_native<T, const CHANNELS: usize>(
    src: &Image<T, CHANNELS>,
    dst: &mut Image<T, CHANNELS>,
    interpolation: InterpolationMode,
) -> Result<(), ImageError>
where
    T: ImageDtype,
{
    if src.width() == 0 || src.height() == 0 || dst.width() == 0 || dst.height() == 0 {
        return Err(ImageError::InvalidImageSize(
            src.width(),
            src.height(),
            dst.width(),
            dst.height(),
        ));
    }

    // map each destination pixel to its sampling position in the source image
    let step_x = if dst.width() > 1 {
        (src.width() - 1) as f32 / (dst.width() - 1) as f32
    } else {
        0.0
    };
    let step_y = if dst.height() > 1 {
        (src.height() - 1) as f32 / (dst.height() - 1) as f32
    } else {
        0.0
    };

    let (map_x, map_y) = meshgrid_from_fn(dst.cols(), dst.rows(), |x, y| {
        Ok((x as f32 * step_x, y as f32 * step_y))
    })?;

    parallel::par_iter_rows_resample(dst, &map_x, &map_y, |&x, &y, dst_pixel| {
        dst_pixel.iter_mut().enumerate().for_each(|(k, pixel)| {
            *pixel = T::from_f32(interpolate_pixel(src, x, y, k, interpolation));
        });
    });

    Ok(())
}

/// Resize an rgb8 image using the [fast_image_resize](https://crates.io/crates/fast_image_resize) crate.
///
/// The function resizes an image to a new size using the specified interpolation mode.
/// It supports only 3-channel images with u8 data type.
///
/// # Arguments
///
/// * `src` - The input image container with 3 channels.
/// * `dst` - The output image container, allocated with the target size.
/// * `interpolation` - The interpolation mode to use.
///
/// # Errors
///
/// The function returns an error if the image cannot be resized.
pub fn resize_fast(
    src: &Image<u8, 3>,
    dst: &mut Image<u8, 3>,
    interpolation: InterpolationMode,
) -> Result<(), ImageError> {
    let src_width = NonZeroU32::new(src.width() as u32).ok_or(ImageError::CastError)?;
    let src_height = NonZeroU32::new(src.height() as u32).ok_or(ImageError::CastError)?;

    let src_data_len = src.width() * src.height() * 3;

    let src_image = fr::ImageView::<fr::pixels::U8x3>::from_buffer(
        src_width,
        src_height,
        src.as_slice(),
    )
    .map_err(|_| ImageError::InvalidChannelShape(src_data_len, src_data_len))?;

    let dst_width = NonZeroU32::new(dst.width() as u32).ok_or(ImageError::CastError)?;
    let dst_height = NonZeroU32::new(dst.height() as u32).ok_or(ImageError::CastError)?;

    let dst_data_len = dst.width() * dst.height() * 3;

    let mut dst_image = fr::Image::from_slice_u8(
        dst_width,
        dst_height,
        dst.as_slice_mut(),
        fr::PixelType::U8x3,
    )
    .map_err(|_| ImageError::InvalidChannelShape(dst_data_len, dst_data_len))?;

    let mut resizer = match interpolation {
        InterpolationMode::Bilinear => {
            fr::Resizer::new(fr::ResizeAlg::Convolution(fr::FilterType::Bilinear))
        }
        InterpolationMode::Nearest => fr::Resizer::new(fr::ResizeAlg::Nearest),
    };

    resizer
        .resize(&src_image.into(), &mut dst_image.view_mut())
        .map_err(|_| ImageError::CastError)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use tilt_image::{Image, ImageError, ImageSize};

    #[test]
    fn resize_smoke_ch3() -> Result<(), ImageError> {
        let image = Image::<_, 3>::new(
            ImageSize {
                width: 4,
                height: 5,
            },
            vec![0f32; 4 * 5 * 3],
        )?;

        let new_size = ImageSize {
            width: 2,
            height: 3,
        };

        let mut image_resized = Image::<_, 3>::from_size_val(new_size, 0.0)?;

        super::resize_native(
            &image,
            &mut image_resized,
            super::InterpolationMode::Bilinear,
        )?;

        assert_eq!(image_resized.num_channels(), 3);
        assert_eq!(image_resized.size().width, 2);
        assert_eq!(image_resized.size().height, 3);
        Ok(())
    }

    #[test]
    fn resize_native_corners() -> Result<(), ImageError> {
        let image = Image::<_, 1>::new(
            ImageSize {
                width: 4,
                height: 4,
            },
            (0..16).map(|x| x as f32).collect(),
        )?;

        let new_size = ImageSize {
            width: 2,
            height: 2,
        };

        let mut image_resized = Image::<_, 1>::from_size_val(new_size, 0.0)?;

        super::resize_native(
            &image,
            &mut image_resized,
            super::InterpolationMode::Bilinear,
        )?;

        // the four corners of the source survive a corner-aligned downscale
        assert_eq!(image_resized.as_slice(), &[0.0, 3.0, 12.0, 15.0]);
        Ok(())
    }

    #[test]
    fn resize_fast_smoke() -> Result<(), ImageError> {
        let image = Image::<_, 3>::new(
            ImageSize {
                width: 4,
                height: 5,
            },
            vec![0u8; 4 * 5 * 3],
        )?;

        let new_size = ImageSize {
            width: 2,
            height: 3,
        };

        let mut image_resized = Image::<_, 3>::from_size_val(new_size, 0)?;

        super::resize_fast(
            &image,
            &mut image_resized,
            super::InterpolationMode::Nearest,
        )?;

        assert_eq!(image_resized.num_channels(), 3);
        assert_eq!(image_resized.size().width, 2);
        assert_eq!(image_resized.size().height, 3);
        Ok(())
    }
}
