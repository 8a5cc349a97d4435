use ndarray::Array2;
use rayon::prelude::*;

use tilt_image::Image;

/// Apply a function to each pixel for grid sampling in parallel.
///
/// The maps contain, for each destination pixel, the source coordinate it
/// samples from. Rows of the destination image are processed in parallel.
pub fn par_iter_rows_resample<T, const C: usize>(
    dst: &mut Image<T, C>,
    map_x: &Array2<f32>,
    map_y: &Array2<f32>,
    f: impl Fn(&f32, &f32, &mut [T]) + Send + Sync,
) where
    T: Send + Sync,
{
    let cols = dst.cols();
    let dst_slice = dst.as_slice_mut();
    let map_x_slice = map_x.as_slice().expect("map_x is contiguous");
    let map_y_slice = map_y.as_slice().expect("map_y is contiguous");

    dst_slice
        .par_chunks_exact_mut(C * cols)
        .zip(map_x_slice.par_chunks_exact(cols))
        .zip(map_y_slice.par_chunks_exact(cols))
        .for_each(|((dst_chunk, map_x_chunk), map_y_chunk)| {
            dst_chunk
                .chunks_exact_mut(C)
                .zip(map_x_chunk.iter().zip(map_y_chunk.iter()))
                .for_each(|(dst_pixel, (x, y))| {
                    f(x, y, dst_pixel);
                });
        });
}

#[cfg(test)]
mod tests {
    use tilt_image::{Image, ImageError, ImageSize};

    #[test]
    fn resample_identity() -> Result<(), ImageError> {
        let mut dst = Image::<f32, 1>::from_size_val(
            ImageSize {
                width: 2,
                height: 2,
            },
            0.0,
        )?;

        let (map_x, map_y) =
            crate::interpolation::grid::meshgrid_from_fn(2, 2, |x, y| Ok((x as f32, y as f32)))?;

        super::par_iter_rows_resample(&mut dst, &map_x, &map_y, |&x, &y, dst_pixel| {
            dst_pixel[0] = x + y;
        });

        assert_eq!(dst.as_slice(), &[0.0, 1.0, 1.0, 2.0]);

        Ok(())
    }
}
