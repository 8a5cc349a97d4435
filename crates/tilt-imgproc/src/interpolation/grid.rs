use ndarray::Array2;
use tilt_image::ImageError;

/// Create a meshgrid of x and y coordinates from a coordinate mapping function.
///
/// # Arguments
///
/// * `cols` - The number of columns indicating the width of the grid
/// * `rows` - The number of rows indicating the height of the grid
/// * `f` - Maps a destination pixel coordinate (x, y) to a source coordinate
///
/// # Returns
///
/// A tuple of 2D arrays of shape (rows, cols) containing the x and y source coordinates
pub fn meshgrid_from_fn(
    cols: usize,
    rows: usize,
    f: impl Fn(usize, usize) -> Result<(f32, f32), ImageError>,
) -> Result<(Array2<f32>, Array2<f32>), ImageError> {
    let mut map_x = Vec::with_capacity(rows * cols);
    let mut map_y = Vec::with_capacity(rows * cols);

    for r in 0..rows {
        for c in 0..cols {
            let (x, y) = f(c, r)?;
            map_x.push(x);
            map_y.push(y);
        }
    }

    let map_x = Array2::from_shape_vec((rows, cols), map_x)?;
    let map_y = Array2::from_shape_vec((rows, cols), map_y)?;

    Ok((map_x, map_y))
}

#[cfg(test)]
mod tests {
    use tilt_image::ImageError;

    #[test]
    fn meshgrid_from_fn_identity() -> Result<(), ImageError> {
        let (map_x, map_y) = super::meshgrid_from_fn(3, 2, |x, y| Ok((x as f32, y as f32)))?;

        assert_eq!(map_x.shape(), &[2, 3]);
        assert_eq!(map_y.shape(), &[2, 3]);
        assert_eq!(map_x[[0, 2]], 2.0);
        assert_eq!(map_y[[1, 0]], 1.0);

        Ok(())
    }
}
