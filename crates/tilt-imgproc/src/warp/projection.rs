use tilt_image::ImageSize;

/// Multiply an MxK matrix by a KxN matrix.
fn matmul<const M: usize, const K: usize, const N: usize>(
    a: &[[f32; K]; M],
    b: &[[f32; N]; K],
) -> [[f32; N]; M] {
    let mut out = [[0.0; N]; M];
    for i in 0..M {
        for j in 0..N {
            for k in 0..K {
                out[i][j] += a[i][k] * b[k][j];
            }
        }
    }
    out
}

/// Computes the focal length of the virtual camera for an image size and an
/// in-plane rotation angle.
///
/// The focal length is `d / (2 * sin(gamma))` with `d` the image diagonal,
/// so that a rotation by `gamma` keeps the rotated corners inside the view.
/// For `sin(gamma) == 0` it falls back to `d / 2`.
///
/// # Arguments
///
/// * `size` - The size of the image in pixels.
/// * `gamma` - The rotation around the z axis in degrees.
///
/// # Example
///
/// ```
/// use tilt_image::ImageSize;
/// use tilt_imgproc::warp::compute_focal;
///
/// let f = compute_focal(ImageSize { width: 100, height: 100 }, 30.0);
/// assert!((f - 141.42135).abs() < 1e-3);
/// ```
pub fn compute_focal(size: ImageSize, gamma: f32) -> f32 {
    let d = ((size.height * size.height + size.width * size.width) as f32).sqrt();

    let sin_gamma = gamma.to_radians().sin();
    if sin_gamma != 0.0 {
        d / (2.0 * sin_gamma)
    } else {
        d / 2.0
    }
}

/// Returns the 3x3 planar perspective transform that simulates a 3D rotation
/// of the image plane.
///
/// The transform is composed as `M = A2 * T * RX * RY * RZ * A1` where `A1`
/// lifts image coordinates into 3D space recentered at the image center,
/// `RX`, `RY`, `RZ` rotate around the x, y and z axes, `T` translates by
/// `(dx, dy, f)` and `A2` projects back to the image plane through a pinhole
/// camera with focal length `f` and principal point at the image center.
///
/// The z translation is always the focal length derived from `gamma` (see
/// [`compute_focal`]), which places the image plane at the distance where
/// the projection is close to an isometry for small angles.
///
/// # Arguments
///
/// * `size` - The size of the source image in pixels.
/// * `theta` - The rotation around the x axis in degrees.
/// * `phi` - The rotation around the y axis in degrees.
/// * `gamma` - The rotation around the z axis in degrees (an in-plane rotation).
/// * `dx` - The translation along the x axis in pixels.
/// * `dy` - The translation along the y axis in pixels.
///
/// # Returns
///
/// The 3x3 transformation matrix in row-major order, to be used with
/// [`warp_perspective`](crate::warp::warp_perspective).
pub fn get_projection_matrix3d(
    size: ImageSize,
    theta: f32,
    phi: f32,
    gamma: f32,
    dx: f32,
    dy: f32,
) -> [f32; 9] {
    let (rtheta, rphi, rgamma) = (theta.to_radians(), phi.to_radians(), gamma.to_radians());

    let w = size.width as f32;
    let h = size.height as f32;
    let f = compute_focal(size, gamma);

    // 2D -> 3D lift, recentering at the image center
    #[rustfmt::skip]
    let a1: [[f32; 3]; 4] = [
        [1.0, 0.0, -w / 2.0],
        [0.0, 1.0, -h / 2.0],
        [0.0, 0.0, 1.0],
        [0.0, 0.0, 1.0],
    ];

    let (sin_t, cos_t) = rtheta.sin_cos();
    let (sin_p, cos_p) = rphi.sin_cos();
    let (sin_g, cos_g) = rgamma.sin_cos();

    // rotation matrices around the x, y and z axes
    #[rustfmt::skip]
    let rx: [[f32; 4]; 4] = [
        [1.0, 0.0, 0.0, 0.0],
        [0.0, cos_t, -sin_t, 0.0],
        [0.0, sin_t, cos_t, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ];

    #[rustfmt::skip]
    let ry: [[f32; 4]; 4] = [
        [cos_p, 0.0, -sin_p, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [sin_p, 0.0, cos_p, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ];

    #[rustfmt::skip]
    let rz: [[f32; 4]; 4] = [
        [cos_g, -sin_g, 0.0, 0.0],
        [sin_g, cos_g, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ];

    // composed rotation, x then y then z
    let r = matmul(&matmul(&rx, &ry), &rz);

    // translation matrix with the derived focal length on the z axis
    #[rustfmt::skip]
    let t: [[f32; 4]; 4] = [
        [1.0, 0.0, 0.0, dx],
        [0.0, 1.0, 0.0, dy],
        [0.0, 0.0, 1.0, f],
        [0.0, 0.0, 0.0, 1.0],
    ];

    // 3D -> 2D pinhole projection
    #[rustfmt::skip]
    let a2: [[f32; 4]; 3] = [
        [f, 0.0, w / 2.0, 0.0],
        [0.0, f, h / 2.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
    ];

    let m = matmul(&a2, &matmul(&t, &matmul(&r, &a1)));

    [
        m[0][0], m[0][1], m[0][2], m[1][0], m[1][1], m[1][2], m[2][0], m[2][1], m[2][2],
    ]
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use tilt_image::ImageSize;

    use super::super::perspective::transform_point;
    use super::super::get_rotation_matrix2d;

    const SIZE: ImageSize = ImageSize {
        width: 100,
        height: 100,
    };

    #[test]
    fn focal_for_z_rotation() {
        // d / (2 * sin(30deg)) = d
        let f = super::compute_focal(SIZE, 30.0);
        assert_relative_eq!(f, 141.42135, epsilon = 1e-3);
    }

    #[test]
    fn focal_degenerate_angle() {
        // sin(0) == 0 falls back to d / 2, no division by zero
        let d = (20000.0f32).sqrt();
        let f = super::compute_focal(SIZE, 0.0);
        assert_eq!(f, d / 2.0);
    }

    #[test]
    fn zero_angles_map_near_identity() {
        let m = super::get_projection_matrix3d(SIZE, 0.0, 0.0, 0.0, 0.0, 0.0);

        // the image center is a fixed point
        let (cx, cy) = (50.0, 50.0);
        let (x, y) = transform_point(cx, cy, &m);
        assert_relative_eq!(x, cx, epsilon = 1e-3);
        assert_relative_eq!(y, cy, epsilon = 1e-3);

        // other points shrink towards the center by f / (1 + f)
        let f = super::compute_focal(SIZE, 0.0);
        let scale = f / (1.0 + f);
        let (x, y) = transform_point(cx + 10.0, cy, &m);
        assert_relative_eq!(x, cx + 10.0 * scale, epsilon = 1e-3);
        assert_relative_eq!(y, cy, epsilon = 1e-3);
    }

    #[test]
    fn translation_shifts_the_output() {
        let m = super::get_projection_matrix3d(SIZE, 0.0, 0.0, 0.0, 20.0, -10.0);

        let f = super::compute_focal(SIZE, 0.0);
        let scale = f / (1.0 + f);
        let (x, y) = transform_point(50.0, 50.0, &m);
        assert_relative_eq!(x, 50.0 + 20.0 * scale, epsilon = 1e-3);
        assert_relative_eq!(y, 50.0 - 10.0 * scale, epsilon = 1e-3);
    }

    #[test]
    fn pure_z_rotation_reduces_to_2d_rotation() {
        // with theta == phi == 0 the composed rotation is RZ alone, and the
        // projection must agree with the classic 2D rotation about the image
        // center, scaled by f / (1 + f). The angle is negated because the 2D
        // rotation matrix convention measures positive angles the other way
        // around the y-down image axes.
        let gamma = 90.0;
        let m = super::get_projection_matrix3d(SIZE, 0.0, 0.0, gamma, 0.0, 0.0);

        let f = super::compute_focal(SIZE, gamma);
        let scale = f / (1.0 + f);
        let r2d = get_rotation_matrix2d((50.0, 50.0), -gamma, scale);

        for &(x, y) in &[(50.0f32, 50.0f32), (60.0, 50.0), (50.0, 40.0), (0.0, 0.0)] {
            let (xp, yp) = transform_point(x, y, &m);
            let xe = r2d[0] * x + r2d[1] * y + r2d[2];
            let ye = r2d[3] * x + r2d[4] * y + r2d[5];
            assert_relative_eq!(xp, xe, epsilon = 1e-2);
            assert_relative_eq!(yp, ye, epsilon = 1e-2);
        }
    }
}
