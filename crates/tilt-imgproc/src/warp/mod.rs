//! Geometric image transformations based on perspective warps.
//!
//! This module provides:
//!
//! - Perspective transformations (homographies) via [`warp_perspective`]
//! - Construction of the 3D rotation/projection matrix that simulates a
//!   perspective rotation of the image plane ([`get_projection_matrix3d`])
//! - 2D rotation matrix generation ([`get_rotation_matrix2d`])
//!
//! # Examples
//!
//! Building the transform for a 30 degree in-plane rotation:
//!
//! ```no_run
//! use tilt_image::ImageSize;
//! use tilt_imgproc::warp::get_projection_matrix3d;
//!
//! let size = ImageSize { width: 256, height: 256 };
//! let m = get_projection_matrix3d(size, 0.0, 0.0, 30.0, 0.0, 0.0);
//! // Use with warp_perspective to rotate the image
//! ```

mod perspective;
mod projection;

pub use perspective::warp_perspective;
pub use projection::{compute_focal, get_projection_matrix3d};

use std::f32::consts::PI;

/// Returns a 2x3 rotation matrix for a 2D rotation around a center point.
///
/// The rotation matrix is defined as:
///
/// | alpha  beta  tx |
/// | -beta  alpha ty |
///
/// where:
///
/// alpha = scale * cos(angle)
/// beta = scale * sin(angle)
/// tx = (1 - alpha) * center.x - beta * center.y
/// ty = beta * center.x + (1 - alpha) * center.y
///
/// # Arguments
///
/// * `center` - The center point of the rotation.
/// * `angle` - The angle of rotation in degrees.
/// * `scale` - The scale factor.
///
/// # Example
///
/// ```
/// use tilt_imgproc::warp::get_rotation_matrix2d;
///
/// let center = (0.0, 0.0);
/// let angle = 90.0;
/// let scale = 1.0;
/// let rotation_matrix = get_rotation_matrix2d(center, angle, scale);
/// ```
pub fn get_rotation_matrix2d(center: (f32, f32), angle: f32, scale: f32) -> [f32; 6] {
    let angle = angle * PI / 180.0f32;
    let alpha = scale * angle.cos();
    let beta = scale * angle.sin();

    let tx = (1.0 - alpha) * center.0 - beta * center.1;
    let ty = beta * center.0 + (1.0 - alpha) * center.1;

    [alpha, beta, tx, -beta, alpha, ty]
}
