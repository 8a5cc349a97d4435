#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// image container types.
pub mod image {
    pub use tilt_image::*;
}

/// image processing operations.
pub mod imgproc {
    pub use tilt_imgproc::*;
}

/// image file reading and writing.
pub mod io {
    pub use tilt_io::*;
}

/// high-level perspective rotation of a loaded image.
pub mod rotator;

pub use rotator::{PerspectiveRotator, RotationArgs, RotatorError};
