//! Equirectangular panorama projections.
//!
//! An equirectangular panorama maps rows linearly to latitude in `[-π/2, π/2]`
//! (row 0 is latitude `-π/2`) and columns linearly to longitude in `[-π, π]`,
//! with the first and last column adjacent across the seam.
//!
//! [`eqr_to_rectilinear`] renders the perspective view a pinhole camera would see
//! when pointed along a [`ViewDirection`]; [`cube_faces`] renders the six faces of
//! a cube map.

use panocube_image::ImageError;
use panocube_tensor::TensorError;

mod cubemap;
mod rectilinear;

pub use cubemap::{cube_faces, default_face_size, CubeFace, ParseCubeFaceError};
pub use rectilinear::{
    eqr_to_rectilinear, plane_to_sphere, rectilinear_from_equirect, rectilinear_maps,
    rectilinear_size, sphere_to_pixel, RectilinearParams, ViewDirection,
};

/// An error type for the panorama projections.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ProjectionError {
    /// The projection parameters or the source image are not usable.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Error from the image containers.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// Error while building the sampling maps.
    #[error(transparent)]
    Tensor(#[from] TensorError),
}
