//! Pixel interpolation methods for image transformations.
//!
//! This module provides the interpolation algorithms used when resampling
//! images during geometric transformations such as the panorama projections.
//!
//! # Interpolation Modes
//!
//! - **Nearest**: Fastest, uses nearest pixel value (no interpolation)
//! - **Bilinear**: Smooth linear interpolation between adjacent pixels
//! - **Bicubic**: Cubic convolution over a 4x4 neighbourhood
//!
//! Samples that fall outside the source are resolved per axis by a
//! [`BorderPolicy`]: zero, clamped to the edge, or wrapped around.

mod bicubic;
mod bilinear;
mod border;

/// Grid generation and coordinate mapping utilities.
///
/// Functions for generating coordinate meshgrids used in image warping
/// and transformation operations.
pub mod grid;

pub(crate) mod interpolate;
mod nearest;
mod remap;

pub use border::{BorderMode, BorderPolicy};
pub use interpolate::{interpolate_pixel, InterpolationMode, ParseInterpolationModeError};
pub use remap::remap;
