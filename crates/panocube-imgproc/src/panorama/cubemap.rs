use std::f64::consts::{FRAC_PI_2, PI};
use std::str::FromStr;

use rayon::prelude::*;

use panocube_image::{Image, ImageDtype, ImageSize};

use super::rectilinear::{eqr_to_rectilinear, RectilinearParams, ViewDirection};
use super::ProjectionError;
use crate::interpolation::InterpolationMode;

/// A face of a cube map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CubeFace {
    /// Looking at the top pole.
    Up,
    /// Looking at the bottom pole.
    Down,
    /// Looking at the middle of the panorama.
    Front,
    /// Looking across the seam.
    Back,
    /// Quarter turn towards the first column.
    Left,
    /// Quarter turn towards the last column.
    Right,
}

impl CubeFace {
    /// All faces, in the order they are rendered.
    pub const ALL: [CubeFace; 6] = [
        CubeFace::Up,
        CubeFace::Down,
        CubeFace::Front,
        CubeFace::Back,
        CubeFace::Left,
        CubeFace::Right,
    ];

    /// Lowercase name of the face.
    pub fn name(self) -> &'static str {
        match self {
            CubeFace::Up => "up",
            CubeFace::Down => "down",
            CubeFace::Front => "front",
            CubeFace::Back => "back",
            CubeFace::Left => "left",
            CubeFace::Right => "right",
        }
    }

    /// Direction the face camera looks at.
    pub fn direction(self) -> ViewDirection {
        match self {
            CubeFace::Up => ViewDirection::new(-FRAC_PI_2, 0.0),
            CubeFace::Down => ViewDirection::new(FRAC_PI_2, 0.0),
            CubeFace::Front => ViewDirection::new(0.0, 0.0),
            CubeFace::Back => ViewDirection::new(0.0, PI),
            CubeFace::Left => ViewDirection::new(0.0, -FRAC_PI_2),
            CubeFace::Right => ViewDirection::new(0.0, FRAC_PI_2),
        }
    }

    /// File name of the face, `<prefix>-<name>.png`.
    ///
    /// ```
    /// use panocube_imgproc::panorama::CubeFace;
    ///
    /// assert_eq!(CubeFace::Left.file_name("cube"), "cube-left.png");
    /// ```
    pub fn file_name(self, prefix: &str) -> String {
        format!("{prefix}-{}.png", self.name())
    }
}

impl std::fmt::Display for CubeFace {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown face name.
#[derive(thiserror::Error, Debug, PartialEq)]
#[error("Unknown cube face: {0}. Expected up, down, front, back, left or right")]
pub struct ParseCubeFaceError(pub String);

impl FromStr for CubeFace {
    type Err = ParseCubeFaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        CubeFace::ALL
            .into_iter()
            .find(|face| face.name() == lower)
            .ok_or_else(|| ParseCubeFaceError(s.to_string()))
    }
}

/// Face size used when none is given: a quarter of the panorama width.
pub fn default_face_size(src_size: ImageSize) -> usize {
    src_size.width / 4
}

/// Render the six faces of a cube map from an equirectangular panorama.
///
/// The faces are rendered in parallel and returned in [`CubeFace::ALL`] order.
///
/// # Arguments
///
/// * `src` - The equirectangular panorama with shape (H, W, C).
/// * `face_size` - Side of each square face, [`default_face_size`] when `None`.
/// * `interpolation` - Resampling mode, [`InterpolationMode::for_channels`] when `None`.
///
/// # Errors
///
/// The first error of any face, see [`eqr_to_rectilinear`].
pub fn cube_faces<T: ImageDtype, const C: usize>(
    src: &Image<T, C>,
    face_size: Option<usize>,
    interpolation: Option<InterpolationMode>,
) -> Result<Vec<(CubeFace, Image<T, C>)>, ProjectionError> {
    let params = RectilinearParams {
        aspect_ratio: 1.0,
        output_height: face_size,
        interpolation,
    };

    CubeFace::ALL
        .par_iter()
        .map(|&face| -> Result<_, ProjectionError> {
            log::debug!("rendering cube face {face}");
            let image = eqr_to_rectilinear(src, face.direction(), &params)?;
            Ok((face, image))
        })
        .collect()
}
