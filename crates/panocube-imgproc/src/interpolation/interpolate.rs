use std::str::FromStr;

use super::bicubic::bicubic_interpolation;
use super::bilinear::bilinear_interpolation;
use super::border::BorderPolicy;
use super::nearest::nearest_neighbor_interpolation;
use panocube_image::{Image, ImageDtype};

/// Interpolation mode used to resample an image at fractional coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpolationMode {
    /// Nearest neighbor interpolation
    Nearest,
    /// Bilinear interpolation
    Bilinear,
    /// Bicubic interpolation
    Bicubic,
}

impl InterpolationMode {
    /// Default mode for an image with `channels` channels.
    ///
    /// Single channel images are sampled with [`InterpolationMode::Nearest`], colour
    /// images with [`InterpolationMode::Bicubic`].
    ///
    /// ```
    /// use panocube_imgproc::interpolation::InterpolationMode;
    ///
    /// assert_eq!(InterpolationMode::for_channels(1), InterpolationMode::Nearest);
    /// assert_eq!(InterpolationMode::for_channels(3), InterpolationMode::Bicubic);
    /// ```
    pub fn for_channels(channels: usize) -> Self {
        if channels == 1 {
            InterpolationMode::Nearest
        } else {
            InterpolationMode::Bicubic
        }
    }
}

impl std::fmt::Display for InterpolationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            InterpolationMode::Nearest => "nearest",
            InterpolationMode::Bilinear => "bilinear",
            InterpolationMode::Bicubic => "bicubic",
        };
        f.write_str(name)
    }
}

/// Error returned when parsing an unknown interpolation mode name.
#[derive(thiserror::Error, Debug, PartialEq)]
#[error("Unknown interpolation mode: {0}. Expected nearest, bilinear or bicubic")]
pub struct ParseInterpolationModeError(pub String);

impl FromStr for InterpolationMode {
    type Err = ParseInterpolationModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nearest" => Ok(InterpolationMode::Nearest),
            "bilinear" | "linear" => Ok(InterpolationMode::Bilinear),
            "bicubic" | "cubic" => Ok(InterpolationMode::Bicubic),
            _ => Err(ParseInterpolationModeError(s.to_string())),
        }
    }
}

/// Kernel for interpolating a pixel value
///
/// # Arguments
///
/// * `image` - The input image container with shape (height, width, C).
/// * `u` - The x coordinate of the pixel to interpolate.
/// * `v` - The y coordinate of the pixel to interpolate.
/// * `interpolation` - The interpolation mode to use.
/// * `border` - How samples outside the image are resolved.
///
/// # Returns
///
/// The interpolated channels. Non-finite coordinates yield zeros.
pub fn interpolate_pixel<T: ImageDtype, const C: usize>(
    image: &Image<T, C>,
    u: f32,
    v: f32,
    interpolation: InterpolationMode,
    border: BorderPolicy,
) -> [f32; C] {
    if !u.is_finite() || !v.is_finite() {
        return [0.0; C];
    }

    match interpolation {
        InterpolationMode::Nearest => nearest_neighbor_interpolation(image, u, v, border),
        InterpolationMode::Bilinear => bilinear_interpolation(image, u, v, border),
        InterpolationMode::Bicubic => bicubic_interpolation(image, u, v, border),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpolation::BorderMode;
    use approx::assert_relative_eq;
    use panocube_image::ImageError;

    fn ramp() -> Result<Image<f32, 1>, ImageError> {
        Image::from_size_fn([4, 3].into(), |x, y| [(y * 4 + x) as f32])
    }

    #[test]
    fn parse_modes() {
        assert_eq!("nearest".parse(), Ok(InterpolationMode::Nearest));
        assert_eq!("Bilinear".parse(), Ok(InterpolationMode::Bilinear));
        assert_eq!("cubic".parse(), Ok(InterpolationMode::Bicubic));
        assert_eq!(
            "lanczos".parse::<InterpolationMode>(),
            Err(ParseInterpolationModeError("lanczos".to_string()))
        );
        assert_eq!(InterpolationMode::Bicubic.to_string(), "bicubic");
    }

    #[test]
    fn nearest_rounds_and_wraps() -> Result<(), ImageError> {
        let image = ramp()?;
        let border = BorderPolicy::EQUIRECTANGULAR;

        let [val] = interpolate_pixel(&image, 1.4, 1.6, InterpolationMode::Nearest, border);
        assert_eq!(val, 9.0);

        // column 3.6 rounds to 4, which wraps to column 0
        let [val] = interpolate_pixel(&image, 3.6, 0.0, InterpolationMode::Nearest, border);
        assert_eq!(val, 0.0);

        // rows clamp
        let [val] = interpolate_pixel(&image, 2.0, 7.0, InterpolationMode::Nearest, border);
        assert_eq!(val, 10.0);
        Ok(())
    }

    #[test]
    fn bilinear_blends() -> Result<(), ImageError> {
        let image = ramp()?;
        let border = BorderPolicy::uniform(BorderMode::Replicate);

        let [val] = interpolate_pixel(&image, 0.5, 0.5, InterpolationMode::Bilinear, border);
        assert_relative_eq!(val, 2.5);
        Ok(())
    }

    #[test]
    fn constant_border_and_non_finite_are_zero() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::from_size_val([2, 2].into(), 9)?;
        let border = BorderPolicy::default();

        for mode in [
            InterpolationMode::Nearest,
            InterpolationMode::Bilinear,
            InterpolationMode::Bicubic,
        ] {
            assert_eq!(interpolate_pixel(&image, 10.0, 0.0, mode, border), [0.0; 3]);
            assert_eq!(interpolate_pixel(&image, f32::NAN, 0.0, mode, border), [0.0; 3]);
            assert_eq!(
                interpolate_pixel(&image, 0.0, f32::INFINITY, mode, BorderPolicy::EQUIRECTANGULAR),
                [0.0; 3]
            );
        }
        Ok(())
    }
}
