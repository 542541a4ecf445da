use std::f64::consts::{FRAC_PI_2, PI};

use panocube_image::{Image, ImageDtype, ImageError, ImageSize};
use panocube_tensor::Tensor2;

use super::ProjectionError;
use crate::interpolation::{
    grid::{linspace, meshgrid_from_fn},
    remap, BorderPolicy, InterpolationMode,
};

/// Direction a virtual camera points at, in the panorama's spherical frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewDirection {
    /// Latitude in radians, `-π/2` is the top row of the panorama.
    pub latitude: f64,
    /// Longitude in radians, `0` is the middle column of the panorama.
    pub longitude: f64,
}

impl ViewDirection {
    /// Create a new direction from latitude and longitude in radians.
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Parameters of a rectilinear view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectilinearParams {
    /// Width over height of the view. The camera plane spans `[-aspect_ratio, aspect_ratio]`
    /// horizontally and `[-1, 1]` vertically.
    pub aspect_ratio: f64,
    /// Height of the view in pixels, a quarter of the panorama width when `None`.
    pub output_height: Option<usize>,
    /// Resampling mode, chosen from the channel count when `None`.
    pub interpolation: Option<InterpolationMode>,
}

impl Default for RectilinearParams {
    fn default() -> Self {
        Self {
            aspect_ratio: 1.0,
            output_height: None,
            interpolation: None,
        }
    }
}

/// Compute the size of the rectilinear view of a panorama.
///
/// The height is `params.output_height` (or `src_size.width / 4`) and the width is
/// `round(height * aspect_ratio)`.
///
/// # Errors
///
/// [`ProjectionError::InvalidArgument`] if the source is empty, the aspect ratio is not a
/// positive number, either output dimension ends up zero, or the pixel count overflows.
///
/// # Example
///
/// ```
/// use panocube_image::ImageSize;
/// use panocube_imgproc::panorama::{rectilinear_size, RectilinearParams};
///
/// let params = RectilinearParams {
///     aspect_ratio: 1.5,
///     ..Default::default()
/// };
/// let size = rectilinear_size([400, 200].into(), &params).unwrap();
///
/// assert_eq!(size, ImageSize { width: 150, height: 100 });
/// ```
pub fn rectilinear_size(
    src_size: ImageSize,
    params: &RectilinearParams,
) -> Result<ImageSize, ProjectionError> {
    if src_size.is_empty() {
        return Err(ProjectionError::InvalidArgument(format!(
            "source image is empty ({src_size})"
        )));
    }

    let aspect_ratio = params.aspect_ratio;
    if !aspect_ratio.is_finite() || aspect_ratio <= 0.0 {
        return Err(ProjectionError::InvalidArgument(format!(
            "aspect ratio must be positive, got {aspect_ratio}"
        )));
    }

    let height = params.output_height.unwrap_or(src_size.width / 4);
    if height == 0 {
        return Err(ProjectionError::InvalidArgument(
            "output height must be positive".to_string(),
        ));
    }

    let width = (height as f64 * aspect_ratio).round();
    if width < 1.0 {
        return Err(ProjectionError::InvalidArgument(format!(
            "output width rounds to zero for height {height} and aspect ratio {aspect_ratio}"
        )));
    }

    // usize::MAX as f64 rounds up to 2^64, so this also rejects widths the cast would clamp
    if width >= usize::MAX as f64 {
        return Err(ProjectionError::InvalidArgument(format!(
            "output width overflows for height {height} and aspect ratio {aspect_ratio}"
        )));
    }

    let size = ImageSize {
        width: width as usize,
        height,
    };
    if size.num_samples(1).is_err() {
        return Err(ProjectionError::InvalidArgument(format!(
            "output size {size} overflows"
        )));
    }

    Ok(size)
}

/// Inverse gnomonic projection of a camera plane point.
///
/// # Arguments
///
/// * `x` - Horizontal plane coordinate, one unit is a 45 degree half angle.
/// * `y` - Vertical plane coordinate, positive downwards.
/// * `direction` - Direction of the optical axis.
///
/// # Returns
///
/// The `(latitude, longitude)` seen through the plane point, in radians. The plane
/// centre returns `direction` itself. Longitude is not wrapped.
///
/// # Example
///
/// ```
/// use panocube_imgproc::panorama::{plane_to_sphere, ViewDirection};
///
/// let dir = ViewDirection::new(0.3, -1.2);
/// assert_eq!(plane_to_sphere(0.0, 0.0, dir), (0.3, -1.2));
/// ```
pub fn plane_to_sphere(x: f64, y: f64, direction: ViewDirection) -> (f64, f64) {
    let (lat1, long1) = (direction.latitude, direction.longitude);

    let rho = (x * x + y * y).sqrt();
    if rho == 0.0 {
        // limit of the expressions below, which divide by rho
        return (lat1, long1);
    }

    let (sin_c, cos_c) = rho.atan().sin_cos();
    let (sin_lat1, cos_lat1) = lat1.sin_cos();

    let lat = (cos_c * sin_lat1 + y * sin_c * cos_lat1 / rho)
        .clamp(-1.0, 1.0)
        .asin();
    let long = long1 + (x * sin_c).atan2(rho * cos_lat1 * cos_c - y * sin_lat1 * sin_c);

    (lat, long)
}

/// Map a spherical direction to continuous pixel coordinates of a panorama.
///
/// # Returns
///
/// The `(col, row)` position. Columns are not wrapped, so longitudes past `±π` land
/// outside `[0, width)`.
pub fn sphere_to_pixel(lat: f64, long: f64, src_size: ImageSize) -> (f64, f64) {
    let col = (long / PI + 1.0) * src_size.width as f64 / 2.0;
    let row = (lat / FRAC_PI_2 + 1.0) * src_size.height as f64 / 2.0;
    (col, row)
}

/// Build the sampling maps of a rectilinear view.
///
/// # Arguments
///
/// * `src_size` - Size of the equirectangular panorama.
/// * `dst_size` - Size of the rectilinear view.
/// * `direction` - Direction of the optical axis.
/// * `aspect_ratio` - Horizontal extent of the camera plane.
///
/// # Returns
///
/// The source column (`map_x`) and row (`map_y`) of every view pixel, both of shape
/// `(dst_size.height, dst_size.width)`.
pub fn rectilinear_maps(
    src_size: ImageSize,
    dst_size: ImageSize,
    direction: ViewDirection,
    aspect_ratio: f64,
) -> Result<(Tensor2<f32>, Tensor2<f32>), ProjectionError> {
    let xs = linspace(-aspect_ratio, aspect_ratio, dst_size.width);
    let ys = linspace(-1.0, 1.0, dst_size.height);

    let (map_x, map_y) = meshgrid_from_fn(dst_size.width, dst_size.height, |c, r| {
        let (lat, long) = plane_to_sphere(xs[c], ys[r], direction);
        let (col, row) = sphere_to_pixel(lat, long, src_size);
        (col as f32, row as f32)
    })?;

    Ok((map_x, map_y))
}

/// Render a rectilinear view of a panorama into an existing image.
///
/// Reusing `dst` avoids one allocation per view when several views of the same size
/// are rendered, as for the faces of a cube map.
///
/// # Arguments
///
/// * `src` - The equirectangular panorama with shape (H, W, C).
/// * `dst` - The view, its height sets the resolution and its width must be
///   `round(height * aspect_ratio)`.
/// * `direction` - Direction of the optical axis.
/// * `aspect_ratio` - Width over height of the view.
/// * `interpolation` - The interpolation mode to use.
///
/// # Errors
///
/// [`ProjectionError::InvalidArgument`] for an empty source or view or a non positive
/// aspect ratio, [`ProjectionError::Image`] if `dst` does not have the expected width.
pub fn rectilinear_from_equirect<T: ImageDtype, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    direction: ViewDirection,
    aspect_ratio: f64,
    interpolation: InterpolationMode,
) -> Result<(), ProjectionError> {
    let params = RectilinearParams {
        aspect_ratio,
        output_height: Some(dst.height()),
        interpolation: Some(interpolation),
    };
    let expected = rectilinear_size(src.size(), &params)?;
    if expected != dst.size() {
        return Err(ImageError::InvalidImageSize(
            expected.width,
            expected.height,
            dst.width(),
            dst.height(),
        )
        .into());
    }

    log::debug!(
        "rectilinear view lat={:.4} long={:.4} {} -> {} ({})",
        direction.latitude,
        direction.longitude,
        src.size(),
        dst.size(),
        interpolation
    );

    let (map_x, map_y) = rectilinear_maps(src.size(), dst.size(), direction, aspect_ratio)?;

    remap(
        src,
        dst,
        &map_x,
        &map_y,
        interpolation,
        BorderPolicy::EQUIRECTANGULAR,
    )?;

    Ok(())
}

/// Render a rectilinear view of an equirectangular panorama.
///
/// # Arguments
///
/// * `src` - The equirectangular panorama with shape (H, W, C).
/// * `direction` - Direction of the optical axis.
/// * `params` - Aspect ratio, output height and interpolation of the view.
///
/// # Returns
///
/// A new image of height `params.output_height` (default `W / 4`) and width
/// `round(height * aspect_ratio)`, with the sample type and channels of `src`.
///
/// # Example
///
/// ```
/// use panocube_image::Image;
/// use panocube_imgproc::panorama::{eqr_to_rectilinear, RectilinearParams, ViewDirection};
///
/// let pano = Image::<u8, 3>::from_size_val([64, 32].into(), 128).unwrap();
/// let view = eqr_to_rectilinear(
///     &pano,
///     ViewDirection::new(0.0, 0.0),
///     &RectilinearParams::default(),
/// )
/// .unwrap();
///
/// assert_eq!(view.cols(), 16);
/// assert_eq!(view.rows(), 16);
/// assert_eq!(view.pixel(8, 8), &[128, 128, 128]);
/// ```
pub fn eqr_to_rectilinear<T: ImageDtype, const C: usize>(
    src: &Image<T, C>,
    direction: ViewDirection,
    params: &RectilinearParams,
) -> Result<Image<T, C>, ProjectionError> {
    let size = rectilinear_size(src.size(), params)?;
    let interpolation = params
        .interpolation
        .unwrap_or_else(|| InterpolationMode::for_channels(C));

    let mut dst = Image::from_size_val(size, T::default())?;
    rectilinear_from_equirect(src, &mut dst, direction, params.aspect_ratio, interpolation)?;

    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const DIRECTIONS: [ViewDirection; 6] = [
        ViewDirection::new(-FRAC_PI_2, 0.0),
        ViewDirection::new(FRAC_PI_2, 0.0),
        ViewDirection::new(0.0, 0.0),
        ViewDirection::new(0.0, PI),
        ViewDirection::new(0.0, -FRAC_PI_2),
        ViewDirection::new(0.0, FRAC_PI_2),
    ];

    #[test]
    fn size_defaults_to_quarter_width() -> Result<(), ProjectionError> {
        let size = rectilinear_size([401, 200].into(), &RectilinearParams::default())?;
        assert_eq!(size, ImageSize::from([100, 100]));
        Ok(())
    }

    #[test]
    fn size_rounds_width() -> Result<(), ProjectionError> {
        for (height, aspect_ratio, width) in [(3, 1.5, 5), (10, 0.33, 3), (7, 1.0, 7), (1, 0.5, 1)] {
            let params = RectilinearParams {
                aspect_ratio,
                output_height: Some(height),
                ..Default::default()
            };
            let size = rectilinear_size([8, 4].into(), &params)?;
            assert_eq!(size, ImageSize { width, height });
        }
        Ok(())
    }

    #[test]
    fn size_rejects_invalid_arguments() {
        let src = ImageSize::from([8, 4]);
        let invalid = [
            (src, Some(0), 1.0),
            (src, Some(4), 0.0),
            (src, Some(4), -1.0),
            (src, Some(4), f64::NAN),
            (src, Some(4), 0.1),
            (ImageSize::from([0, 4]), Some(4), 1.0),
            (ImageSize::from([8, 0]), Some(4), 1.0),
            // a width below 4 defaults to a zero height
            (ImageSize::from([3, 2]), None, 1.0),
        ];
        for (src_size, output_height, aspect_ratio) in invalid {
            let params = RectilinearParams {
                aspect_ratio,
                output_height,
                interpolation: None,
            };
            let res = rectilinear_size(src_size, &params);
            assert!(
                matches!(res, Err(ProjectionError::InvalidArgument(_))),
                "{src_size:?} {output_height:?} {aspect_ratio}: {res:?}"
            );
        }
    }

    #[test]
    fn size_rejects_huge_widths() -> Result<(), ProjectionError> {
        let src = Image::<u8, 3>::from_size_val([400, 200].into(), 1)?;

        for (output_height, aspect_ratio) in [
            (Some(100), 1e20),
            (Some(100), f64::MAX),
            (Some(usize::MAX), 1.0),
            (Some(1 << 40), 1e4),
        ] {
            let params = RectilinearParams {
                aspect_ratio,
                output_height,
                interpolation: None,
            };
            let res = rectilinear_size(src.size(), &params);
            assert!(
                matches!(res, Err(ProjectionError::InvalidArgument(_))),
                "{output_height:?} {aspect_ratio}: {res:?}"
            );
        }

        let params = RectilinearParams {
            aspect_ratio: 1e20,
            output_height: Some(100),
            interpolation: None,
        };
        let res = eqr_to_rectilinear(&src, DIRECTIONS[2], &params);
        assert!(matches!(res, Err(ProjectionError::InvalidArgument(_))));

        Ok(())
    }

    #[test]
    fn plane_center_is_the_view_direction() {
        for dir in DIRECTIONS {
            let (lat, long) = plane_to_sphere(0.0, 0.0, dir);
            assert_eq!((lat, long), (dir.latitude, dir.longitude));
        }
    }

    #[test]
    fn plane_edges_front() {
        let front = ViewDirection::new(0.0, 0.0);

        // one plane unit is 45 degrees
        let (lat, long) = plane_to_sphere(1.0, 0.0, front);
        assert_relative_eq!(lat, 0.0, epsilon = 1e-12);
        assert_relative_eq!(long, PI / 4.0, epsilon = 1e-12);

        let (lat, long) = plane_to_sphere(0.0, -1.0, front);
        assert_relative_eq!(lat, -PI / 4.0, epsilon = 1e-12);
        assert_relative_eq!(long, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn sphere_to_pixel_corners() {
        let size = ImageSize::from([400, 200]);
        assert_eq!(sphere_to_pixel(0.0, 0.0, size), (200.0, 100.0));
        assert_eq!(sphere_to_pixel(-FRAC_PI_2, -PI, size), (0.0, 0.0));
        assert_eq!(sphere_to_pixel(FRAC_PI_2, PI, size), (400.0, 200.0));
    }

    #[test]
    fn front_center_maps_to_image_center() -> Result<(), ProjectionError> {
        let src = ImageSize::from([400, 200]);
        let dst = ImageSize::from([5, 5]);
        let (map_x, map_y) = rectilinear_maps(src, dst, DIRECTIONS[2], 1.0)?;

        assert_eq!(map_x.get([2, 2]), Some(&200.0));
        assert_eq!(map_y.get([2, 2]), Some(&100.0));

        // even sizes have no exact centre, the four middle pixels surround it
        let dst = ImageSize::from([4, 4]);
        let (map_x, map_y) = rectilinear_maps(src, dst, DIRECTIONS[2], 1.0)?;
        for (r, c) in [(1, 1), (1, 2), (2, 1), (2, 2)] {
            let x = *map_x.get_unchecked([r, c]);
            let y = *map_y.get_unchecked([r, c]);
            assert!((x - 200.0).abs() < 30.0 && x != 200.0, "x = {x}");
            assert!((y - 100.0).abs() < 30.0 && y != 100.0, "y = {y}");
        }
        Ok(())
    }

    #[test]
    fn up_view_looks_at_the_top_row() -> Result<(), ProjectionError> {
        let src = ImageSize::from([400, 200]);
        let dst = ImageSize::from([101, 101]);
        let (_, map_y) = rectilinear_maps(src, dst, DIRECTIONS[0], 1.0)?;

        assert_eq!(map_y.get([50, 50]), Some(&0.0));
        for (r, c) in [(49, 50), (51, 50), (50, 49), (50, 51), (49, 49)] {
            let row = *map_y.get_unchecked([r, c]);
            assert!((0.0..2.5).contains(&row), "row = {row}");
        }

        let (lat, _) = plane_to_sphere(0.01, 0.01, DIRECTIONS[0]);
        assert_relative_eq!(lat, -FRAC_PI_2, epsilon = 0.02);
        Ok(())
    }

    #[test]
    fn maps_are_finite() -> Result<(), ProjectionError> {
        let src = ImageSize::from([64, 32]);
        for dir in DIRECTIONS {
            for dst in [ImageSize::from([7, 7]), ImageSize::from([8, 8]), ImageSize::from([1, 1])] {
                let (map_x, map_y) = rectilinear_maps(src, dst, dir, 1.0)?;
                assert!(map_x.as_slice().iter().all(|v| v.is_finite()));
                assert!(map_y.as_slice().iter().all(|v| v.is_finite()));
            }
        }
        Ok(())
    }

    #[test]
    fn grayscale_uses_nearest() -> Result<(), ProjectionError> {
        let src = Image::<u8, 1>::from_size_fn([40, 20].into(), |x, y| [(x * 3 + y) as u8])?;
        let view = eqr_to_rectilinear(&src, DIRECTIONS[2], &RectilinearParams::default())?;

        assert_eq!(view.size(), ImageSize::from([10, 10]));
        assert_eq!(view.num_channels(), 1);
        // nearest only copies existing samples
        for val in view.as_slice() {
            assert!(src.as_slice().contains(val));
        }
        Ok(())
    }

    #[test]
    fn colour_keeps_three_channels() -> Result<(), ProjectionError> {
        let src = Image::<u8, 3>::from_size_val([40, 20].into(), 77)?;
        let params = RectilinearParams {
            aspect_ratio: 2.0,
            output_height: Some(6),
            interpolation: None,
        };
        let view = eqr_to_rectilinear(&src, DIRECTIONS[3], &params)?;

        assert_eq!(view.size(), ImageSize::from([12, 6]));
        assert_eq!(view.num_channels(), 3);
        assert!(view.as_slice().iter().all(|&v| v == 77));
        Ok(())
    }

    #[test]
    fn reuse_destination_buffer() -> Result<(), ProjectionError> {
        let src = Image::<f32, 1>::from_size_fn([32, 16].into(), |_, y| [y as f32])?;
        let mut dst = Image::<f32, 1>::from_size_val([8, 8].into(), -1.0)?;

        rectilinear_from_equirect(&src, &mut dst, DIRECTIONS[0], 1.0, InterpolationMode::Nearest)?;
        let up = dst.clone();
        rectilinear_from_equirect(&src, &mut dst, DIRECTIONS[1], 1.0, InterpolationMode::Nearest)?;

        assert!(up.as_slice().iter().all(|&v| v < 8.0));
        assert!(dst.as_slice().iter().all(|&v| v >= 8.0));
        Ok(())
    }

    #[test]
    fn destination_with_wrong_width() -> Result<(), ProjectionError> {
        let src = Image::<u8, 1>::from_size_val([32, 16].into(), 0)?;
        let mut dst = Image::<u8, 1>::from_size_val([5, 8].into(), 0)?;

        let res =
            rectilinear_from_equirect(&src, &mut dst, DIRECTIONS[2], 1.0, InterpolationMode::Nearest);
        assert_eq!(
            res,
            Err(ProjectionError::Image(ImageError::InvalidImageSize(8, 8, 5, 8)))
        );
        Ok(())
    }
}
