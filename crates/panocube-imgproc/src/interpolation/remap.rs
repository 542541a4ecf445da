use crate::parallel;

use super::border::BorderPolicy;
use super::interpolate::interpolate_pixel;
use super::InterpolationMode;
use panocube_image::{Image, ImageDtype, ImageError};
use panocube_tensor::Tensor2;

/// Apply generic geometric transformation to an image.
///
/// Every destination pixel `(row, col)` is sampled from `src` at column
/// `map_x[row, col]` and row `map_y[row, col]`.
///
/// # Arguments
///
/// * `src` - The input image container with shape (height, width, C).
/// * `dst` - The output image container with shape (height, width, C).
/// * `map_x` - The x coordinates of the pixels to interpolate.
/// * `map_y` - The y coordinates of the pixels to interpolate.
/// * `interpolation` - The interpolation mode to use.
/// * `border` - How samples outside `src` are resolved.
///
/// # Errors
///
/// * The mapx and mapy must have the same size.
/// * The output image must have the same size as the mapx and mapy.
pub fn remap<T: ImageDtype, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    map_x: &Tensor2<f32>,
    map_y: &Tensor2<f32>,
    interpolation: InterpolationMode,
    border: BorderPolicy,
) -> Result<(), ImageError> {
    if map_x.shape != map_y.shape {
        return Err(ImageError::InvalidImageSize(
            map_x.shape[1],
            map_x.shape[0],
            map_y.shape[1],
            map_y.shape[0],
        ));
    }

    if [dst.rows(), dst.cols()] != map_x.shape {
        return Err(ImageError::InvalidImageSize(
            map_x.shape[1],
            map_x.shape[0],
            dst.cols(),
            dst.rows(),
        ));
    }

    // parallelize the remap operation by rows
    parallel::par_iter_rows_resample(dst, map_x, map_y, |&x, &y, dst_pixel| {
        let pixel = interpolate_pixel(src, x, y, interpolation, border);
        dst_pixel
            .iter_mut()
            .zip(pixel)
            .for_each(|(out, val)| *out = T::from_f32(val));
    });

    Ok(())
}
