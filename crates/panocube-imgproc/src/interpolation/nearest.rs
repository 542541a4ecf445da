use panocube_image::{Image, ImageDtype};

use super::border::{fetch_pixel, BorderPolicy};

/// Kernel for nearest neighbor interpolation
///
/// # Arguments
///
/// * `image` - The input image container.
/// * `u` - The x coordinate of the pixel to interpolate.
/// * `v` - The y coordinate of the pixel to interpolate.
/// * `border` - How out of range samples are resolved.
///
/// # Returns
///
/// The interpolated pixel values.
pub(crate) fn nearest_neighbor_interpolation<T: ImageDtype, const C: usize>(
    image: &Image<T, C>,
    u: f32,
    v: f32,
    border: BorderPolicy,
) -> [f32; C] {
    let iu = u.round() as isize;
    let iv = v.round() as isize;

    let mut pixel = [0.0; C];
    if let Some(src) = fetch_pixel(image, iu, iv, border) {
        for (dst, &val) in pixel.iter_mut().zip(src) {
            *dst = val.into();
        }
    }

    pixel
}
