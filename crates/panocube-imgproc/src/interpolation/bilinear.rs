use panocube_image::{Image, ImageDtype};

use super::border::{fetch_pixel, BorderPolicy};

/// Kernel for bilinear interpolation
///
/// # Arguments
///
/// * `image` - The input image container.
/// * `u` - The x coordinate of the pixel to interpolate.
/// * `v` - The y coordinate of the pixel to interpolate.
/// * `border` - How out of range taps are resolved.
///
/// # Returns
///
/// The interpolated pixel values.
pub(crate) fn bilinear_interpolation<T: ImageDtype, const C: usize>(
    image: &Image<T, C>,
    u: f32,
    v: f32,
    border: BorderPolicy,
) -> [f32; C] {
    let u0 = u.floor();
    let v0 = v.floor();

    let frac_u = u - u0;
    let frac_v = v - v0;

    let (iu0, iv0) = (u0 as isize, v0 as isize);

    let (iu1, iv1) = (iu0.saturating_add(1), iv0.saturating_add(1));

    let taps = [
        (iu0, iv0, (1.0 - frac_u) * (1.0 - frac_v)),
        (iu1, iv0, frac_u * (1.0 - frac_v)),
        (iu0, iv1, (1.0 - frac_u) * frac_v),
        (iu1, iv1, frac_u * frac_v),
    ];

    let mut pixel = [0.0; C];
    for (iu, iv, w) in taps {
        if let Some(src) = fetch_pixel(image, iu, iv, border) {
            for (dst, &val) in pixel.iter_mut().zip(src) {
                *dst += w * val.into();
            }
        }
    }

    pixel
}
