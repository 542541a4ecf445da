use panocube_image::{Image, ImageDtype};

use super::border::{fetch_pixel, BorderPolicy};

// Keys cubic convolution coefficient
const A: f32 = -0.75;

// weights of the taps at offsets -1, 0, 1, 2 for a fractional position t in [0, 1)
#[inline]
fn cubic_weights(t: f32) -> [f32; 4] {
    let w0 = ((A * (t + 1.0) - 5.0 * A) * (t + 1.0) + 8.0 * A) * (t + 1.0) - 4.0 * A;
    let w1 = ((A + 2.0) * t - (A + 3.0)) * t * t + 1.0;
    let w2 = ((A + 2.0) * (1.0 - t) - (A + 3.0)) * (1.0 - t) * (1.0 - t) + 1.0;
    let w3 = 1.0 - w0 - w1 - w2;
    [w0, w1, w2, w3]
}

/// Kernel for bicubic interpolation
///
/// Convolves the 4x4 neighbourhood around (`u`, `v`) with the cubic kernel
/// (a = -0.75). The result may overshoot the input range; callers saturate
/// when converting back to the sample type.
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
pub(crate) fn bicubic_interpolation<T: ImageDtype, const C: usize>(
    image: &Image<T, C>,
    u: f32,
    v: f32,
    border: BorderPolicy,
) -> [f32; C] {
    let u0 = u.floor();
    let v0 = v.floor();

    let wu = cubic_weights(u - u0);
    let wv = cubic_weights(v - v0);

    let (iu0, iv0) = ((u0 as isize).saturating_sub(1), (v0 as isize).saturating_sub(1));

    let mut pixel = [0.0; C];
    for (dy, &wy) in wv.iter().enumerate() {
        for (dx, &wx) in wu.iter().enumerate() {
            let Some(src) = fetch_pixel(
                image,
                iu0.saturating_add(dx as isize),
                iv0.saturating_add(dy as isize),
                border,
            ) else {
                continue;
            };
            let w = wx * wy;
            for (dst, &val) in pixel.iter_mut().zip(src) {
                *dst += w * val.into();
            }
        }
    }

    pixel
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use panocube_image::ImageError;

    #[test]
    fn weights_partition_of_unity() {
        for t in [0.0, 0.25, 0.5, 0.9] {
            let w = cubic_weights(t);
            assert_relative_eq!(w.iter().sum::<f32>(), 1.0, epsilon = 1e-6);
        }
        assert_eq!(cubic_weights(0.0), [0.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn bicubic_samples_and_midpoints() -> Result<(), ImageError> {
        let image = Image::<f32, 1>::from_size_fn([8, 8].into(), |x, _| [x as f32])?;
        let border = BorderPolicy::uniform(super::super::BorderMode::Replicate);

        // integer positions hit the samples exactly
        let [val] = bicubic_interpolation(&image, 5.0, 2.0, border);
        assert_relative_eq!(val, 5.0, epsilon = 1e-6);

        // the kernel is symmetric, so half way between two samples of a ramp is their mean
        let [val] = bicubic_interpolation(&image, 3.5, 4.25, border);
        assert_relative_eq!(val, 3.5, epsilon = 1e-5);
        Ok(())
    }

    #[test]
    fn bicubic_keeps_constant_image() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::from_size_val([5, 5].into(), 200)?;
        let border = BorderPolicy::EQUIRECTANGULAR;

        for (u, v) in [(0.3, 0.7), (4.6, 2.2), (-0.4, 4.9)] {
            let pixel = bicubic_interpolation(&image, u, v, border);
            for val in pixel {
                assert_relative_eq!(val, 200.0, epsilon = 1e-3);
            }
        }
        Ok(())
    }
}
