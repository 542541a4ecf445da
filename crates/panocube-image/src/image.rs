use std::ops;

use panocube_tensor::Tensor3;

use crate::error::ImageError;

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use panocube_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl ImageSize {
    /// Whether the image holds no pixel at all.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Number of samples of an image of this size with `channels` channels.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::SizeOverflow`] if the count does not fit in `usize`.
    pub fn num_samples(&self, channels: usize) -> Result<usize, ImageError> {
        self.width
            .checked_mul(self.height)
            .and_then(|n| n.checked_mul(channels))
            .ok_or(ImageError::SizeOverflow(self.width, self.height, channels))
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} x {}", self.width, self.height)
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// Trait for image data types.
///
/// Resampling runs in `f32`; `from_f32` brings the result back to the sample type.
/// Send and Sync are required by the row-parallel kernels.
pub trait ImageDtype: Copy + Default + Into<f32> + Send + Sync {
    /// Convert a f32 value to the image data type.
    fn from_f32(x: f32) -> Self;
}

impl ImageDtype for f32 {
    fn from_f32(x: f32) -> Self {
        x
    }
}

impl ImageDtype for u8 {
    fn from_f32(x: f32) -> Self {
        x.round().clamp(0.0, 255.0) as u8
    }
}

impl ImageDtype for u16 {
    fn from_f32(x: f32) -> Self {
        x.round().clamp(0.0, 65535.0) as u16
    }
}

/// Represents an image with pixel data.
///
/// The image is a 3D tensor with shape (H, W, C), where H is the height of the image,
/// W the width and C the number of interleaved channels.
#[derive(Clone, Debug, PartialEq)]
pub struct Image<T, const CHANNELS: usize>(pub Tensor3<T>);

/// helper to deference the inner tensor
impl<T, const CHANNELS: usize> ops::Deref for Image<T, CHANNELS> {
    type Target = Tensor3<T>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// helper to deference the inner tensor
impl<T, const CHANNELS: usize> ops::DerefMut for Image<T, CHANNELS> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<T, const CHANNELS: usize> Image<T, CHANNELS> {
    /// Create a new image from pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `data` - The interleaved pixel data of the image.
    ///
    /// # Errors
    ///
    /// If the length of the pixel data does not match the image size, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use panocube_image::{Image, ImageSize};
    ///
    /// let image = Image::<u8, 3>::new(
    ///     ImageSize {
    ///         width: 10,
    ///         height: 20,
    ///     },
    ///     vec![0u8; 10 * 20 * 3],
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(image.size().width, 10);
    /// assert_eq!(image.size().height, 20);
    /// assert_eq!(image.num_channels(), 3);
    /// ```
    pub fn new(size: ImageSize, data: Vec<T>) -> Result<Self, ImageError> {
        let num_samples = size.num_samples(CHANNELS)?;
        if data.len() != num_samples {
            return Err(ImageError::InvalidChannelShape(data.len(), num_samples));
        }

        Ok(Self(Tensor3::from_shape_vec(
            [size.height, size.width, CHANNELS],
            data,
        )?))
    }

    /// Create a new image with the given size, every sample set to `val`.
    ///
    /// # Examples
    ///
    /// ```
    /// use panocube_image::{Image, ImageSize};
    ///
    /// let image = Image::<u8, 1>::from_size_val([4, 2].into(), 7).unwrap();
    ///
    /// assert_eq!(image.size(), ImageSize { width: 4, height: 2 });
    /// assert_eq!(image.pixel(3, 1), &[7]);
    /// ```
    pub fn from_size_val(size: ImageSize, val: T) -> Result<Self, ImageError>
    where
        T: Clone,
    {
        let data = vec![val; size.num_samples(CHANNELS)?];
        Image::new(size, data)
    }

    /// Create a new image whose pixels are produced by `f(x, y)`.
    pub fn from_size_fn<F>(size: ImageSize, f: F) -> Result<Self, ImageError>
    where
        F: Fn(usize, usize) -> [T; CHANNELS],
    {
        let mut data = Vec::with_capacity(size.num_samples(CHANNELS)?);
        for y in 0..size.height {
            for x in 0..size.width {
                data.extend(f(x, y));
            }
        }
        Image::new(size, data)
    }

    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        ImageSize {
            width: self.shape[1],
            height: self.shape[0],
        }
    }

    /// Get the number of columns of the image.
    pub fn cols(&self) -> usize {
        self.width()
    }

    /// Get the number of rows of the image.
    pub fn rows(&self) -> usize {
        self.height()
    }

    /// Get the width of the image in pixels.
    pub fn width(&self) -> usize {
        self.shape[1]
    }

    /// Get the height of the image in pixels.
    pub fn height(&self) -> usize {
        self.shape[0]
    }

    /// Get the number of channels in the image.
    pub fn num_channels(&self) -> usize {
        CHANNELS
    }

    /// Get all the channels of the pixel at (`x`, `y`).
    ///
    /// # Panics
    ///
    /// Panics if the pixel is outside the image.
    pub fn pixel(&self, x: usize, y: usize) -> &[T] {
        let base = (y * self.cols() + x) * CHANNELS;
        &self.as_slice()[base..base + CHANNELS]
    }
}

#[cfg(test)]
mod tests {
    use crate::image::{Image, ImageDtype, ImageError, ImageSize};

    #[test]
    fn image_size() {
        let image_size = ImageSize {
            width: 10,
            height: 20,
        };
        assert_eq!(image_size.to_string(), "10 x 20");
        assert!(!image_size.is_empty());
        assert!(ImageSize::from([0, 5]).is_empty());
    }

    #[test]
    fn image_smoke() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::new(
            ImageSize {
                width: 10,
                height: 20,
            },
            vec![0u8; 10 * 20 * 3],
        )?;
        assert_eq!(image.size().width, 10);
        assert_eq!(image.size().height, 20);
        assert_eq!(image.num_channels(), 3);

        Ok(())
    }

    #[test]
    fn image_wrong_data_length() {
        let res = Image::<u8, 3>::new([2, 2].into(), vec![0u8; 11]);
        assert_eq!(res.err(), Some(ImageError::InvalidChannelShape(11, 12)));
    }

    #[test]
    fn image_empty_is_allowed() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::new([0, 0].into(), vec![])?;
        assert!(image.size().is_empty());
        Ok(())
    }

    #[test]
    fn image_from_size_fn() -> Result<(), ImageError> {
        let image = Image::<u8, 2>::from_size_fn([3, 2].into(), |x, y| [x as u8, y as u8])?;
        assert_eq!(image.pixel(2, 1), &[2, 1]);
        assert_eq!(image.pixel(1, 0), &[1, 0]);
        Ok(())
    }

    #[test]
    fn image_size_overflow() {
        let size = ImageSize::from([usize::MAX, 2]);
        assert_eq!(size.num_samples(1), Err(ImageError::SizeOverflow(usize::MAX, 2, 1)));

        let res = Image::<u8, 3>::from_size_val([usize::MAX / 2, 1].into(), 0);
        assert_eq!(res.err(), Some(ImageError::SizeOverflow(usize::MAX / 2, 1, 3)));

        let res = Image::<u8, 1>::new([usize::MAX, usize::MAX].into(), vec![]);
        assert_eq!(
            res.err(),
            Some(ImageError::SizeOverflow(usize::MAX, usize::MAX, 1))
        );

        let res = Image::<u8, 1>::from_size_fn([usize::MAX, 3].into(), |_, _| [0]);
        assert!(matches!(res, Err(ImageError::SizeOverflow(..))));
    }

    #[test]
    fn dtype_from_f32_saturates() {
        assert_eq!(u8::from_f32(-3.2), 0);
        assert_eq!(u8::from_f32(127.5), 128);
        assert_eq!(u8::from_f32(300.0), 255);
        assert_eq!(u16::from_f32(70000.0), 65535);
        assert_eq!(f32::from_f32(0.25), 0.25);
    }
}
