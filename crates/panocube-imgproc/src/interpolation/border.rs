use panocube_image::Image;

/// How a sample index outside the image is resolved along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderMode {
    /// Samples outside the image read as zero.
    Constant,
    /// Samples outside the image read the closest edge sample.
    Replicate,
    /// The axis is circular: index `len` is index `0` again.
    Wrap,
}

impl BorderMode {
    /// Resolve `index` against an axis of length `len`.
    ///
    /// # Returns
    ///
    /// The in-range index to read, or `None` when the sample falls outside a
    /// [`BorderMode::Constant`] border (or the axis is empty).
    ///
    /// # Example
    ///
    /// ```
    /// use panocube_imgproc::interpolation::BorderMode;
    ///
    /// assert_eq!(BorderMode::Wrap.resolve(-1, 4), Some(3));
    /// assert_eq!(BorderMode::Wrap.resolve(9, 4), Some(1));
    /// assert_eq!(BorderMode::Replicate.resolve(-5, 4), Some(0));
    /// assert_eq!(BorderMode::Constant.resolve(4, 4), None);
    /// ```
    pub fn resolve(self, index: isize, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let len = len as isize;
        match self {
            BorderMode::Constant => (0..len).contains(&index).then_some(index as usize),
            BorderMode::Replicate => Some(index.clamp(0, len - 1) as usize),
            BorderMode::Wrap => Some(index.rem_euclid(len) as usize),
        }
    }
}

/// Border handling for both axes of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderPolicy {
    /// Border mode along the columns (x axis).
    pub horizontal: BorderMode,
    /// Border mode along the rows (y axis).
    pub vertical: BorderMode,
}

impl BorderPolicy {
    /// Equirectangular panoramas wrap in longitude and clamp at the poles.
    pub const EQUIRECTANGULAR: BorderPolicy = BorderPolicy {
        horizontal: BorderMode::Wrap,
        vertical: BorderMode::Replicate,
    };

    /// The same border mode on both axes.
    pub const fn uniform(mode: BorderMode) -> Self {
        BorderPolicy {
            horizontal: mode,
            vertical: mode,
        }
    }
}

impl Default for BorderPolicy {
    fn default() -> Self {
        BorderPolicy::uniform(BorderMode::Constant)
    }
}

// read the channels at (ix, iy) after resolving the border, None means zero
#[inline]
pub(crate) fn fetch_pixel<T, const C: usize>(
    image: &Image<T, C>,
    ix: isize,
    iy: isize,
    border: BorderPolicy,
) -> Option<&[T]> {
    let x = border.horizontal.resolve(ix, image.cols())?;
    let y = border.vertical.resolve(iy, image.rows())?;
    Some(image.pixel(x, y))
}
