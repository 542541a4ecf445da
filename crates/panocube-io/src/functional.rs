use std::path::Path;

use panocube_image::{Image, ImageSize};

use crate::error::IoError;

/// A decoded image, either single channel or RGB.
#[derive(Debug, Clone, PartialEq)]
pub enum GenericImage {
    /// 8-bit grayscale image
    Mono8(Image<u8, 1>),
    /// 8-bit RGB image
    Rgb8(Image<u8, 3>),
}

impl GenericImage {
    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        match self {
            GenericImage::Mono8(image) => image.size(),
            GenericImage::Rgb8(image) => image.size(),
        }
    }

    /// Get the number of channels in the image.
    pub fn num_channels(&self) -> usize {
        match self {
            GenericImage::Mono8(image) => image.num_channels(),
            GenericImage::Rgb8(image) => image.num_channels(),
        }
    }
}

/// Reads an image from the given file path.
///
/// The method tries to read from any image format supported by the image crate,
/// guessing the format from the file content. Grayscale files, with or without
/// alpha and at any bit depth, are returned as [`GenericImage::Mono8`]; everything
/// else is converted to [`GenericImage::Rgb8`]. Alpha is dropped and channels
/// are kept in RGB order.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Errors
///
/// [`IoError::FileDoesNotExist`] for a missing file, [`IoError::ImageDecodeError`]
/// when the content cannot be decoded.
pub fn read_image_any(file_path: impl AsRef<Path>) -> Result<GenericImage, IoError> {
    let file_path = file_path.as_ref();

    // verify the file exists
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    // open the file and map it to memory
    let file = std::fs::File::open(file_path)?;
    // SAFETY: the mapping is only read while decoding and dropped right after.
    let mmap = unsafe { memmap2::Mmap::map(&file)? };

    // decode the data directly from memory
    let img = image::ImageReader::new(std::io::Cursor::new(&mmap[..]))
        .with_guessed_format()?
        .decode()?;

    let size = ImageSize {
        width: img.width() as usize,
        height: img.height() as usize,
    };

    let image = match img.color() {
        image::ColorType::L8
        | image::ColorType::La8
        | image::ColorType::L16
        | image::ColorType::La16 => {
            GenericImage::Mono8(Image::<u8, 1>::new(size, img.into_luma8().into_raw())?)
        }
        _ => GenericImage::Rgb8(Image::<u8, 3>::new(size, img.into_rgb8().into_raw())?),
    };

    Ok(image)
}
