use image::{DynamicImage, ImageFormat};
use log::debug;
use ndarray::Array3;
use std::io::Cursor;

use crate::array::{DType, PixelArray};
use crate::error::Cause;
use crate::utils::convert::{array_to_dynamic, dynamic_to_array};

/// Basic facts about an encoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageInfo {
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
    pub channels: u8,
}

/// Detects the container format, accepting only PNG, JPEG and BMP.
pub fn detect_format(bytes: &[u8]) -> Result<ImageFormat, Cause> {
    let format = image::guess_format(bytes)?;
    match format {
        ImageFormat::Png | ImageFormat::Jpeg | ImageFormat::Bmp => Ok(format),
        other => Err(Cause::UnsupportedFormat(other)),
    }
}

/// Channel counts that may be requested explicitly for each format.
fn allowed_channels(format: ImageFormat) -> &'static [u8] {
    match format {
        ImageFormat::Png => &[1, 2, 3, 4],
        ImageFormat::Jpeg => &[1, 3],
        ImageFormat::Bmp => &[3, 4],
        _ => &[],
    }
}

/// Load image from bytes (PNG, JPEG or BMP)
pub fn load_image_from_bytes(bytes: &[u8]) -> Result<(DynamicImage, ImageFormat), Cause> {
    let format = detect_format(bytes)?;
    let img = image::load_from_memory_with_format(bytes, format)?;
    Ok((img, format))
}

/// Reads format, dimensions and channel count of an encoded image.
pub fn inspect(bytes: &[u8]) -> Result<ImageInfo, Cause> {
    let (img, format) = load_image_from_bytes(bytes)?;
    Ok(ImageInfo {
        format,
        width: img.width(),
        height: img.height(),
        channels: img.color().channel_count(),
    })
}

/// Decodes an encoded image into an `(H, W, C)` array.
///
/// `channels` of `None` or `Some(0)` keeps the channel count stored in the
/// file; any other value converts the pixels and must be valid for the
/// detected format.
pub fn decode_image(bytes: &[u8], channels: Option<u8>, dtype: DType) -> Result<PixelArray, Cause> {
    let (img, format) = load_image_from_bytes(bytes)?;

    let channels = match channels {
        None | Some(0) => img.color().channel_count(),
        Some(n) if allowed_channels(format).contains(&n) => n,
        Some(n) => return Err(Cause::UnsupportedChannels { format, channels: n }),
    };

    let array = dynamic_to_array(&img, channels, dtype)?;
    debug!(
        "Decoded {:?} image of color type {:?} into {:?} {:?}",
        format,
        img.color(),
        array.shape(),
        dtype
    );
    Ok(array)
}

/// Rebuilds an image from an `(H, W, C)` array of 8-bit samples.
pub fn array_to_image(array: &Array3<u8>) -> Result<DynamicImage, Cause> {
    array_to_dynamic(array)
}

/// Save image to bytes in the given format
pub fn save_image_to_bytes(image: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>, Cause> {
    let mut buf = Vec::new();
    image.write_to(&mut Cursor::new(&mut buf), format)?;
    Ok(buf)
}
