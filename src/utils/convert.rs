use image::{DynamicImage, ImageBuffer, Pixel};
use ndarray::{Array3, ShapeError};

use crate::array::{DType, PixelArray};
use crate::error::Cause;

/// Moves the samples of an image buffer into an `(H, W, C)` array.
pub fn buffer_to_array<P: Pixel>(
    buffer: ImageBuffer<P, Vec<P::Subpixel>>,
) -> Result<Array3<P::Subpixel>, ShapeError> {
    let (width, height) = buffer.dimensions();
    Array3::from_shape_vec(
        (height as usize, width as usize, P::CHANNEL_COUNT as usize),
        buffer.into_raw(),
    )
}

/// Converts a decoded image into an array with the given channel count and
/// element type. Color conversions are delegated to the `image` crate.
pub fn dynamic_to_array(img: &DynamicImage, channels: u8, dtype: DType) -> Result<PixelArray, Cause> {
    let array = match (channels, dtype) {
        (1, DType::U8) => PixelArray::U8(buffer_to_array(img.to_luma8())?),
        (2, DType::U8) => PixelArray::U8(buffer_to_array(img.to_luma_alpha8())?),
        (3, DType::U8) => PixelArray::U8(buffer_to_array(img.to_rgb8())?),
        (4, DType::U8) => PixelArray::U8(buffer_to_array(img.to_rgba8())?),
        (1, DType::U16) => PixelArray::U16(buffer_to_array(img.to_luma16())?),
        (2, DType::U16) => PixelArray::U16(buffer_to_array(img.to_luma_alpha16())?),
        (3, DType::U16) => PixelArray::U16(buffer_to_array(img.to_rgb16())?),
        (4, DType::U16) => PixelArray::U16(buffer_to_array(img.to_rgba16())?),
        (1, DType::F32) => PixelArray::F32(buffer_to_array(img.to_luma32f())?),
        (2, DType::F32) => PixelArray::F32(buffer_to_array(img.to_luma_alpha32f())?),
        (3, DType::F32) => PixelArray::F32(buffer_to_array(img.to_rgb32f())?),
        (4, DType::F32) => PixelArray::F32(buffer_to_array(img.to_rgba32f())?),
        (n, _) => {
            return Err(Cause::Invalid(format!(
                "Channel count must be between 1 and 4, got {n}"
            )));
        }
    };
    Ok(array)
}

/// Rebuilds an image from an `(H, W, C)` array of 8-bit samples.
pub fn array_to_dynamic(array: &Array3<u8>) -> Result<DynamicImage, Cause> {
    let (height, width, channels) = array.dim();
    let raw: Vec<u8> = array.iter().copied().collect();
    let (width, height) = (width as u32, height as u32);

    let img = match channels {
        1 => ImageBuffer::from_raw(width, height, raw).map(DynamicImage::ImageLuma8),
        2 => ImageBuffer::from_raw(width, height, raw).map(DynamicImage::ImageLumaA8),
        3 => ImageBuffer::from_raw(width, height, raw).map(DynamicImage::ImageRgb8),
        4 => ImageBuffer::from_raw(width, height, raw).map(DynamicImage::ImageRgba8),
        n => {
            return Err(Cause::Invalid(format!(
                "Cannot build an image with {n} channels"
            )));
        }
    };
    img.ok_or_else(|| Cause::Invalid("Array does not fit the image dimensions".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn create_gradient_rgb_image(width: u32, height: u32) -> DynamicImage {
        let mut img = RgbImage::new(width, height);
        for (x, y, pixel) in img.enumerate_pixels_mut() {
            *pixel = Rgb([(x * 10) as u8, (y * 10) as u8, 255]);
        }
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn test_dynamic_to_array_layout() {
        let img = create_gradient_rgb_image(4, 3);
        let arr = dynamic_to_array(&img, 3, DType::U8).unwrap();
        assert_eq!(arr.shape(), &[3, 4, 3]);

        let a = arr.as_u8().unwrap();
        // row y=2, column x=1
        assert_eq!(a[[2, 1, 0]], 10);
        assert_eq!(a[[2, 1, 1]], 20);
        assert_eq!(a[[2, 1, 2]], 255);
    }

    #[test]
    fn test_dynamic_to_array_dtypes() {
        let img = create_gradient_rgb_image(2, 2);

        let wide = dynamic_to_array(&img, 3, DType::U16).unwrap();
        assert_eq!(wide.dtype(), DType::U16);
        assert_eq!(wide.to_f32()[[0, 0, 2]], 65535.0);

        let float = dynamic_to_array(&img, 3, DType::F32).unwrap();
        let f = float.as_f32().unwrap();
        assert!((f[[0, 0, 2]] - 1.0).abs() < 1e-6);
        assert!((f[[0, 1, 0]] - 10.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_dynamic_to_array_channel_conversion() {
        let img = create_gradient_rgb_image(2, 2);
        assert_eq!(dynamic_to_array(&img, 1, DType::U8).unwrap().shape(), &[2, 2, 1]);
        assert_eq!(dynamic_to_array(&img, 4, DType::U8).unwrap().shape(), &[2, 2, 4]);
        assert!(dynamic_to_array(&img, 5, DType::U8).is_err());
    }

    #[test]
    fn test_array_to_dynamic() {
        let img = create_gradient_rgb_image(5, 2);
        let arr = dynamic_to_array(&img, 3, DType::U8).unwrap();
        let rebuilt = array_to_dynamic(arr.as_u8().unwrap()).unwrap();
        assert_eq!(rebuilt.to_rgb8(), img.to_rgb8());

        let gray = Array3::<u8>::zeros((2, 2, 1));
        assert!(matches!(
            array_to_dynamic(&gray).unwrap(),
            DynamicImage::ImageLuma8(_)
        ));
        assert!(array_to_dynamic(&Array3::<u8>::zeros((2, 2, 5))).is_err());
    }
}
