//! The decode / resize / postprocess pipeline.

use log::debug;

use crate::array::{DType, PixelArray};
use crate::error::{Cause, PreprocessError, Result};
use crate::image_handler;
use crate::utils::crop_or_pad::crop_or_pad;
use crate::utils::standardize::per_image_standardization;

/// Options for [`preprocess_binary_image`].
#[derive(Debug, Clone, PartialEq)]
pub struct PreprocessConfig {
    /// Channel count to decode into. `None` or `Some(0)` keeps the file's own.
    pub channels: Option<u8>,
    /// `(height, width)` to crop or pad to.
    pub target_size: Option<(u32, u32)>,
    /// Emit `(C, H, W)` instead of `(H, W, C)`.
    pub channels_first: bool,
    pub dtype: DType,
    /// Multiplier applied last. `Some(0.0)` is treated like `None`.
    pub scale: Option<f32>,
    pub standardization: bool,
    /// RGB to BGR, applied before the layout transpose.
    pub reverse_input_channels: bool,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            channels: None,
            target_size: None,
            channels_first: true,
            dtype: DType::U8,
            scale: None,
            standardization: false,
            reverse_input_channels: false,
        }
    }
}

/// Decodes a PNG, JPEG or BMP image and turns it into a numeric array.
///
/// # Errors
/// * `PreprocessError::Decode` if the bytes are not a supported image or
///   the requested channel count cannot be produced
/// * `PreprocessError::Resize` if crop-or-pad fails for `target_size`
/// * `PreprocessError::Preprocess` if standardization fails
pub fn preprocess_binary_image(image: &[u8], config: &PreprocessConfig) -> Result<PixelArray> {
    let decoded = image_handler::decode_image(image, config.channels, config.dtype)
        .map_err(PreprocessError::Decode)?;

    let decoded = match config.target_size {
        Some(target) => resize(decoded, target)?,
        None => decoded,
    };

    postprocess(decoded, config).map_err(PreprocessError::Preprocess)
}

fn resize(decoded: PixelArray, (height, width): (u32, u32)) -> Result<PixelArray> {
    let from = decoded.shape().to_vec();
    let (h, w) = (height as usize, width as usize);

    let resized = match &decoded {
        PixelArray::U8(a) => crop_or_pad(a, h, w).map(PixelArray::U8),
        PixelArray::U16(a) => crop_or_pad(a, h, w).map(PixelArray::U16),
        PixelArray::F32(a) => crop_or_pad(a, h, w).map(PixelArray::F32),
    }
    .map_err(|source| PreprocessError::Resize {
        from: from.clone(),
        to: (height, width),
        source,
    })?;

    debug!("Resized image from {:?} to {:?}", from, resized.shape());
    Ok(resized)
}

fn postprocess(decoded: PixelArray, config: &PreprocessConfig) -> std::result::Result<PixelArray, Cause> {
    let mut image_array = decoded.clone();

    if config.standardization {
        // The standardized values are not carried into the output array;
        // channel reversal, transpose and scaling run on the raw copy.
        let standardized = per_image_standardization(&decoded)?;
        debug!(
            "Computed standardized image of shape {:?}; output keeps raw values",
            standardized.shape()
        );
    }
    if config.reverse_input_channels {
        image_array = image_array.reverse_channels();
    }
    if config.channels_first {
        image_array = image_array.to_channels_first();
    }
    if let Some(scale) = config.scale.filter(|&s| s != 0.0) {
        image_array = image_array.scale(scale);
    }

    Ok(image_array.into_standard_layout())
}
