use ndarray::Array3;

use crate::array::PixelArray;
use crate::error::Cause;

/// Rescales an image to zero mean and unit variance.
///
/// Computes `(x - mean) / max(stddev, 1 / sqrt(N))` over all `N` elements,
/// so a flat image maps to zeros instead of dividing by zero. Integer
/// samples are cast to `f32` first, not rescaled into `[0, 1]`.
pub fn per_image_standardization(image: &PixelArray) -> Result<Array3<f32>, Cause> {
    if image.is_empty() {
        return Err(Cause::Invalid("Cannot standardize an empty image".into()));
    }
    let values = image.to_f32();
    let mean = values.mean().unwrap_or_default();
    let stddev = values.std(0.0);
    let min_stddev = 1.0 / (values.len() as f32).sqrt();
    let adjusted_stddev = stddev.max(min_stddev);

    Ok(values.mapv(|v| (v - mean) / adjusted_stddev))
}
