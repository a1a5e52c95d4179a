//! Exact-size resizing by central cropping and zero padding.

use ndarray::{Array3, s};

use crate::error::Cause;

/// Crops or zero pads an `(H, W, C)` array to `target_height x target_width`.
///
/// Each spatial axis is handled independently: when the source is larger
/// the central window is kept, when it is smaller the source is placed in
/// the middle of a zero canvas. Odd differences put the extra row/column
/// at the end (bottom/right).
///
/// # Errors
/// Returns `Cause::Invalid` if either target dimension is zero, or if the
/// output would not fit the `image` crate's default allocation limit.
pub fn crop_or_pad<T>(
    array: &Array3<T>,
    target_height: usize,
    target_width: usize,
) -> Result<Array3<T>, Cause>
where
    T: Clone + Default,
{
    if target_height == 0 || target_width == 0 {
        return Err(Cause::Invalid(format!(
            "Target size must be positive, got {target_height}x{target_width}"
        )));
    }

    let (height, width, channels) = array.dim();
    let max_alloc = image::Limits::default().max_alloc.unwrap_or(u64::MAX);
    let out_bytes = target_height
        .checked_mul(target_width)
        .and_then(|n| n.checked_mul(channels))
        .and_then(|n| n.checked_mul(size_of::<T>()))
        .filter(|&n| n <= isize::MAX as usize && n as u64 <= max_alloc);
    if out_bytes.is_none() {
        return Err(Cause::Invalid(format!(
            "Target size {target_height}x{target_width}x{channels} exceeds the allocation limit of {max_alloc} bytes"
        )));
    }

    let (crop_y, pad_y, keep_h) = axis_offsets(height, target_height);
    let (crop_x, pad_x, keep_w) = axis_offsets(width, target_width);

    let mut out = Array3::<T>::from_elem((target_height, target_width, channels), T::default());
    out.slice_mut(s![pad_y..pad_y + keep_h, pad_x..pad_x + keep_w, ..])
        .assign(&array.slice(s![crop_y..crop_y + keep_h, crop_x..crop_x + keep_w, ..]));

    Ok(out)
}

/// Returns `(crop_offset, pad_offset, kept_length)` for one axis.
fn axis_offsets(size: usize, target: usize) -> (usize, usize, usize) {
    if size >= target {
        ((size - target) / 2, 0, target)
    } else {
        (0, (target - size) / 2, size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_counting_array(height: usize, width: usize) -> Array3<u8> {
        Array3::from_shape_fn((height, width, 1), |(y, x, _)| (y * width + x + 1) as u8)
    }

    #[test]
    fn test_center_crop() {
        let arr = create_counting_array(4, 4);
        let out = crop_or_pad(&arr, 2, 2).unwrap();
        assert_eq!(out.dim(), (2, 2, 1));
        assert_eq!(out[[0, 0, 0]], 6);
        assert_eq!(out[[0, 1, 0]], 7);
        assert_eq!(out[[1, 0, 0]], 10);
        assert_eq!(out[[1, 1, 0]], 11);
    }

    #[test]
    fn test_center_pad() {
        let arr = create_counting_array(2, 2);
        let out = crop_or_pad(&arr, 4, 6).unwrap();
        assert_eq!(out.dim(), (4, 6, 1));
        assert_eq!(out[[1, 2, 0]], 1);
        assert_eq!(out[[2, 3, 0]], 4);

        // border is all zeros, content sum unchanged
        assert_eq!(out.slice(s![0, .., ..]).sum(), 0);
        assert_eq!(out.iter().map(|&v| v as u32).sum::<u32>(), 1 + 2 + 3 + 4);
    }

    #[test]
    fn test_odd_difference_offsets() {
        // 5 -> 2 crops from offset 1, 1 -> 4 pads at offset 1
        let arr = create_counting_array(5, 1);
        let out = crop_or_pad(&arr, 2, 4).unwrap();
        assert_eq!(out[[0, 1, 0]], 2);
        assert_eq!(out[[1, 1, 0]], 3);
        assert_eq!(out[[0, 0, 0]], 0);
        assert_eq!(out[[0, 2, 0]], 0);
    }

    #[test]
    fn test_crop_one_axis_pad_other() {
        let arr = create_counting_array(6, 2);
        let out = crop_or_pad(&arr, 2, 4).unwrap();
        assert_eq!(out.dim(), (2, 4, 1));
        assert_eq!(out[[0, 1, 0]], 5);
        assert_eq!(out[[1, 2, 0]], 8);
        assert_eq!(out[[0, 0, 0]], 0);
    }

    #[test]
    fn test_same_size_is_identity() {
        let arr = create_counting_array(3, 5);
        assert_eq!(crop_or_pad(&arr, 3, 5).unwrap(), arr);
    }

    #[test]
    fn test_zero_target_is_error() {
        let arr = create_counting_array(3, 3);
        assert!(crop_or_pad(&arr, 0, 3).is_err());
        assert!(crop_or_pad(&arr, 3, 0).is_err());
    }

    #[test]
    fn test_oversized_target_is_error() {
        let arr = create_counting_array(3, 3);
        assert!(matches!(
            crop_or_pad(&arr, usize::MAX, usize::MAX),
            Err(Cause::Invalid(_))
        ));
        // fits in isize but not in the default 512 MiB allocation limit
        assert!(crop_or_pad(&arr, 100_000, 100_000).is_err());

        let floats = Array3::<f32>::zeros((2, 2, 3));
        assert!(crop_or_pad(&floats, 1 << 20, 1 << 20).is_err());
    }
}
