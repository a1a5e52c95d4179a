//! Typed pixel arrays produced by the pipeline.

use ndarray::{Array3, Axis};

/// Element type used when decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DType {
    #[default]
    U8,
    /// 8-bit samples are widened by x257 so that 255 maps to 65535.
    U16,
    /// Samples are mapped into `[0, 1]`.
    F32,
}

/// A 3-dimensional image array, either `(H, W, C)` or `(C, H, W)`.
#[derive(Debug, Clone, PartialEq)]
pub enum PixelArray {
    U8(Array3<u8>),
    U16(Array3<u16>),
    F32(Array3<f32>),
}

/// Applies the same array expression to whichever variant is held.
macro_rules! map_variants {
    ($value:expr, $arr:ident => $body:expr) => {
        match $value {
            PixelArray::U8($arr) => PixelArray::U8($body),
            PixelArray::U16($arr) => PixelArray::U16($body),
            PixelArray::F32($arr) => PixelArray::F32($body),
        }
    };
}

impl PixelArray {
    pub fn shape(&self) -> &[usize] {
        match self {
            PixelArray::U8(a) => a.shape(),
            PixelArray::U16(a) => a.shape(),
            PixelArray::F32(a) => a.shape(),
        }
    }

    pub fn dtype(&self) -> DType {
        match self {
            PixelArray::U8(_) => DType::U8,
            PixelArray::U16(_) => DType::U16,
            PixelArray::F32(_) => DType::F32,
        }
    }

    pub fn len(&self) -> usize {
        self.shape().iter().product()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every element widened to `f32`, without rescaling.
    pub fn to_f32(&self) -> Array3<f32> {
        match self {
            PixelArray::U8(a) => a.mapv(f32::from),
            PixelArray::U16(a) => a.mapv(f32::from),
            PixelArray::F32(a) => a.clone(),
        }
    }

    pub fn as_u8(&self) -> Option<&Array3<u8>> {
        match self {
            PixelArray::U8(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_u16(&self) -> Option<&Array3<u16>> {
        match self {
            PixelArray::U16(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_f32(&self) -> Option<&Array3<f32>> {
        match self {
            PixelArray::F32(a) => Some(a),
            _ => None,
        }
    }

    /// Reverses the last axis, e.g. RGB to BGR on a channels-last array.
    pub fn reverse_channels(self) -> Self {
        map_variants!(self, a => {
            let mut a = a;
            a.invert_axis(Axis(2));
            a
        })
    }

    /// `(H, W, C)` to `(C, H, W)`.
    pub fn to_channels_first(self) -> Self {
        map_variants!(self, a => a.permuted_axes([2, 0, 1]))
    }

    /// Multiplies every element by `factor`. Integer arrays are promoted to `F32`.
    /// Non-finite factors are applied as-is and yield `inf`/`NaN` elements.
    pub fn scale(self, factor: f32) -> Self {
        let scaled = match self {
            PixelArray::U8(a) => a.mapv(|v| f32::from(v) * factor),
            PixelArray::U16(a) => a.mapv(|v| f32::from(v) * factor),
            PixelArray::F32(a) => a * factor,
        };
        PixelArray::F32(scaled)
    }

    /// Copies the data into row-major order if a transpose or axis
    /// inversion left it strided.
    pub fn into_standard_layout(self) -> Self {
        map_variants!(self, a => {
            if a.is_standard_layout() {
                a
            } else {
                a.as_standard_layout().into_owned()
            }
        })
    }
}
