use image::ImageFormat;
use thiserror::Error;

/// The pipeline stage an error was raised from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Decode,
    Resize,
    Preprocess,
}

/// The underlying failure wrapped by a [`PreprocessError`].
#[derive(Error, Debug)]
pub enum Cause {
    #[error("{0}")]
    Invalid(String),

    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Array shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error("Unsupported image format: {0:?}")]
    UnsupportedFormat(ImageFormat),

    #[error("Cannot decode {format:?} image into {channels} channel(s)")]
    UnsupportedChannels { format: ImageFormat, channels: u8 },
}

/// The central error type of the preprocessing pipeline.
#[derive(Error, Debug)]
pub enum PreprocessError {
    #[error("Provided image is invalid, unable to decode.")]
    Decode(#[source] Cause),

    #[error("Failed to resize provided binary image from: {from:?} to: {to:?}.")]
    Resize {
        from: Vec<usize>,
        to: (u32, u32),
        #[source]
        source: Cause,
    },

    #[error("Failed to preprocess binary image, check if provided parameters are correct.")]
    Preprocess(#[source] Cause),
}

impl PreprocessError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PreprocessError::Decode(_) => ErrorKind::Decode,
            PreprocessError::Resize { .. } => ErrorKind::Resize,
            PreprocessError::Preprocess(_) => ErrorKind::Preprocess,
        }
    }

    pub fn cause(&self) -> &Cause {
        match self {
            PreprocessError::Decode(cause) => cause,
            PreprocessError::Resize { source, .. } => source,
            PreprocessError::Preprocess(cause) => cause,
        }
    }
}

// Only the stage is compared: the wrapped `image::ImageError` and
// `ndarray::ShapeError` are not comparable.
impl PartialEq for PreprocessError {
    fn eq(&self, other: &Self) -> bool {
        self.kind() == other.kind()
    }
}

/// A centralized result type for the pipeline.
pub type Result<T> = std::result::Result<T, PreprocessError>;
