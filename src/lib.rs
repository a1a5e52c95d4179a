//! Decode PNG, JPEG or BMP bytes into numeric arrays ready for model input.

pub mod array;
pub mod error;
pub mod image_handler;
pub mod preprocess;
pub mod utils;

pub use array::{DType, PixelArray};
pub use error::{Cause, ErrorKind, PreprocessError, Result};
pub use preprocess::{PreprocessConfig, preprocess_binary_image};
