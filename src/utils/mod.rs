pub mod convert;
pub mod crop_or_pad;
pub mod standardize;
