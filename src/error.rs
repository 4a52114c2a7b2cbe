use thiserror::Error;

/// Errors that can occur while turning an uploaded or dropped file into a surface image
#[derive(Debug, Error)]
pub enum ImageLoadError {
    #[error("No image data was read")]
    Empty,

    #[error("Failed to read image file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}

/// Result type for image loading
pub type ImageLoadResult<T> = Result<T, ImageLoadError>;
