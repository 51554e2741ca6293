//! Error types for interception and conversion.

use thiserror::Error;

/// Everything that can stop an event or a single item from being converted.
///
/// None of these ever reach the host page: the interceptor and the item
/// pipelines log them at their boundary and drop the affected unit.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Clipboard data is missing from paste event")]
    MissingClipboardData,
    #[error("Item collection unavailable: {0}")]
    ItemsUnavailable(String),
    #[error("Item has no file payload")]
    FileUnavailable,
    #[error("Failed to read file: {0}")]
    Read(String),
    #[error("Failed to decode WebP image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("Decoded image is empty")]
    EmptyImage,
    #[error("Failed to encode PNG: {0}")]
    Encode(String),
    #[error("No element to dispatch the converted event to")]
    NoDispatchTarget,
    #[error("Failed to dispatch event: {0}")]
    Dispatch(String),
    #[error("Clipboard write failed: {0}")]
    Clipboard(String),
}

impl From<png::EncodingError> for ConvertError {
    fn from(err: png::EncodingError) -> Self {
        ConvertError::Encode(err.to_string())
    }
}

/// Result type for conversion operations.
pub type ConvertResult<T> = Result<T, ConvertError>;
