use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("Failed to read input: {0}")]
    InputReadError(String),

    #[error("Failed to write output: {0}")]
    OutputWriteError(String),

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("No common format between {upstream} and {downstream}")]
    NoCommonFormat {
        upstream: String,
        downstream: String,
    },

    #[error("Frame transform requested before caps were negotiated")]
    NotNegotiated,

    #[error("Truncated frame: expected {expected} bytes, got {actual}")]
    TruncatedFrame {
        expected: usize,
        actual: usize,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConversionError>;
