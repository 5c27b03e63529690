//! Shared error type and result alias for the conversion pipeline.

pub mod error;

pub use error::{ConversionError, Result};
