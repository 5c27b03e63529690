//! Pipeline conversions module
//!
//! Drives a `Gray2BayerSession` the way a host pipeline would: negotiate,
//! allocate buffers, copy every frame, drop the ones that fail to map.

mod types;
mod gray_to_bayer;


pub use types::{ConversionConfig, ConversionConfigBuilder, ConversionReport};
pub use gray_to_bayer::GrayToBayerPipeline;
