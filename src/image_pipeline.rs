//! Gray to Bayer conversion pipeline
//!
//! This module provides caps negotiation between a GRAY8 raster stream and a
//! raw Bayer stream, the passthrough frame copier, and a driver that feeds
//! headerless raw frame files through a negotiated session.

pub mod caps;
pub mod buffer;
pub mod negotiation;
pub mod io;
pub mod conversions;
pub mod common;

pub use common::{
    ConversionError,
    Result,
};

pub use caps::{
    Caps,
    CapsValue,
    CfaOrder,
    Framerate,
    StreamCaps,
    StreamDescription,
    StreamKind,
};

pub use buffer::{
    FrameBuffer,
    HeapBuffer,
    ReadMapping,
    WriteMapping,
};

pub use negotiation::{
    CapsDirection,
    CopyStatus,
    ElementMetadata,
    FormatTransform,
    Gray2BayerSession,
    NegotiatedFormat,
    round_up_4,
};

pub use io::{
    FrameReader,
    FrameWriter,
    RawFrameReader,
    RawFrameWriter,
};

pub use conversions::{
    ConversionConfig,
    ConversionConfigBuilder,
    ConversionReport,
    GrayToBayerPipeline,
};
