//! Caps negotiation and the passthrough frame copier
//!
//! `Gray2BayerSession` implements `FormatTransform`, the four calls a host
//! pipeline makes on the element: propose caps, size buffers, lock the
//! format, then copy frames.

mod sizing;
mod templates;
mod transform;
mod session;

pub use sizing::{round_up_4, unit_size};
pub use templates::{ElementMetadata, METADATA, sink_template, src_template};
pub use transform::{CapsDirection, CopyStatus, FormatTransform};
pub use session::{Gray2BayerSession, NegotiatedFormat};
