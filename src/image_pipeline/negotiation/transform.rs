use crate::image_pipeline::buffer::FrameBuffer;
use crate::image_pipeline::caps::{Caps, StreamCaps};
use crate::image_pipeline::common::error::Result;

use super::NegotiatedFormat;

/// Which side of the element the caps passed to `propose_caps` describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapsDirection {
    /// Caps of the raw (gray) input; the answer describes the Bayer output.
    FromInput,
    /// Caps of the Bayer output; the answer describes the raw input.
    FromOutput,
}

/// Outcome of a frame copy that did not hit a hard error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyStatus {
    Copied,
    /// A buffer could not be mapped; the frame should be dropped and the
    /// stream kept running.
    MapFailed,
}

/// The contract between the element and the pipeline driving it.
///
/// Calls arrive in the order `propose_caps`, `unit_size`, `lock_format`,
/// then `copy_frame` once per frame, all from one thread.
pub trait FormatTransform {
    fn propose_caps(&self, direction: CapsDirection, caps: &Caps, filter: Option<&Caps>) -> Caps;

    fn unit_size(&self, caps: &Caps) -> Option<usize>;

    fn lock_format(&mut self, incaps: &StreamCaps, outcaps: &StreamCaps) -> Result<&NegotiatedFormat>;

    fn copy_frame(&self, input: &dyn FrameBuffer, output: &mut dyn FrameBuffer) -> Result<CopyStatus>;
}
