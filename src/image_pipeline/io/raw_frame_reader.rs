//! Reader for raw frame files: fixed-size frames stored back to back with no
//! header, the layout of a plain sensor dump.

use std::io::Read;

use tracing::debug;
use crate::image_pipeline::buffer::HeapBuffer;
use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::io::reader::FrameReader;

pub struct RawFrameReader<R: Read> {
    inner: R,
    frames_read: usize,
}

impl<R: Read> RawFrameReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, frames_read: 0 }
    }

    pub fn frames_read(&self) -> usize {
        self.frames_read
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> FrameReader for RawFrameReader<R> {
    /// Fills a whole frame. A clean end of stream between frames yields
    /// `None`; running dry inside a frame is a `TruncatedFrame` error.
    fn read_frame(&mut self, frame_size: usize) -> Result<Option<HeapBuffer>> {
        // Grow with the bytes that arrive, never with frame_size up front.
        let mut data = Vec::new();
        self.inner
            .by_ref()
            .take(frame_size as u64)
            .read_to_end(&mut data)
            .map_err(|e| ConversionError::InputReadError(e.to_string()))?;
        let filled = data.len();

        if filled == 0 && frame_size > 0 {
            debug!(frames = self.frames_read, "End of input");
            return Ok(None);
        }
        if filled < frame_size {
            return Err(ConversionError::TruncatedFrame {
                expected: frame_size,
                actual: filled,
            });
        }

        self.frames_read += 1;
        Ok(Some(HeapBuffer::from_vec(data)))
    }
}
