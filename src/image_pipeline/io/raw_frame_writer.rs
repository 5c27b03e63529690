use std::io::Write;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::io::writer::FrameWriter;

/// Writes frames back to back with no header.
pub struct RawFrameWriter<W: Write> {
    inner: W,
    frames_written: usize,
    bytes_written: usize,
}

impl<W: Write> RawFrameWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            frames_written: 0,
            bytes_written: 0,
        }
    }

    pub fn frames_written(&self) -> usize {
        self.frames_written
    }

    pub fn bytes_written(&self) -> usize {
        self.bytes_written
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> FrameWriter for RawFrameWriter<W> {
    fn write_frame(&mut self, frame: &[u8]) -> Result<()> {
        self.inner
            .write_all(frame)
            .map_err(|e| ConversionError::OutputWriteError(e.to_string()))?;
        self.frames_written += 1;
        self.bytes_written += frame.len();
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.inner.flush()?;
        Ok(())
    }
}
