use crate::image_pipeline::buffer::HeapBuffer;
use crate::image_pipeline::common::error::Result;

pub trait FrameReader {
    /// Next frame of `frame_size` bytes, or `None` once the stream is exhausted.
    fn read_frame(&mut self, frame_size: usize) -> Result<Option<HeapBuffer>>;
}
