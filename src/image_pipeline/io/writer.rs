use crate::image_pipeline::common::error::Result;

pub trait FrameWriter {
    fn write_frame(&mut self, frame: &[u8]) -> Result<()>;

    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}
