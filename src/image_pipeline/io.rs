//! Frame I/O module
//!
//! Readers and writers for headerless streams of fixed-size frames.

mod reader;
mod writer;
mod raw_frame_reader;
mod raw_frame_writer;

pub use reader::FrameReader;
pub use writer::FrameWriter;
pub use raw_frame_reader::RawFrameReader;
pub use raw_frame_writer::RawFrameWriter;
