//! Frame buffers and scoped mappings
//!
//! Buffers are owned by whoever drives the element; the copier only borrows
//! them through mappings that are released when dropped.

mod frame_buffer;
mod heap_buffer;

pub use frame_buffer::{FrameBuffer, MapTracker, ReadMapping, WriteMapping};
pub use heap_buffer::HeapBuffer;
