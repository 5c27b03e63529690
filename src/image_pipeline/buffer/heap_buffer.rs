use crate::image_pipeline::buffer::frame_buffer::{FrameBuffer, MapTracker, ReadMapping, WriteMapping};

/// Heap-backed frame buffer.
#[derive(Debug)]
pub struct HeapBuffer {
    data: Vec<u8>,
    writable: bool,
    maps: MapTracker,
}

impl HeapBuffer {
    /// Zero-filled writable buffer of `len` bytes.
    pub fn new(len: usize) -> Self {
        Self::from_vec(vec![0u8; len])
    }

    pub fn from_vec(data: Vec<u8>) -> Self {
        Self {
            data,
            writable: true,
            maps: MapTracker::default(),
        }
    }

    /// A buffer whose write mappings always fail.
    pub fn read_only(data: Vec<u8>) -> Self {
        Self {
            writable: false,
            ..Self::from_vec(data)
        }
    }

    pub fn is_writable(&self) -> bool {
        self.writable
    }

    /// Mappings not yet released.
    pub fn outstanding_maps(&self) -> usize {
        self.maps.outstanding()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }
}

impl FrameBuffer for HeapBuffer {
    fn len(&self) -> usize {
        self.data.len()
    }

    fn map_readable(&self) -> Option<ReadMapping<'_>> {
        Some(ReadMapping::new(&self.data, &self.maps))
    }

    fn map_writable(&mut self) -> Option<WriteMapping<'_>> {
        if !self.writable {
            return None;
        }
        Some(WriteMapping::new(&mut self.data, &self.maps))
    }
}
