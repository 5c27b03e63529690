use std::cell::Cell;
use std::ops::{Deref, DerefMut};

/// A byte buffer that must be mapped before its contents can be touched.
///
/// Mapping may fail (read-only memory, a buffer torn down by its owner);
/// callers treat `None` as "skip this frame".
pub trait FrameBuffer {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn map_readable(&self) -> Option<ReadMapping<'_>>;

    fn map_writable(&mut self) -> Option<WriteMapping<'_>>;
}

/// Count of mappings currently held on a buffer.
#[derive(Debug, Default)]
pub struct MapTracker(Cell<usize>);

impl MapTracker {
    pub fn outstanding(&self) -> usize {
        self.0.get()
    }

    fn acquire(&self) {
        self.0.set(self.0.get() + 1);
    }

    fn release(&self) {
        self.0.set(self.0.get().saturating_sub(1));
    }
}

/// Read access to a buffer, released on drop.
pub struct ReadMapping<'a> {
    data: &'a [u8],
    tracker: &'a MapTracker,
}

impl<'a> ReadMapping<'a> {
    pub fn new(data: &'a [u8], tracker: &'a MapTracker) -> Self {
        tracker.acquire();
        Self { data, tracker }
    }
}

impl Deref for ReadMapping<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.data
    }
}

impl Drop for ReadMapping<'_> {
    fn drop(&mut self) {
        self.tracker.release();
    }
}

/// Write access to a buffer, released on drop.
pub struct WriteMapping<'a> {
    data: &'a mut [u8],
    tracker: &'a MapTracker,
}

impl<'a> WriteMapping<'a> {
    pub fn new(data: &'a mut [u8], tracker: &'a MapTracker) -> Self {
        tracker.acquire();
        Self { data, tracker }
    }
}

impl Deref for WriteMapping<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.data
    }
}

impl DerefMut for WriteMapping<'_> {
    fn deref_mut(&mut self) -> &mut [u8] {
        self.data
    }
}

impl Drop for WriteMapping<'_> {
    fn drop(&mut self) {
        self.tracker.release();
    }
}
