use crate::image_pipeline::caps::{Caps, StreamKind};

/// Smallest multiple of four not below `width`.
pub fn round_up_4(width: usize) -> usize {
    (width + 3) & !3
}

/// Bytes per frame for the first structure of `caps`.
///
/// `None` unless width and height are both present and fixed. Samples are
/// one byte; Bayer rows are padded to a multiple of four.
pub fn unit_size(caps: &Caps) -> Option<usize> {
    let structure = caps.first()?;
    let width = structure.fixed_width()? as usize;
    let height = structure.fixed_height()? as usize;
    Some(match structure.kind {
        StreamKind::Bayer => round_up_4(width) * height,
        StreamKind::Raw => width * height,
    })
}
