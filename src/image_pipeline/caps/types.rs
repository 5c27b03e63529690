//! Scalar types carried by stream capabilities

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::image_pipeline::common::error::ConversionError;

/// Format name of the single-channel 8-bit raster accepted on the input side.
pub const GRAY8: &str = "GRAY8";

/// Largest width/height a template admits.
pub const DIMENSION_MAX: u32 = i32::MAX as u32;

/// Media type of a stream structure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamKind {
    /// Uncompressed raster (`video/x-raw`), here always GRAY8
    Raw,
    /// Raw sensor mosaic (`video/x-bayer`)
    Bayer,
}

impl StreamKind {
    pub fn media_type(self) -> &'static str {
        match self {
            StreamKind::Raw => "video/x-raw",
            StreamKind::Bayer => "video/x-bayer",
        }
    }
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.media_type())
    }
}

/// The 2x2 colour filter array ordering of a Bayer stream.
///
/// The letters name the top-left, top-right, bottom-left and bottom-right
/// sites of each 2x2 tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CfaOrder {
    Bggr,
    Gbrg,
    Grbg,
    Rggb,
}

impl CfaOrder {
    pub const ALL: [CfaOrder; 4] = [
        CfaOrder::Bggr,
        CfaOrder::Gbrg,
        CfaOrder::Grbg,
        CfaOrder::Rggb,
    ];

    /// The caps `format` tag for this ordering.
    pub fn as_str(self) -> &'static str {
        match self {
            CfaOrder::Bggr => "bggr",
            CfaOrder::Gbrg => "gbrg",
            CfaOrder::Grbg => "grbg",
            CfaOrder::Rggb => "rggb",
        }
    }

    /// Colour channel (0=R, 1=G, 2=B) sampled at pixel `(x, y)`.
    pub fn channel_at(self, x: usize, y: usize) -> usize {
        match (self, x % 2, y % 2) {
            (CfaOrder::Rggb, 0, 0) | (CfaOrder::Bggr, 1, 1) => 0,
            (CfaOrder::Rggb, 1, 1) | (CfaOrder::Bggr, 0, 0) => 2,
            (CfaOrder::Grbg, 1, 0) | (CfaOrder::Gbrg, 0, 1) => 0,
            (CfaOrder::Grbg, 0, 1) | (CfaOrder::Gbrg, 1, 0) => 2,
            _ => 1,
        }
    }
}

impl fmt::Display for CfaOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CfaOrder {
    type Err = ConversionError;

    /// Exact, case-sensitive match against the four caps tags.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CfaOrder::ALL
            .into_iter()
            .find(|order| order.as_str() == s)
            .ok_or_else(|| ConversionError::UnsupportedFormat(format!("unknown Bayer format '{s}'")))
    }
}

/// Frame rate as a fraction. `0/1` denotes a variable rate.
///
/// Equality and ordering compare the rational value, so `30/1 == 60/2`.
#[derive(Debug, Clone, Copy)]
pub struct Framerate {
    num: u32,
    den: u32,
}

impl Framerate {
    pub const VARIABLE: Framerate = Framerate { num: 0, den: 1 };
    pub const MAX: Framerate = Framerate { num: i32::MAX as u32, den: 1 };

    /// Returns `None` for a zero denominator.
    pub fn new(num: u32, den: u32) -> Option<Self> {
        (den != 0).then_some(Self { num, den })
    }

    pub fn num(&self) -> u32 {
        self.num
    }

    pub fn den(&self) -> u32 {
        self.den
    }
}

impl PartialEq for Framerate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Framerate {}

impl PartialOrd for Framerate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Framerate {
    fn cmp(&self, other: &Self) -> Ordering {
        let lhs = u64::from(self.num) * u64::from(other.den);
        let rhs = u64::from(other.num) * u64::from(self.den);
        lhs.cmp(&rhs)
    }
}

impl fmt::Display for Framerate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}
