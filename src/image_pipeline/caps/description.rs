use crate::image_pipeline::caps::structure::StreamCaps;
use crate::image_pipeline::caps::types::{CfaOrder, Framerate, StreamKind, GRAY8};
use crate::image_pipeline::caps::value::CapsValue;
use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::negotiation::round_up_4;

/// A fully resolved stream on one side of the element.
///
/// Only Bayer streams carry a CFA order; the variant encodes its presence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamDescription {
    Raw {
        width: u32,
        height: u32,
        framerate: Option<Framerate>,
    },
    Bayer {
        width: u32,
        height: u32,
        framerate: Option<Framerate>,
        cfa_order: CfaOrder,
    },
}

impl StreamDescription {
    pub fn raw(width: u32, height: u32) -> Result<Self> {
        check_dimensions(width, height)?;
        Ok(Self::Raw { width, height, framerate: None })
    }

    pub fn bayer(width: u32, height: u32, cfa_order: CfaOrder) -> Result<Self> {
        check_dimensions(width, height)?;
        Ok(Self::Bayer { width, height, framerate: None, cfa_order })
    }

    pub fn with_framerate(self, rate: Framerate) -> Self {
        match self {
            Self::Raw { width, height, .. } => Self::Raw { width, height, framerate: Some(rate) },
            Self::Bayer { width, height, cfa_order, .. } => Self::Bayer {
                width,
                height,
                framerate: Some(rate),
                cfa_order,
            },
        }
    }

    pub fn kind(&self) -> StreamKind {
        match self {
            Self::Raw { .. } => StreamKind::Raw,
            Self::Bayer { .. } => StreamKind::Bayer,
        }
    }

    pub fn width(&self) -> u32 {
        match *self {
            Self::Raw { width, .. } | Self::Bayer { width, .. } => width,
        }
    }

    pub fn height(&self) -> u32 {
        match *self {
            Self::Raw { height, .. } | Self::Bayer { height, .. } => height,
        }
    }

    pub fn framerate(&self) -> Option<Framerate> {
        match *self {
            Self::Raw { framerate, .. } | Self::Bayer { framerate, .. } => framerate,
        }
    }

    pub fn cfa_order(&self) -> Option<CfaOrder> {
        match *self {
            Self::Raw { .. } => None,
            Self::Bayer { cfa_order, .. } => Some(cfa_order),
        }
    }

    /// Bytes per frame. Bayer rows are padded to a multiple of four bytes.
    pub fn unit_size(&self) -> usize {
        let width = self.width() as usize;
        let height = self.height() as usize;
        match self {
            Self::Raw { .. } => width * height,
            Self::Bayer { .. } => round_up_4(width) * height,
        }
    }

    /// The fixed caps structure describing this stream.
    pub fn to_caps(&self) -> StreamCaps {
        let mut caps = StreamCaps::sized(self.kind(), self.width(), self.height());
        caps.format = Some(CapsValue::Fixed(match self.cfa_order() {
            Some(order) => order.as_str().to_string(),
            None => GRAY8.to_string(),
        }));
        caps.framerate = self.framerate().map(CapsValue::Fixed);
        caps
    }
}

fn check_dimensions(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(ConversionError::InvalidDimensions(width as usize, height as usize));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_dimensions_rejected() {
        assert!(matches!(
            StreamDescription::raw(0, 480),
            Err(ConversionError::InvalidDimensions(0, 480))
        ));
        assert!(StreamDescription::bayer(640, 0, CfaOrder::Rggb).is_err());
    }

    #[test]
    fn only_bayer_carries_cfa_order() {
        assert_eq!(StreamDescription::raw(4, 4).unwrap().cfa_order(), None);
        assert_eq!(
            StreamDescription::bayer(4, 4, CfaOrder::Gbrg).unwrap().cfa_order(),
            Some(CfaOrder::Gbrg)
        );
    }

    #[test]
    fn to_caps_round_trips_fields() {
        let rate = Framerate::new(25, 1).unwrap();
        let desc = StreamDescription::bayer(10, 3, CfaOrder::Grbg).unwrap().with_framerate(rate);
        let caps = desc.to_caps();
        assert!(caps.is_fixed());
        assert_eq!(caps.fixed_format(), Some("grbg"));
        assert_eq!(caps.fixed_framerate(), Some(rate));
        assert_eq!(desc.unit_size(), 12 * 3);

        let raw = StreamDescription::raw(10, 3).unwrap();
        assert_eq!(raw.to_caps().fixed_format(), Some(GRAY8));
        assert_eq!(raw.unit_size(), 30);
    }
}
