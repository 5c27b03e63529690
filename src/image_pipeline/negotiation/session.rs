use tracing::{debug, instrument, trace, warn};

use crate::image_pipeline::buffer::FrameBuffer;
use crate::image_pipeline::caps::{Caps, CfaOrder, StreamCaps, StreamDescription, StreamKind, GRAY8};
use crate::image_pipeline::common::error::{ConversionError, Result};

use super::sizing;
use super::templates::{ElementMetadata, METADATA};
use super::transform::{CapsDirection, CopyStatus, FormatTransform};

/// Both sides of the element once caps are locked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NegotiatedFormat {
    input: StreamDescription,
    output: StreamDescription,
    cfa_order: CfaOrder,
}

impl NegotiatedFormat {
    pub fn input(&self) -> &StreamDescription {
        &self.input
    }

    pub fn output(&self) -> &StreamDescription {
        &self.output
    }

    /// Width taken from the output caps.
    pub fn width(&self) -> u32 {
        self.output.width()
    }

    pub fn height(&self) -> u32 {
        self.output.height()
    }

    pub fn cfa_order(&self) -> CfaOrder {
        self.cfa_order
    }

    pub fn input_unit_size(&self) -> usize {
        self.input.unit_size()
    }

    pub fn output_unit_size(&self) -> usize {
        self.output.unit_size()
    }

    /// Bytes moved per frame: `width * height`, without row padding.
    pub fn copy_len(&self) -> usize {
        self.width() as usize * self.height() as usize
    }
}

/// One streaming session of the gray to Bayer element.
///
/// `Unnegotiated` until `lock_format` succeeds; `copy_frame` refuses to run
/// before that.
#[derive(Debug, Default)]
pub struct Gray2BayerSession {
    negotiated: Option<NegotiatedFormat>,
}

impl Gray2BayerSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn metadata() -> &'static ElementMetadata {
        &METADATA
    }

    pub fn is_negotiated(&self) -> bool {
        self.negotiated.is_some()
    }

    pub fn negotiated(&self) -> Option<&NegotiatedFormat> {
        self.negotiated.as_ref()
    }

    /// Forget the locked format, e.g. when the stream ends.
    pub fn reset(&mut self) {
        self.negotiated = None;
    }

    fn resolve(incaps: &StreamCaps, outcaps: &StreamCaps) -> Result<NegotiatedFormat> {
        if incaps.kind != StreamKind::Raw {
            return Err(ConversionError::UnsupportedFormat(format!(
                "input must be {} but is {}",
                StreamKind::Raw,
                incaps.kind
            )));
        }
        if let Some(format) = &incaps.format {
            if format.fixed().map(String::as_str) != Some(GRAY8) {
                return Err(ConversionError::UnsupportedFormat(format!(
                    "input format {format} is not {GRAY8}"
                )));
            }
        }
        let (in_width, in_height) = fixed_dimensions(incaps, "input")?;

        if outcaps.kind != StreamKind::Bayer {
            return Err(ConversionError::UnsupportedFormat(format!(
                "output must be {} but is {}",
                StreamKind::Bayer,
                outcaps.kind
            )));
        }
        let (width, height) = fixed_dimensions(outcaps, "output")?;
        let cfa_order: CfaOrder = outcaps
            .fixed_format()
            .ok_or_else(|| {
                ConversionError::UnsupportedFormat("output caps carry no fixed Bayer format".to_string())
            })?
            .parse()?;

        if (in_width, in_height) != (width, height) {
            warn!(
                in_width, in_height, width, height,
                "input and output dimensions differ, copying {}x{}", width, height
            );
        }

        let mut input = StreamDescription::raw(in_width, in_height)?;
        if let Some(rate) = incaps.fixed_framerate() {
            input = input.with_framerate(rate);
        }
        let mut output = StreamDescription::bayer(width, height, cfa_order)?;
        if let Some(rate) = outcaps.fixed_framerate() {
            output = output.with_framerate(rate);
        }

        Ok(NegotiatedFormat { input, output, cfa_order })
    }
}

fn fixed_dimensions(caps: &StreamCaps, side: &str) -> Result<(u32, u32)> {
    match (caps.fixed_width(), caps.fixed_height()) {
        (Some(width), Some(height)) if width > 0 && height > 0 => Ok((width, height)),
        _ => Err(ConversionError::UnsupportedFormat(format!(
            "{side} caps need a fixed positive width and height: {caps}"
        ))),
    }
}

impl FormatTransform for Gray2BayerSession {
    fn propose_caps(&self, direction: CapsDirection, caps: &Caps, filter: Option<&Caps>) -> Caps {
        let kind = match direction {
            CapsDirection::FromOutput => StreamKind::Raw,
            CapsDirection::FromInput => StreamKind::Bayer,
        };

        let transformed: Caps = caps
            .iter()
            .map(|structure| StreamCaps {
                kind,
                format: None,
                colorimetry: None,
                chroma_site: None,
                ..structure.clone()
            })
            .collect();

        let result = match filter {
            Some(filter) => filter.intersect_first(&transformed),
            None => transformed,
        };

        debug!(?direction, "transformed {} into {}", caps, result);
        result
    }

    fn unit_size(&self, caps: &Caps) -> Option<usize> {
        sizing::unit_size(caps)
    }

    #[instrument(level = "debug", skip_all, fields(incaps = %incaps, outcaps = %outcaps))]
    fn lock_format(&mut self, incaps: &StreamCaps, outcaps: &StreamCaps) -> Result<&NegotiatedFormat> {
        match Self::resolve(incaps, outcaps) {
            Ok(format) => {
                debug!(
                    width = format.width(),
                    height = format.height(),
                    cfa_order = %format.cfa_order(),
                    "format locked"
                );
                Ok(&*self.negotiated.insert(format))
            }
            Err(e) => {
                self.negotiated = None;
                Err(e)
            }
        }
    }

    fn copy_frame(&self, input: &dyn FrameBuffer, output: &mut dyn FrameBuffer) -> Result<CopyStatus> {
        let format = self.negotiated.as_ref().ok_or(ConversionError::NotNegotiated)?;
        let copy_len = format.copy_len();
        let frame_len = copy_len.max(format.input_unit_size());

        let Some(src) = input.map_readable().filter(|map| map.len() >= frame_len) else {
            warn!(len = input.len(), expected = frame_len, "Could not map buffer, skipping");
            return Ok(CopyStatus::MapFailed);
        };
        let Some(mut dest) = output.map_writable().filter(|map| map.len() >= copy_len) else {
            warn!(expected = copy_len, "Could not map buffer, skipping");
            return Ok(CopyStatus::MapFailed);
        };

        dest[..copy_len].copy_from_slice(&src[..copy_len]);
        trace!(bytes = copy_len, "frame copied");
        Ok(CopyStatus::Copied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_pipeline::buffer::HeapBuffer;
    use crate::image_pipeline::caps::{CapsValue, Framerate};
    use crate::image_pipeline::negotiation::{round_up_4, src_template};

    fn gray(width: u32, height: u32) -> StreamCaps {
        StreamCaps::sized(StreamKind::Raw, width, height).with_format_str(GRAY8)
    }

    fn bayer(width: u32, height: u32, format: &str) -> StreamCaps {
        StreamCaps::sized(StreamKind::Bayer, width, height).with_format_str(format)
    }

    fn negotiated(width: u32, height: u32) -> Gray2BayerSession {
        let mut session = Gray2BayerSession::new();
        session
            .lock_format(&gray(width, height), &bayer(width, height, "rggb"))
            .unwrap();
        session
    }

    #[test]
    fn metadata_names_the_element() {
        let metadata = Gray2BayerSession::metadata();
        assert_eq!(metadata.name, "gray2bayer");
        assert_eq!(metadata.classification, "Filter/Converter/Video");
    }

    #[test]
    fn propose_from_output_drops_bayer_fields() {
        let session = Gray2BayerSession::new();
        let caps = Caps::from(
            bayer(640, 480, "bggr")
                .with_colorimetry("bt601")
                .with_chroma_site("jpeg"),
        );

        let proposed = session.propose_caps(CapsDirection::FromOutput, &caps, None);
        assert_eq!(proposed, Caps::from(StreamCaps::sized(StreamKind::Raw, 640, 480)));
        let raw = proposed.first().unwrap();
        assert!(raw.format.is_none());
        assert!(raw.colorimetry.is_none());
        assert!(raw.chroma_site.is_none());
    }

    #[test]
    fn propose_from_input_leaves_format_open() {
        let session = Gray2BayerSession::new();
        let caps = Caps::from(gray(640, 480).with_colorimetry("bt601"));

        let proposed = session.propose_caps(CapsDirection::FromInput, &caps, None);
        assert_eq!(proposed, Caps::from(StreamCaps::sized(StreamKind::Bayer, 640, 480)));
    }

    #[test]
    fn propose_keeps_framerate() {
        let session = Gray2BayerSession::new();
        let rate = CapsValue::Fixed(Framerate::new(30, 1).unwrap());
        let caps = Caps::from(gray(8, 8).with_framerate(rate.clone()));

        let proposed = session.propose_caps(CapsDirection::FromInput, &caps, None);
        assert_eq!(proposed.first().unwrap().framerate, Some(rate));
    }

    #[test]
    fn propose_intersects_with_filter_in_filter_order() {
        let session = Gray2BayerSession::new();
        let caps = Caps::from(gray(640, 480));
        let filter: Caps = [bayer(640, 480, "grbg"), bayer(640, 480, "bggr"), bayer(320, 240, "rggb")]
            .into_iter()
            .collect();

        let proposed = session.propose_caps(CapsDirection::FromInput, &caps, Some(&filter));
        let formats: Vec<_> = proposed.iter().map(|s| s.fixed_format().unwrap()).collect();
        assert_eq!(formats, ["grbg", "bggr"]);

        let open = session.propose_caps(CapsDirection::FromInput, &caps, Some(&Caps::from(src_template())));
        assert_eq!(open.len(), 1);
        assert_eq!(open.first().unwrap().format, src_template().format);
        assert_eq!(open.first().unwrap().fixed_width(), Some(640));
    }

    #[test]
    fn propose_empty_yields_empty() {
        let session = Gray2BayerSession::new();
        let empty = Caps::new_empty();
        assert!(session.propose_caps(CapsDirection::FromInput, &empty, None).is_empty());
        assert!(session
            .propose_caps(CapsDirection::FromOutput, &empty, Some(&Caps::from(src_template())))
            .is_empty());
    }

    #[test]
    fn lock_accepts_the_four_tags() {
        for order in CfaOrder::ALL {
            let mut session = Gray2BayerSession::new();
            let format = session
                .lock_format(&gray(641, 3), &bayer(641, 3, order.as_str()))
                .unwrap();
            assert_eq!(format.cfa_order(), order);
            assert_eq!(format.input_unit_size(), 641 * 3);
            assert_eq!(format.output_unit_size(), round_up_4(641) * 3);
            assert!(session.is_negotiated());
        }
    }

    #[test]
    fn lock_rejects_unknown_tags() {
        for tag in ["BGGR", "rgbg", "", "rggb "] {
            let mut session = Gray2BayerSession::new();
            let err = session.lock_format(&gray(4, 4), &bayer(4, 4, tag)).unwrap_err();
            assert!(matches!(err, ConversionError::UnsupportedFormat(_)), "{tag:?}");
            assert!(!session.is_negotiated());
        }
    }

    #[test]
    fn lock_requires_fixed_positive_dimensions() {
        let mut session = Gray2BayerSession::new();
        let no_format = StreamCaps::sized(StreamKind::Bayer, 4, 4);
        let no_height = StreamCaps::new(StreamKind::Bayer)
            .with_width(CapsValue::Fixed(4))
            .with_format_str("bggr");
        let ranged = bayer(4, 4, "bggr").with_width(CapsValue::range(1, 8));
        let list_format = StreamCaps::sized(StreamKind::Bayer, 4, 4)
            .with_format(CapsValue::list(["bggr", "rggb"].map(String::from)));

        for outcaps in [no_format, no_height, ranged, bayer(0, 4, "bggr"), list_format] {
            let err = session.lock_format(&gray(4, 4), &outcaps).unwrap_err();
            assert!(matches!(err, ConversionError::UnsupportedFormat(_)), "{outcaps}");
        }
    }

    #[test]
    fn lock_rejects_non_gray_input() {
        let mut session = Gray2BayerSession::new();
        let rgb = StreamCaps::sized(StreamKind::Raw, 4, 4).with_format_str("RGB");
        assert!(session.lock_format(&rgb, &bayer(4, 4, "bggr")).is_err());
        assert!(session.lock_format(&bayer(4, 4, "bggr"), &bayer(4, 4, "bggr")).is_err());

        let unformatted = StreamCaps::sized(StreamKind::Raw, 4, 4);
        assert!(session.lock_format(&unformatted, &bayer(4, 4, "bggr")).is_ok());
    }

    #[test]
    fn failed_renegotiation_clears_state() {
        let mut session = negotiated(4, 4);
        assert!(session.lock_format(&gray(4, 4), &bayer(4, 4, "RGGB")).is_err());
        assert!(session.negotiated().is_none());

        let input = HeapBuffer::new(16);
        let mut output = HeapBuffer::new(16);
        assert!(matches!(
            session.copy_frame(&input, &mut output),
            Err(ConversionError::NotNegotiated)
        ));
    }

    #[test]
    fn renegotiation_replaces_format() {
        let mut session = negotiated(4, 4);
        session.lock_format(&gray(8, 2), &bayer(8, 2, "gbrg")).unwrap();
        let format = session.negotiated().unwrap();
        assert_eq!((format.width(), format.height()), (8, 2));
        assert_eq!(format.cfa_order(), CfaOrder::Gbrg);
    }

    #[test]
    fn framerate_passes_through_lock() {
        let mut session = Gray2BayerSession::new();
        let rate = Framerate::new(15, 1).unwrap();
        let incaps = gray(2, 2).with_framerate(CapsValue::Fixed(rate));
        let outcaps = bayer(2, 2, "bggr").with_framerate(CapsValue::Fixed(rate));
        let format = session.lock_format(&incaps, &outcaps).unwrap();
        assert_eq!(format.input().framerate(), Some(rate));
        assert_eq!(format.output().framerate(), Some(rate));
    }

    #[test]
    fn copy_before_lock_is_a_state_error() {
        let session = Gray2BayerSession::new();
        let input = HeapBuffer::from_vec(vec![1, 2, 3, 4]);
        let mut output = HeapBuffer::new(4);
        let err = session.copy_frame(&input, &mut output).unwrap_err();
        assert!(matches!(err, ConversionError::NotNegotiated));
        assert_eq!(output.as_slice(), &[0, 0, 0, 0]);
    }

    #[test]
    fn single_pixel_end_to_end() {
        let session = negotiated(1, 1);
        let format = session.negotiated().unwrap();
        assert_eq!(format.output_unit_size(), 4);

        let input = HeapBuffer::from_vec(vec![0x7F]);
        let mut output = HeapBuffer::new(format.output_unit_size());
        assert_eq!(session.copy_frame(&input, &mut output).unwrap(), CopyStatus::Copied);
        assert_eq!(output.as_slice(), &[0x7F, 0, 0, 0]);
    }

    #[test]
    fn copy_leaves_padding_untouched() {
        let session = negotiated(5, 2);
        let input = HeapBuffer::from_vec((0..10).collect());
        let mut output = HeapBuffer::from_vec(vec![0xEE; round_up_4(5) * 2]);

        assert_eq!(session.copy_frame(&input, &mut output).unwrap(), CopyStatus::Copied);
        let out = output.as_slice();
        assert_eq!(&out[..10], &(0..10).collect::<Vec<u8>>()[..]);
        assert!(out[10..].iter().all(|&b| b == 0xEE));
    }

    #[test]
    fn unmappable_output_skips_frame() {
        let session = negotiated(2, 2);
        let input = HeapBuffer::from_vec(vec![9; 4]);
        let mut output = HeapBuffer::read_only(vec![0; 8]);

        assert_eq!(session.copy_frame(&input, &mut output).unwrap(), CopyStatus::MapFailed);
        assert_eq!(input.outstanding_maps(), 0);
        assert_eq!(output.outstanding_maps(), 0);
        assert_eq!(output.as_slice(), &[0; 8]);
        assert!(session.is_negotiated());

        let mut writable = HeapBuffer::new(8);
        assert_eq!(session.copy_frame(&input, &mut writable).unwrap(), CopyStatus::Copied);
    }

    #[test]
    fn short_buffers_are_not_mapped() {
        let session = negotiated(4, 4);
        let short_input = HeapBuffer::from_vec(vec![1; 15]);
        let mut output = HeapBuffer::new(16);
        assert_eq!(session.copy_frame(&short_input, &mut output).unwrap(), CopyStatus::MapFailed);
        assert_eq!(short_input.outstanding_maps(), 0);

        let input = HeapBuffer::from_vec(vec![1; 16]);
        let mut short_output = HeapBuffer::new(15);
        assert_eq!(session.copy_frame(&input, &mut short_output).unwrap(), CopyStatus::MapFailed);
        assert_eq!(input.outstanding_maps(), 0);
        assert_eq!(short_output.outstanding_maps(), 0);
    }
}
