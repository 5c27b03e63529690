use crate::image_pipeline::caps::{CapsValue, CfaOrder, Framerate, StreamCaps, StreamKind, DIMENSION_MAX, GRAY8};

/// Registration details of the element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementMetadata {
    pub name: &'static str,
    pub long_name: &'static str,
    pub classification: &'static str,
    pub description: &'static str,
}

pub const METADATA: ElementMetadata = ElementMetadata {
    name: "gray2bayer",
    long_name: "GRAY to Bayer converter",
    classification: "Filter/Converter/Video",
    description: "Converts video/x-raw to video/x-bayer",
};

fn with_any_geometry(caps: StreamCaps) -> StreamCaps {
    caps.with_width(CapsValue::range(1, DIMENSION_MAX))
        .with_height(CapsValue::range(1, DIMENSION_MAX))
        .with_framerate(CapsValue::range(Framerate::VARIABLE, Framerate::MAX))
}

/// Everything the input side accepts: GRAY8 of any size and rate.
pub fn sink_template() -> StreamCaps {
    with_any_geometry(StreamCaps::new(StreamKind::Raw).with_format_str(GRAY8))
}

/// Everything the output side can produce: any of the four CFA orders.
pub fn src_template() -> StreamCaps {
    let formats = CfaOrder::ALL.map(|order| order.as_str().to_string());
    with_any_geometry(StreamCaps::new(StreamKind::Bayer).with_format(CapsValue::list(formats)))
}
