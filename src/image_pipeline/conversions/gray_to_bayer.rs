use tracing::{debug, info, instrument, warn};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::image_pipeline::{
    buffer::{FrameBuffer, HeapBuffer},
    caps::{Caps, CapsValue, StreamCaps, StreamKind, GRAY8},
    common::error::{ConversionError, Result},
    conversions::types::{ConversionConfig, ConversionReport},
    io::{FrameReader, FrameWriter, RawFrameReader, RawFrameWriter},
    negotiation::{
        CapsDirection, CopyStatus, FormatTransform, Gray2BayerSession, NegotiatedFormat,
        sink_template,
    },
};

pub struct GrayToBayerPipeline {
    config: ConversionConfig,
}

impl GrayToBayerPipeline {
    pub fn new(config: ConversionConfig) -> Self {
        Self { config }
    }

    fn validate_dimensions(&self) -> Result<()> {
        if !self.config.validate_dimensions {
            return Ok(());
        }

        let (width, height) = (self.config.width, self.config.height);
        if width == 0 || height == 0 {
            return Err(ConversionError::InvalidDimensions(width as usize, height as usize));
        }

        if let Some(max) = self.config.max_dimension {
            if width > max || height > max {
                warn!(
                    "Frame dimensions {}x{} exceed maximum {}",
                    width, height, max
                );
                return Err(ConversionError::InvalidDimensions(width as usize, height as usize));
            }
        }

        Ok(())
    }

    /// The fixed GRAY8 stream arriving from upstream.
    fn upstream_caps(&self) -> StreamCaps {
        let caps = StreamCaps::sized(StreamKind::Raw, self.config.width, self.config.height)
            .with_format_str(GRAY8);
        match self.config.framerate {
            Some(rate) => caps.with_framerate(CapsValue::Fixed(rate)),
            None => caps,
        }
    }

    /// What downstream asks for: the configured CFA tag.
    fn downstream_caps(&self) -> StreamCaps {
        let caps = StreamCaps::new(StreamKind::Bayer).with_format_str(&self.config.format);
        match self.config.framerate {
            Some(rate) => caps.with_framerate(CapsValue::Fixed(rate)),
            None => caps,
        }
    }

    /// Runs the negotiation sequence on `session`: propose, size, lock.
    #[instrument(skip_all, fields(width = self.config.width, height = self.config.height, format = %self.config.format))]
    pub fn negotiate<T: FormatTransform>(&self, session: &mut T) -> Result<NegotiatedFormat> {
        self.validate_dimensions()?;

        let incaps = self.upstream_caps();
        let upstream = Caps::from(incaps.clone());
        if !Caps::from(sink_template()).can_intersect(&upstream) {
            return Err(ConversionError::UnsupportedFormat(format!(
                "input {upstream} is not accepted by the sink template"
            )));
        }

        let downstream = Caps::from(self.downstream_caps());
        let proposed = session.propose_caps(CapsDirection::FromInput, &upstream, Some(&downstream));
        let outcaps = proposed.fixate().ok_or_else(|| ConversionError::NoCommonFormat {
            upstream: upstream.to_string(),
            downstream: downstream.to_string(),
        })?;

        let in_size = session.unit_size(&upstream);
        let out_size = session.unit_size(&Caps::from(outcaps.clone()));
        debug!(?in_size, ?out_size, "unit sizes");
        if in_size.is_none() || out_size.is_none() {
            return Err(ConversionError::UnsupportedFormat(format!(
                "cannot size frames for {upstream} -> {outcaps}"
            )));
        }

        session.lock_format(&incaps, &outcaps).copied()
    }

    /// Negotiates a fresh session, then moves every frame from `reader` to `writer`.
    #[instrument(skip_all)]
    pub fn convert_frames(
        &self,
        reader: &mut dyn FrameReader,
        writer: &mut dyn FrameWriter,
    ) -> Result<ConversionReport> {
        info!("Starting GRAY8 to Bayer conversion");

        let mut session = Gray2BayerSession::new();
        let format = {
            let _span = tracing::info_span!("negotiate").entered();
            self.negotiate(&mut session)?
        };
        let mut report = ConversionReport::new(format);

        {
            let _span = tracing::info_span!("transform_frames",
                input_unit_size = format.input_unit_size(),
                output_unit_size = format.output_unit_size()
            ).entered();

            while let Some(input) = reader.read_frame(format.input_unit_size())? {
                report.frames_in += 1;
                let mut output = HeapBuffer::new(format.output_unit_size());

                match session.copy_frame(&input, &mut output)? {
                    CopyStatus::Copied => {
                        let frame = output.map_readable().ok_or_else(|| {
                            ConversionError::OutputWriteError("output frame could not be mapped".to_string())
                        })?;
                        writer.write_frame(&frame)?;
                        report.frames_out += 1;
                    }
                    CopyStatus::MapFailed => report.frames_dropped += 1,
                }
            }
        }

        writer.finish()?;
        session.reset();

        info!(
            frames_in = report.frames_in,
            frames_out = report.frames_out,
            frames_dropped = report.frames_dropped,
            cfa_order = %format.cfa_order(),
            "Conversion complete"
        );
        Ok(report)
    }

    pub fn convert<R: Read, W: Write>(&self, input: R, output: W) -> Result<ConversionReport> {
        let mut reader = RawFrameReader::new(input);
        let mut writer = RawFrameWriter::new(output);
        self.convert_frames(&mut reader, &mut writer)
    }

    #[instrument(skip(self, input_path, output_path))]
    pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
    ) -> Result<ConversionReport> {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        info!(
            input = %input_path.display(),
            output = %output_path.display(),
            "Converting file"
        );

        let input_file = {
            let _span = tracing::info_span!("open_input_file").entered();
            std::fs::File::open(input_path).map_err(|e| {
                ConversionError::InputReadError(format!("{}: {}", input_path.display(), e))
            })?
        };

        let output_file = {
            let _span = tracing::info_span!("create_output_file").entered();
            std::fs::File::create(output_path).map_err(|e| {
                ConversionError::OutputWriteError(format!("{}: {}", output_path.display(), e))
            })?
        };

        self.convert(BufReader::new(input_file), BufWriter::new(output_file))
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ConversionConfig) {
        self.config = config;
    }
}
