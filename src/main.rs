use std::path::PathBuf;

use gray2bayer_rs::image_pipeline::{ConversionConfig, Gray2BayerSession, GrayToBayerPipeline};
use gray2bayer_rs::logger;

use clap::Parser;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "gray2bayer")]
#[command(about = "Relabel headerless GRAY8 frames as a Bayer stream")]
#[command(version)]
struct Cli {
    /// Headerless GRAY8 input, frames stored back to back
    #[arg(default_value = "input.gray")]
    input: PathBuf,

    /// Bayer output file
    #[arg(default_value = "output.bayer")]
    output: PathBuf,

    /// Frame width in pixels (640 when omitted, must come with HEIGHT)
    #[arg(requires = "height")]
    width: Option<u32>,

    /// Frame height in pixels (480 when omitted)
    height: Option<u32>,

    /// Bayer format: bggr, gbrg, grbg or rggb
    #[arg(default_value = "rggb")]
    format: String,

    /// Largest accepted width or height
    #[arg(long, default_value = "50000")]
    max_dimension: u32,
}

impl Cli {
    fn config(&self) -> ConversionConfig {
        let mut builder = ConversionConfig::builder()
            .format(self.format.as_str())
            .max_dimension(Some(self.max_dimension));
        if let Some((width, height)) = self.width.zip(self.height) {
            builder = builder.dimensions(width, height);
        }
        builder.build()
    }
}

fn main() -> anyhow::Result<()> {
    logger::init();

    let cli = Cli::parse();
    let pipeline = GrayToBayerPipeline::new(cli.config());

    info!("Starting {}...", Gray2BayerSession::metadata().long_name);
    info!(
        "Frame size: {}x{}, Bayer format: {}",
        pipeline.config().width,
        pipeline.config().height,
        pipeline.config().format
    );

    match pipeline.convert_file(&cli.input, &cli.output) {
        Ok(report) => info!(
            "Conversion successful: {} frames written, {} dropped",
            report.frames_out, report.frames_dropped
        ),
        Err(e) => {
            error!("Conversion failed: {}", e);
            return Err(e.into());
        }
    }

    Ok(())
}
