use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Parser;
use gray2bayer_rs::image_pipeline::{CfaOrder, round_up_4};

/// Prints per-channel statistics of the first frame of a raw Bayer file,
/// sampling each pixel under the colour the CFA order assigns to its site.
///
/// Frames written by gray2bayer are `round_up_4(WIDTH) * HEIGHT` bytes, but
/// the pixels are packed: row `y` starts at `y * WIDTH` and all padding sits
/// at the end of the frame.
#[derive(Parser, Debug)]
#[command(name = "inspect_bayer")]
struct Args {
    /// Bayer file produced by gray2bayer
    file: PathBuf,

    /// Frame width in pixels
    width: usize,

    /// Frame height in pixels
    height: usize,

    /// CFA order: bggr, gbrg, grbg or rggb
    format: CfaOrder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ChannelStats {
    sites: u64,
    sum: u64,
    min: u8,
    max: u8,
}

impl Default for ChannelStats {
    fn default() -> Self {
        Self { sites: 0, sum: 0, min: u8::MAX, max: u8::MIN }
    }
}

/// Red, green and blue statistics over the packed `width * height` pixels.
fn channel_stats(frame: &[u8], width: usize, height: usize, order: CfaOrder) -> [ChannelStats; 3] {
    let mut stats = [ChannelStats::default(); 3];

    for (y, row) in frame[..width * height].chunks_exact(width).enumerate() {
        for (x, &value) in row.iter().enumerate() {
            let s = &mut stats[order.channel_at(x, y)];
            s.sites += 1;
            s.sum += u64::from(value);
            s.min = s.min.min(value);
            s.max = s.max.max(value);
        }
    }

    stats
}

fn main() -> anyhow::Result<()> {
    let Args { file, width, height, format: order } = Args::parse();
    if width == 0 || height == 0 {
        bail!("invalid frame size {width}x{height}");
    }
    let frame_size = round_up_4(width) * height;

    let data = std::fs::read(&file).with_context(|| format!("reading {}", file.display()))?;
    if data.len() < frame_size {
        bail!(
            "{}: {} bytes, need {} for one {width}x{height} frame",
            file.display(),
            data.len(),
            frame_size
        );
    }

    println!(
        "Frame: {}x{} ({}), {} bytes with {} padding",
        width,
        height,
        order,
        frame_size,
        frame_size - width * height
    );

    let stats = channel_stats(&data[..frame_size], width, height, order);
    for (s, name) in stats.iter().zip(["Red", "Green", "Blue"]) {
        if s.sites == 0 {
            println!("\n{name} channel: no sites");
            continue;
        }
        println!("\n{name} channel:");
        println!("  Sites: {}", s.sites);
        println!("  Range: {} - {}", s.min, s.max);
        println!("  Mean: {:.2}", s.sum as f64 / s.sites as f64);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn odd_width_rows_are_read_packed() {
        // 5x2 rggb, packed: R G R G R / G B G B G, then 6 bytes of padding.
        let mut frame = vec![10, 20, 10, 20, 10, 20, 30, 20, 30, 20];
        frame.resize(round_up_4(5) * 2, 0xFF);

        let [red, green, blue] = channel_stats(&frame, 5, 2, CfaOrder::Rggb);

        assert_eq!((red.sites, red.min, red.max), (3, 10, 10));
        assert_eq!((green.sites, green.min, green.max), (5, 20, 20));
        assert_eq!((blue.sites, blue.min, blue.max), (2, 30, 30));
    }

    #[test]
    fn format_argument_is_a_cfa_order() {
        let args = Args::try_parse_from(["inspect_bayer", "f.bayer", "4", "2", "gbrg"]).unwrap();
        assert_eq!(args.format, CfaOrder::Gbrg);
        assert!(Args::try_parse_from(["inspect_bayer", "f.bayer", "4", "2", "RGGB"]).is_err());
    }
}
