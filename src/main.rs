use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use fovea::{FoveaConfig, Foveator, Frame, OptimizedImage, PolePolicy, ResampleFilter};
use tracing::info;

/// Foveated panorama transcoder:
/// - encode: keep full detail where the viewer looks, shrink the rest
/// - decode: rebuild a full-size frame from an encoded record
#[derive(Parser, Debug)]
#[command(name = "fovea")]
#[command(about = "Foveated transcoding for 360° equirectangular frames")]
#[command(long_about = "Encode a 360° equirectangular frame into a compact record that keeps full \
resolution only around the viewing direction, and decode such records back into full-size frames.")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log per-stage timings
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encode an image into a JSON record
    Encode {
        #[command(flatten)]
        view: ViewArgs,

        /// Output record path
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        policy: PolicyArgs,
    },
    /// Decode a JSON record into an image
    Decode {
        /// Record produced by `encode`
        record: PathBuf,

        /// Output image path (format from extension)
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        policy: PolicyArgs,
    },
    /// Encode then decode, printing compression statistics
    Roundtrip {
        #[command(flatten)]
        view: ViewArgs,

        /// Output image path (format from extension)
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        policy: PolicyArgs,
    },
    /// Print panel sizes and metadata of a record
    Inspect {
        record: PathBuf,
    },
}

#[derive(Args, Debug)]
struct ViewArgs {
    /// Source equirectangular image
    input: PathBuf,

    /// Viewing azimuth in degrees (any value, normalized to [0, 360))
    #[arg(short, long, allow_hyphen_values = true)]
    azimuth: i32,

    /// Viewing elevation in degrees, 0 at the top row and 180 at the bottom
    #[arg(short, long, allow_hyphen_values = true)]
    elevation: i32,
}

#[derive(Args, Debug)]
struct PolicyArgs {
    /// JSON config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Viewport width in degrees
    #[arg(long)]
    crop_angle: Option<u32>,

    /// Width of the full-resolution band in degrees
    #[arg(long)]
    h_focus: Option<u32>,

    /// Height of the full-resolution patch in degrees
    #[arg(long)]
    v_focus: Option<u32>,

    /// Linear shrink factor for the peripheral strips
    #[arg(long)]
    shrink: Option<u32>,

    /// What to do when the focus patch reaches a pole
    #[arg(long, value_enum)]
    pole_policy: Option<PolePolicy>,

    /// Resampling filter
    #[arg(long, value_enum)]
    filter: Option<ResampleFilter>,
}

impl PolicyArgs {
    fn resolve(&self) -> Result<FoveaConfig> {
        let mut config = match &self.config {
            Some(path) => FoveaConfig::from_json_file(path)?,
            None => FoveaConfig::default(),
        };
        if let Some(v) = self.crop_angle {
            config.crop_angle = v;
        }
        if let Some(v) = self.h_focus {
            config.h_focus_angle = v;
        }
        if let Some(v) = self.v_focus {
            config.v_focus_angle = v;
        }
        if let Some(v) = self.shrink {
            config.shrink_factor = v;
        }
        if let Some(v) = self.pole_policy {
            config.pole_policy = v;
        }
        if let Some(v) = self.filter {
            config.filter = v;
        }
        config.validate()?;
        Ok(config)
    }

    fn foveator(&self) -> Result<Foveator> {
        Ok(Foveator::try_new(self.resolve()?)?)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    fovea::logging::init(cli.verbose);

    match cli.command {
        Command::Encode {
            view,
            output,
            policy,
        } => {
            let foveator = policy.foveator()?;
            let source = load_source(&view)?;
            let record = encode(&foveator, &view, &source)?;
            record
                .save(&output)
                .with_context(|| format!("writing record {}", output.display()))?;
            info!(path = %output.display(), bytes = record.byte_size(), "record written");
        }
        Command::Decode {
            record,
            output,
            policy,
        } => {
            let foveator = policy.foveator()?;
            let rec = load_record(&record)?;
            let frame = foveator.extract_image(&rec)?;
            fovea::io::save_frame(&frame, &output)?;
            info!(path = %output.display(), size = %frame.size(), "frame written");
        }
        Command::Roundtrip {
            view,
            output,
            policy,
        } => {
            let foveator = policy.foveator()?;
            let source = load_source(&view)?;
            let record = encode(&foveator, &view, &source)?;
            let frame = foveator.extract_image(&record)?;
            fovea::io::save_frame(&frame, &output)?;
            print_stats(source.byte_len(), &record);
        }
        Command::Inspect { record } => {
            print_record(&load_record(&record)?);
        }
    }
    Ok(())
}

fn load_source(view: &ViewArgs) -> Result<Frame> {
    let frame = fovea::io::load_frame(&view.input)?;
    info!(input = %view.input.display(), size = %frame.size(), "frame loaded");
    Ok(frame)
}

fn encode(foveator: &Foveator, view: &ViewArgs, frame: &Frame) -> Result<OptimizedImage> {
    foveator
        .optimize_image(frame, view.azimuth, view.elevation)
        .with_context(|| format!("encoding {}", view.input.display()))
}

fn load_record(path: &Path) -> Result<OptimizedImage> {
    OptimizedImage::load(path).with_context(|| format!("reading record {}", path.display()))
}

fn print_stats(source_bytes: usize, record: &OptimizedImage) {
    let record_bytes = record.byte_size();
    let ratio = source_bytes as f64 / record_bytes.max(1) as f64;
    println!("📊 Compression");
    println!("Source frame:  {:>12} bytes", source_bytes);
    println!("Record panels: {:>12} bytes", record_bytes);
    println!(
        "Saved:         {:>11.1}%  ({:.1}x smaller)",
        (1.0 - record_bytes as f64 / source_bytes.max(1) as f64) * 100.0,
        ratio
    );
}

fn print_record(record: &OptimizedImage) {
    println!("Full frame:   {}", record.full_size());
    println!("Left buffer:  {}", record.left_buffer());
    println!("Crop width:   {}", record.crop_width());
    println!("Panel\t\tStored\t\tRestored");
    let restored = [
        record.focused().size(),
        record.orig_h_size(),
        record.orig_h_size(),
        record.orig_v_size(),
        record.orig_bottom_size(),
    ];
    for ((name, panel), orig) in record.panels().iter().zip(restored) {
        println!("{name:<14}\t{}\t\t{}", panel.size(), orig);
    }
    println!("Panel bytes:  {}", record.byte_size());
}
