use anyhow::{Context, bail};
use clap::{Parser, Subcommand, ValueEnum};
use image::ImageFormat;
use pixelprep::{DType, PixelArray, PreprocessConfig, image_handler, preprocess_binary_image};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum DTypeArg {
    U8,
    U16,
    F32,
}

impl From<DTypeArg> for DType {
    fn from(arg: DTypeArg) -> Self {
        match arg {
            DTypeArg::U8 => DType::U8,
            DTypeArg::U16 => DType::U16,
            DTypeArg::F32 => DType::F32,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Decode and preprocess an image, printing the resulting array shape
    Preprocess {
        #[arg(short, long)]
        input: PathBuf,
        /// Number of channels to decode into (0 keeps the file's own)
        #[arg(short, long)]
        channels: Option<u8>,
        /// Crop or pad to this height (requires --width)
        #[arg(long, requires = "width")]
        height: Option<u32>,
        /// Crop or pad to this width (requires --height)
        #[arg(long, requires = "height")]
        width: Option<u32>,
        /// Keep (height, width, channels) layout
        #[arg(long)]
        channels_last: bool,
        #[arg(long, value_enum, default_value_t = DTypeArg::U8)]
        dtype: DTypeArg,
        #[arg(short, long)]
        scale: Option<f32>,
        #[arg(long)]
        standardize: bool,
        /// Reverse channel order (RGB to BGR)
        #[arg(long)]
        reverse_channels: bool,
        /// Write the result as PNG (channels-last u8 output only)
        #[arg(long)]
        preview: Option<PathBuf>,
    },
    /// Print format, size and channel count of an image
    Inspect {
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Preprocess {
            input,
            channels,
            height,
            width,
            channels_last,
            dtype,
            scale,
            standardize,
            reverse_channels,
            preview,
        } => {
            let bytes = std::fs::read(&input)
                .with_context(|| format!("Failed to read {}", input.display()))?;

            let config = PreprocessConfig {
                channels,
                target_size: height.zip(width),
                channels_first: !channels_last,
                dtype: dtype.into(),
                scale,
                standardization: standardize,
                reverse_input_channels: reverse_channels,
            };
            let array = preprocess_binary_image(&bytes, &config)?;
            println!("{:?} {:?}", array.shape(), array.dtype());

            if let Some(path) = preview {
                write_preview(&array, &config, &path)?;
                println!("Preview written to {}", path.display());
            }
        }

        Commands::Inspect { input } => {
            let bytes = std::fs::read(&input)
                .with_context(|| format!("Failed to read {}", input.display()))?;
            let info = image_handler::inspect(&bytes)?;
            println!(
                "{:?} {}x{} with {} channel(s)",
                info.format, info.width, info.height, info.channels
            );
        }
    }

    Ok(())
}

fn write_preview(array: &PixelArray, config: &PreprocessConfig, path: &Path) -> anyhow::Result<()> {
    if config.channels_first {
        bail!("Preview needs channels-last output, pass --channels-last");
    }
    let Some(pixels) = array.as_u8() else {
        bail!("Preview needs u8 output, got {:?}", array.dtype());
    };

    let image = image_handler::array_to_image(pixels)?;
    let png = image_handler::save_image_to_bytes(&image, ImageFormat::Png)?;
    std::fs::write(path, png).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
