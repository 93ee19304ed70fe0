#![deny(unsafe_code)]
//! CLI binary for palette-swap.
//!
//! Subcommands:
//! - `colors <input>`: print the distinct colors of an indexed-color image
//! - `generate <input>`: build a palette from the image, run a generator, print it
//! - `apply <input>`: recolor the image with an explicit hex palette, optionally
//!   pairing it with an explicit original palette instead of the image's colors

mod error;

use clap::{Parser, Subcommand, ValueEnum};
use error::CliError;
use image::RgbaImage;
use palette_swap_core::color::oklch_percent;
use palette_swap_core::{parse_hex_list, Palette, PaletteSettings, Xorshift64};
use palette_swap_pattern::{apply_pattern_rgba, io, palette_from_image_rgba};
use std::path::{Path, PathBuf};
use std::process;
use std::time::{Instant, SystemTime, UNIX_EPOCH};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "palette-swap", about = "OKLCh palette generator for indexed-color images")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the distinct colors of an image as a hex list.
    Colors {
        /// Input image path.
        input: PathBuf,
    },
    /// Generate a new palette for an image and optionally write the result.
    Generate {
        /// Input image path.
        input: PathBuf,

        /// Generation strategy.
        #[arg(short, long, value_enum, default_value_t = Mode::Segment)]
        mode: Mode,

        /// Rotate every hue by 180 degrees after generating.
        #[arg(long)]
        invert: bool,

        /// PRNG seed for deterministic output (defaults to the clock).
        #[arg(long)]
        seed: Option<u64>,

        /// Palette settings JSON file.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Write the recolored image here.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Recolor an image with an explicit palette.
    Apply {
        /// Input image path.
        input: PathBuf,

        /// New colors as "[#RRGGBB,...]", one per distinct image color, darkest first.
        #[arg(short, long)]
        palette: String,

        /// Output file path.
        #[arg(short, long)]
        output: PathBuf,

        /// Original colors as "[#RRGGBB,...]". Defaults to the image's
        /// distinct colors; every pixel must match one of them.
        #[arg(long)]
        original: Option<String>,

        /// Palette settings JSON file.
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
enum Mode {
    /// Contiguous hue blocks over a lightness ramp.
    Segment,
    /// Hue anchors blended in OKLab.
    Interpolated,
    /// Each block sweeps its share of the hue circle.
    Spread,
    /// Independent random L, C, H per color.
    Random,
}

impl Mode {
    fn name(self) -> &'static str {
        match self {
            Mode::Segment => "segment",
            Mode::Interpolated => "interpolated",
            Mode::Spread => "spread",
            Mode::Random => "random",
        }
    }

    fn apply(self, palette: &mut Palette, rng: &mut Xorshift64) {
        match self {
            Mode::Segment => palette.generate(rng),
            Mode::Interpolated => palette.generate_interpolated(rng),
            Mode::Spread => palette.generate_spread(rng),
            Mode::Random => palette.random_all(rng),
        }
    }
}

fn load_settings(config: Option<&Path>) -> Result<PaletteSettings, CliError> {
    match config {
        None => Ok(PaletteSettings::default()),
        Some(path) => PaletteSettings::load(path).map_err(CliError::input("--config")),
    }
}

/// Loads an image and builds a palette from `original`, or from the
/// image's distinct colors when no list is given.
fn load_palette(
    input: &Path,
    settings: &PaletteSettings,
    original: Option<&str>,
) -> Result<(RgbaImage, Palette), CliError> {
    let image = io::load_rgba(input)?;
    let colors = match original {
        Some(list) => parse_hex_list(list).map_err(CliError::input("--original"))?,
        None => palette_from_image_rgba(&image),
    };
    tracing::info!(
        width = image.width(),
        height = image.height(),
        colors = colors.len(),
        "Loaded image"
    );
    let palette = Palette::from_settings(colors, settings)?;
    Ok((image, palette))
}

fn write_recolored(image: &RgbaImage, palette: &Palette, output: &Path) -> Result<(), CliError> {
    let start = Instant::now();
    let recolored = apply_pattern_rgba(image, palette.original(), palette.colors())?;
    tracing::info!(
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Remapped image"
    );
    io::save_rgba(&recolored, output)?;
    Ok(())
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Colors { input } => {
            let (_, palette) = load_palette(&input, &PaletteSettings::default(), None)?;
            let hex_list = palette.to_hex_list();
            if cli.json {
                let mut colors = Vec::with_capacity(palette.len());
                for (i, c) in palette.colors().iter().enumerate() {
                    colors.push(serde_json::json!({
                        "hex": palette.hex(i)?,
                        "l": c.l,
                        "c": c.c,
                        "h": c.h,
                    }));
                }
                let info = serde_json::json!({
                    "count": palette.len(),
                    "palette": hex_list,
                    "colors": colors,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("{hex_list}");
                for (i, &c) in palette.colors().iter().enumerate() {
                    let [l, ch, h] = oklch_percent(c);
                    println!("  {}  L {l:5.1}%  C {ch:5.1}%  H {h:5.1}%", palette.hex(i)?);
                }
            }
        }
        Command::Generate {
            input,
            mode,
            invert,
            seed,
            config,
            output,
        } => {
            let settings = load_settings(config.as_deref())?;
            let (image, mut palette) = load_palette(&input, &settings, None)?;

            let seed = seed.unwrap_or_else(clock_seed);
            tracing::info!(mode = mode.name(), seed, "Generating palette");
            let mut rng = Xorshift64::new(seed);
            mode.apply(&mut palette, &mut rng);
            if invert {
                palette.invert();
            }

            if let Some(output) = &output {
                write_recolored(&image, &palette, output)?;
            }

            let hex_list = palette.to_hex_list();
            if cli.json {
                let info = serde_json::json!({
                    "mode": mode.name(),
                    "seed": seed,
                    "invert": invert,
                    "palette": hex_list,
                    "output": output.as_ref().map(|p| p.display().to_string()),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("{hex_list}");
                if let Some(output) = &output {
                    eprintln!(
                        "generated {} palette (seed {seed}) -> {}",
                        mode.name(),
                        output.display()
                    );
                }
            }
        }
        Command::Apply {
            input,
            palette: hex_list,
            output,
            original,
            config,
        } => {
            let settings = load_settings(config.as_deref())?;
            let (image, mut palette) = load_palette(&input, &settings, original.as_deref())?;
            palette
                .set_hex_list(&hex_list)
                .map_err(CliError::input("--palette"))?;

            write_recolored(&image, &palette, &output)?;

            if cli.json {
                let info = serde_json::json!({
                    "palette": palette.to_hex_list(),
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!("applied {} -> {}", palette.to_hex_list(), output.display());
            }
        }
    }

    Ok(())
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time(),
        )
        .init();

    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            eprintln!("{}", serde_json::to_string_pretty(&e.to_json()).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
