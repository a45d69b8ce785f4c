use apod_colors::reference::{HUE_STEPS, TONE_STEPS};
use apod_colors::{
    analyze, decode_image, save_jpeg, ExtractOptions, PreviewLayout, ReferencePalette,
};
use chrono::{Datelike, Local};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use apodify::models::AppConfig;
use apodify::services::apod_client::{API_KEY_ENV, DEMO_KEY};
use apodify::services::{archive_year, run, ApodClient};

const DEFAULT_CONFIG: &str = "config.yml";

#[derive(Parser)]
#[command(name = "apodify")]
#[command(about = "Color palettes and previews for the Astronomy Picture of the Day")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Process the configured date range
    Run {
        /// Configuration file (defaults to $CONFIG_FILE or config.yml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Log debug output
        #[arg(short, long)]
        verbose: bool,
    },
    /// Extract the palette of a local image
    Analyze {
        /// Image file to analyze
        image: PathBuf,

        /// Write the palette preview to this JPEG file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Merge colors closer than this (0-100)
        #[arg(short, long, default_value_t = apod_colors::DEFAULT_TOLERANCE)]
        tolerance: u32,

        /// Maximum number of colors
        #[arg(short, long, default_value_t = apod_colors::DEFAULT_LIMIT)]
        limit: usize,

        /// Skip matching against the reference palette
        #[arg(long)]
        no_classify: bool,
    },
    /// Print the reference palette
    Palette {
        /// Write the palette chart to this PNG file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Store every raw APOD record of a year locally
    Archive {
        /// Year to archive (1995 or later)
        #[arg(short, long)]
        year: i32,

        /// Configuration file (defaults to $CONFIG_FILE or config.yml)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Run { config, verbose }) => {
            let filter = if verbose {
                "apodify=debug,apod_colors=debug"
            } else {
                "apodify=info,apod_colors=info"
            };
            init_tracing(filter);
            run_pipeline_command(&config_path(config))
        }
        Some(Commands::Analyze {
            image,
            output,
            tolerance,
            limit,
            no_classify,
        }) => {
            init_tracing("apodify=warn,apod_colors=warn");
            run_analyze_command(&image, output.as_deref(), tolerance, limit, no_classify)
        }
        Some(Commands::Palette { output }) => {
            init_tracing("apodify=warn,apod_colors=warn");
            run_palette_command(output.as_deref())
        }
        Some(Commands::Archive { year, config }) => {
            init_tracing("apodify=info");
            run_archive_command(year, &config_path(config))
        }
        None => {
            run_status_command();
            Ok(())
        }
    }
}

fn init_tracing(default_filter: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

fn config_path(arg: Option<PathBuf>) -> PathBuf {
    arg.or_else(|| std::env::var("CONFIG_FILE").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG))
}

/// Run the full pipeline over the configured days
fn run_pipeline_command(config_path: &Path) -> anyhow::Result<()> {
    let config = Arc::new(AppConfig::load(config_path)?);
    let client = ApodClient::from_env(config.api_url.clone())?;
    let today = Local::now().date_naive();

    let summary = run(config, client, today)?;
    println!(
        "Processed {} days ({} skipped, {} failed)",
        summary.processed, summary.skipped, summary.failed
    );
    Ok(())
}

/// Analyze a local image file (no network needed)
fn run_analyze_command(
    image_path: &Path,
    output: Option<&Path>,
    tolerance: u32,
    limit: usize,
    no_classify: bool,
) -> anyhow::Result<()> {
    let bytes = std::fs::read(image_path)?;
    let image = decode_image(&bytes)?;
    let options = ExtractOptions::new(tolerance, limit);
    let reference = (!no_classify).then(ReferencePalette::shared);

    let analysis = analyze(&image, &options, reference)?;
    let coverage = analysis.dominant.coverage();

    println!("{} ({}x{})", image_path.display(), image.width(), image.height());
    for (i, swatch) in analysis.dominant.swatches.iter().enumerate() {
        let matched = analysis
            .classified
            .as_ref()
            .and_then(|colors| colors.get(i))
            .map(|c| format!("  -> {c}"))
            .unwrap_or_default();
        println!("  {}  {:5.1}%{}", swatch.color, coverage[i] * 100.0, matched);
    }

    if let Some(output) = output {
        let canvas = analysis.compose(&image, PreviewLayout::new(!no_classify))?;
        save_jpeg(&canvas, output, apod_colors::DEFAULT_JPEG_QUALITY)?;
        println!("Wrote {}", output.display());
    }
    Ok(())
}

/// Print the reference palette and optionally save its chart
fn run_palette_command(output: Option<&Path>) -> anyhow::Result<()> {
    let reference = ReferencePalette::shared();
    let hex = reference.to_hex_strings();
    let (hues, grays) = hex.split_at(HUE_STEPS * TONE_STEPS);
    for row in hues.chunks(TONE_STEPS) {
        println!("{}", row.join(" "));
    }
    println!("{}", grays.join(" "));

    if let Some(output) = output {
        reference.save_preview(output)?;
        println!("Wrote {}", output.display());
    }
    Ok(())
}

/// Archive one year of raw APOD records
fn run_archive_command(year: i32, config_path: &Path) -> anyhow::Result<()> {
    let config = AppConfig::load(config_path)?;
    let client = ApodClient::from_env(config.api_url.clone())?;
    let today = Local::now().date_naive();

    if year > today.year() {
        anyhow::bail!("{year} is in the future");
    }

    let written = archive_year(&config, &client, year, today)?;
    println!(
        "Archived {written} days to {}",
        config.archive_dir.display()
    );
    Ok(())
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let config_file = config_path(None);
    let api_key = std::env::var(API_KEY_ENV).ok().filter(|k| !k.trim().is_empty());

    println!("Apodify v{VERSION}");
    println!("Color palettes for the Astronomy Picture of the Day\n");

    println!("Configuration:");
    let config_state = if config_file.exists() {
        "found"
    } else {
        "not found, defaults apply"
    };
    println!("  Config file:  {} ({config_state})", config_file.display());
    println!(
        "  {API_KEY_ENV}: {}",
        if api_key.is_some() {
            "set".to_string()
        } else {
            format!("(not set, using {DEMO_KEY})")
        }
    );

    println!("\nCommands:");
    println!("  apodify run       Process the configured date range");
    println!("  apodify analyze   Extract the palette of a local image");
    println!("  apodify palette   Print the reference palette");
    println!("  apodify archive   Store a year of raw APOD records");
    println!("\nRun 'apodify --help' for more details.");
}
