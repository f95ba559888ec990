use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use imprint::codec::{encode_png, load_image};
use imprint::effects::{deboss, embroider, laser_engrave, one_color, BackgroundActions, EmbroiderySettings};
use imprint::error::EffectError;
use imprint::models::{AppConfig, PrintMethod};
use imprint::services::{AssetFetcher, ColorService};
use imprint_colors::Argb;

#[derive(Parser)]
#[command(name = "imprint")]
#[command(about = "Reduce imprint artwork to print colors and preview decoration effects")]
struct Cli {
    /// Config file (defaults to $IMPRINT_CONFIG, then built-in defaults)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reduce an image to color book colors and print the result as JSON
    Colors {
        image: PathBuf,

        /// Tiles per side (1 = whole-image strategy)
        #[arg(long)]
        tiles: Option<u32>,

        /// Do not detect and exclude the background
        #[arg(long)]
        no_background: bool,
    },
    /// Print the detected background as JSON
    Background { image: PathBuf },
    /// Apply an effect and write a PNG
    Effect {
        image: PathBuf,

        /// Output PNG file path
        #[arg(short, long)]
        output: PathBuf,

        #[command(subcommand)]
        kind: EffectKind,
    },
    /// Download an asset with retries
    Fetch {
        url: String,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Print the effect used for a print method id
    Method { id: u32 },
}

#[derive(Subcommand)]
enum EffectKind {
    /// Recolor the artwork to a single color
    OneColor {
        /// Hex color, e.g. "#C8102E"
        #[arg(long)]
        color: String,

        /// Keep the background instead of clearing it
        #[arg(long)]
        keep_bg: bool,
    },
    /// Deboss preview
    Deboss {
        /// Use the smaller kernel for text
        #[arg(long)]
        text: bool,
    },
    /// Embroidery preview
    Embroider {
        /// Number of colors to stitch
        #[arg(long)]
        colors: Option<u32>,
    },
    /// Laser-engraving preview over a material texture
    Laser {
        /// Material texture image
        #[arg(long)]
        texture: PathBuf,

        /// Keep a white background instead of clearing it
        #[arg(long)]
        keep_bg: bool,
    },
    /// Make the detected background transparent
    RemoveBg,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "imprint=warn,imprint_colors=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let config = AppConfig::load_optional(cli.config.as_deref());

    match cli.command {
        Commands::Colors {
            image,
            tiles,
            no_background,
        } => run_colors_command(&config, &image, tiles, no_background),
        Commands::Background { image } => run_background_command(&config, &image),
        Commands::Effect {
            image,
            output,
            kind,
        } => run_effect_command(&config, &image, &output, kind),
        Commands::Fetch { url, output } => run_fetch_command(&config, &url, &output),
        Commands::Method { id } => run_method_command(id),
    }
}

fn run_colors_command(
    config: &AppConfig,
    image: &Path,
    tiles: Option<u32>,
    no_background: bool,
) -> anyhow::Result<()> {
    let artwork = load_image(image).with_context(|| format!("Failed to load {}", image.display()))?;

    let mut service = ColorService::new(config).context("Invalid color book")?;
    if let Some(tiles) = tiles {
        service = service.with_tile_count(tiles);
    }

    let output = service.analyze(&artwork, !no_background)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn run_background_command(config: &AppConfig, image: &Path) -> anyhow::Result<()> {
    let artwork = load_image(image).with_context(|| format!("Failed to load {}", image.display()))?;
    let service = ColorService::new(config).context("Invalid color book")?;

    match service.detect_background(&artwork) {
        Some(hint) => println!("{}", serde_json::to_string_pretty(&hint)?),
        None => println!("null"),
    }
    Ok(())
}

fn run_effect_command(config: &AppConfig, image: &Path, output: &Path, kind: EffectKind) -> anyhow::Result<()> {
    let artwork = load_image(image).with_context(|| format!("Failed to load {}", image.display()))?;

    let result = match kind {
        EffectKind::OneColor { color, keep_bg } => {
            let color: Argb = color.parse().map_err(|_| EffectError::InvalidColor(color.clone()))?;
            one_color(&artwork, color, !keep_bg)
        }
        EffectKind::Deboss { text } => deboss(&artwork, text),
        EffectKind::Embroider { colors } => {
            let settings = EmbroiderySettings {
                number_of_colors: colors.unwrap_or(config.embroidery.number_of_colors),
                ..config.embroidery.clone()
            };
            embroider(&artwork, &settings)?
        }
        EffectKind::Laser { texture, keep_bg } => {
            let material =
                load_image(&texture).with_context(|| format!("Failed to load texture {}", texture.display()))?;
            laser_engrave(&artwork, &material, !keep_bg)
        }
        EffectKind::RemoveBg => {
            let service = ColorService::new(config).context("Invalid color book")?;
            let actions = BackgroundActions {
                crop: false,
                remove: true,
                remove_on_transparent: false,
            };
            service.clean_background(&artwork, actions).image
        }
    };

    let png_bytes = encode_png(&result)?;
    std::fs::write(output, &png_bytes).with_context(|| format!("Failed to write {}", output.display()))?;
    println!("Wrote {} ({} bytes)", output.display(), png_bytes.len());
    Ok(())
}

fn run_fetch_command(config: &AppConfig, url: &str, output: &Path) -> anyhow::Result<()> {
    let fetcher = AssetFetcher::from_config(config)?;
    match fetcher.download(url)? {
        Some(bytes) => {
            std::fs::write(output, &bytes).with_context(|| format!("Failed to write {}", output.display()))?;
            println!("Downloaded {} ({} bytes)", output.display(), bytes.len());
            Ok(())
        }
        None => anyhow::bail!(
            "Download of {url} failed after {} attempts",
            config.max_download_attempts
        ),
    }
}

fn run_method_command(id: u32) -> anyhow::Result<()> {
    let method = PrintMethod::from_id(id).with_context(|| format!("Unknown print method id {id}"))?;
    println!("{:?} -> {:?}", method, method.effect());
    Ok(())
}
