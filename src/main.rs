//! optmap CLI - Command-line tool for splitting and combining opt map textures.
//!
//! This is the main entry point for the optmap command-line application.

mod logger;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

use optmap::common::BinaryReader;
use optmap::prelude::*;
use optmap::tga::TgaHeader;

/// optmap - opt map texture helper
#[derive(Parser)]
#[command(name = "optmap")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Preferences file (defaults to the user config directory)
    #[arg(long, global = true, env = "OPTMAP_PREFS")]
    prefs: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split a packed texture into one grayscale image per channel
    Split {
        /// Packed texture (PNG, JPEG or TGA)
        #[arg(short, long)]
        input: PathBuf,

        /// Output format (Auto, TGA, PNG, JPG); overrides the saved preference
        #[arg(short, long)]
        format: Option<OutputFormat>,
    },

    /// Combine channel images into one packed texture
    Combine(CombineArgs),

    /// Show or change saved preferences
    Config {
        /// Output format to save
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Combine mode to save (BaseOptMap, SpecularOptMap, General)
        #[arg(short, long)]
        mode: Option<CombineMode>,
    },

    /// Show image information
    Info {
        /// Image file
        #[arg(short, long)]
        input: PathBuf,
    },
}

#[derive(Args)]
struct CombineArgs {
    /// Any one channel image; its siblings are found by naming convention
    #[arg(short, long, conflicts_with_all = ["red", "green", "blue", "alpha"])]
    input: Option<PathBuf>,

    /// Image for the red channel
    #[arg(short, long, requires_all = ["green", "blue"])]
    red: Option<PathBuf>,

    /// Image for the green channel
    #[arg(short, long, requires = "red")]
    green: Option<PathBuf>,

    /// Image for the blue channel
    #[arg(short, long, requires = "red")]
    blue: Option<PathBuf>,

    /// Image for the alpha channel (general mode only)
    #[arg(short, long, requires = "red")]
    alpha: Option<PathBuf>,

    /// Combine mode for explicit channel images; overrides the saved preference
    #[arg(short, long)]
    mode: Option<CombineMode>,

    /// Output format (Auto, TGA, PNG, JPG); overrides the saved preference
    #[arg(short, long)]
    format: Option<OutputFormat>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    let prefs_path = cli.prefs.clone().or_else(Preferences::default_path);
    let prefs = match &prefs_path {
        Some(path) => Preferences::load(path)
            .with_context(|| format!("Failed to load preferences from {}", path.display()))?,
        None => Preferences::default(),
    };

    match cli.command {
        Commands::Split { input, format } => {
            cmd_split(&input, format.unwrap_or(prefs.output_format))?;
        }
        Commands::Combine(args) => {
            cmd_combine(args, &prefs)?;
        }
        Commands::Config { format, mode } => {
            cmd_config(prefs_path.as_deref(), prefs, format, mode)?;
        }
        Commands::Info { input } => {
            cmd_info(&input)?;
        }
    }

    Ok(())
}

fn cmd_split(input: &Path, format: OutputFormat) -> Result<()> {
    println!("Splitting: {} (output format: {})", input.display(), format);

    let start = Instant::now();
    let pb = spinner("Splitting channels...")?;
    let output = separate_channels(&FsStore, &SidecarSettingsStore, input, format);
    pb.finish_and_clear();

    let output = output.context("Failed to split texture")?;

    for (slot, path) in output.written.iter().enumerate() {
        let label = Channel::from_index(slot)
            .map(|channel| output.mode.label(channel))
            .unwrap_or("Channel");
        println!("  {:<14} {}", label, path.display());
    }
    print_settings_copied(output.settings_copied);
    println!("Split into {} images in {:?}", output.written.len(), start.elapsed());

    Ok(())
}

fn cmd_combine(args: CombineArgs, prefs: &Preferences) -> Result<()> {
    let format = args.format.unwrap_or(prefs.output_format);

    let request = match (args.input, args.red, args.green, args.blue) {
        (Some(selected), ..) => CombineRequest::from_selected(&FsStore, &selected)
            .context("Failed to resolve channel images")?,
        (None, Some(red), Some(green), Some(blue)) => {
            let mode = args.mode.unwrap_or(prefs.combine_mode);
            CombineRequest {
                mode,
                red,
                green,
                blue,
                alpha: args.alpha,
            }
        }
        _ => anyhow::bail!("Either --input or all of --red, --green and --blue are required"),
    };

    println!("Combining ({}):", request.mode);
    let mut inputs = vec![
        (Channel::Red, &request.red),
        (Channel::Green, &request.green),
        (Channel::Blue, &request.blue),
    ];
    if let Some(alpha) = request.alpha.as_ref().filter(|_| request.mode.uses_alpha()) {
        inputs.push((Channel::Alpha, alpha));
    }
    for (channel, path) in inputs {
        println!("  {:<14} {}", request.mode.label(channel), path.display());
    }

    let start = Instant::now();
    let pb = spinner("Combining channels...")?;
    let output = combine_channels(&FsStore, &SidecarSettingsStore, &request, format);
    pb.finish_and_clear();

    let output = output.context("Failed to combine textures")?;

    for path in &output.written {
        println!("Output written: {}", path.display());
    }
    print_settings_copied(output.settings_copied);
    println!("Combine completed in {:?}", start.elapsed());

    Ok(())
}

fn cmd_config(
    path: Option<&Path>,
    mut prefs: Preferences,
    format: Option<OutputFormat>,
    mode: Option<CombineMode>,
) -> Result<()> {
    if format.is_some() || mode.is_some() {
        let path = path.context("No config directory available; pass --prefs")?;

        if let Some(format) = format {
            prefs.output_format = format;
        }
        if let Some(mode) = mode {
            prefs.combine_mode = mode;
        }

        prefs
            .save(path)
            .with_context(|| format!("Failed to save preferences to {}", path.display()))?;
        println!("Preferences saved to {}", path.display());
    }

    if let Some(path) = path {
        println!("File:           {}", path.display());
    }
    println!("Output format:  {}", prefs.output_format);
    println!("Combine mode:   {}", prefs.combine_mode);

    Ok(())
}

fn cmd_info(input: &Path) -> Result<()> {
    let format = ImageFormat::from_path(input)?;
    let data = fs::read(input).context("Failed to read input file")?;

    println!("File:     {}", input.display());
    println!("Size:     {} bytes", data.len());

    if format == ImageFormat::Tga {
        let header: TgaHeader = BinaryReader::new(&data)
            .read_struct()
            .context("Failed to read TGA header")?;
        let image_type = header
            .image_type()
            .map(|t| format!("{:?}", t))
            .unwrap_or_else(|| format!("unknown ({})", header.image_type));

        println!("TGA type: {}", image_type);
        println!("Depth:    {} bpp", header.bits_per_pixel);
        println!("Origin:   {}", if header.is_top_down() { "top-left" } else { "bottom-left" });
    }

    let buffer = loader::decode(&data, format, true).context("Failed to decode image")?;
    let mode = CombineMode::for_texture(input.file_stem().and_then(|s| s.to_str()).unwrap_or(""));

    println!("Image:    {}x{} {:?}", buffer.width(), buffer.height(), buffer.format());
    println!("Splits:   {} channels as {}", buffer.format().channel_count(), mode);

    Ok(())
}

fn spinner(message: &'static str) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?);
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}

fn print_settings_copied(count: usize) {
    if count > 0 {
        println!("Import settings copied to {} file(s)", count);
    }
}
