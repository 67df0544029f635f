//! Substitch CLI: stitch subtitle bands from ordered video screenshots.
//!
//! Usage:
//!   substitch stitch [FOLDER] [OPTIONS]   Stitch a folder of screenshots
//!   substitch detect <IMAGE> [OPTIONS]    Show the subtitle band of one image
//!   substitch interactive                 Prompt for folder and language

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use substitch_common::{AppConfig, SubtitleLanguage, DEFAULT_INPUT_FOLDER};

mod commands;

#[derive(Parser)]
#[command(
    name = "substitch",
    about = "Stack the subtitles of a screenshot sequence under its first frame",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Detection tunables shared by `stitch` and `detect`.
#[derive(Args, Debug, Clone, Default)]
pub struct DetectionArgs {
    /// Subtitle line to keep: chinese (1, upper), english (2, lower), both (3)
    #[arg(short, long)]
    pub lang: Option<SubtitleLanguage>,

    /// Rows scanned from the bottom edge (capped at 20% of the frame)
    #[arg(long)]
    pub bottom_pixels: Option<u32>,

    /// Padding above and below the band, as a fraction of its height
    #[arg(long)]
    pub extra_space_ratio: Option<f64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Stitch a folder of screenshots into one image
    Stitch {
        /// Folder of screenshots, ordered by file name
        #[arg(default_value = DEFAULT_INPUT_FOLDER)]
        folder: PathBuf,

        /// Output image path (default: <folder name>_stitched.png)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        detection: DetectionArgs,

        /// Do not write per-image subtitle previews
        #[arg(long)]
        no_preview: bool,

        /// Extract bands on all cores
        #[arg(long)]
        parallel: bool,

        /// Print the stitch report as JSON
        #[arg(long)]
        json: bool,

        /// Keep these detection and preview settings as the new defaults
        #[arg(long)]
        save_config: bool,
    },

    /// Detect the subtitle band of a single image
    Detect {
        /// Image to analyze
        image: PathBuf,

        #[command(flatten)]
        detection: DetectionArgs,

        /// Print the detection as JSON
        #[arg(long)]
        json: bool,
    },

    /// Prompt for the folder and subtitle language, then stitch
    Interactive,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load();

    substitch_common::logging::init_cli_logging(&config.logging, cli.verbose);
    tracing::debug!(
        "Defaults from {}",
        substitch_common::config_file_path().display()
    );

    match cli.command {
        Commands::Stitch {
            folder,
            output,
            detection,
            no_preview,
            parallel,
            json,
            save_config,
        } => commands::stitch::run(
            &config,
            commands::stitch::StitchArgs {
                folder,
                output,
                detection,
                save_preview: !no_preview,
                parallel,
                json,
                save_config,
            },
        ),
        Commands::Detect {
            image,
            detection,
            json,
        } => commands::detect::run(&config, image, detection, json),
        Commands::Interactive => commands::interactive::run(&config),
    }
}
