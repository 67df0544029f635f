//! Stitch a folder of screenshots.

use std::path::PathBuf;

use anyhow::Context;
use substitch_common::{AppConfig, StitchConfig};
use substitch_engine::{StitchReport, SubtitleStitcher};

use crate::DetectionArgs;

/// Command-line inputs of `substitch stitch`.
#[derive(Debug, Clone)]
pub struct StitchArgs {
    pub folder: PathBuf,
    pub output: Option<PathBuf>,
    pub detection: DetectionArgs,
    pub save_preview: bool,
    pub parallel: bool,
    pub json: bool,
    pub save_config: bool,
}

pub fn run(app: &AppConfig, args: StitchArgs) -> anyhow::Result<()> {
    let config = stitch_config(app, &args);
    let defaults = remembered_defaults(app, &config);

    execute(config, args.json)?;

    if args.save_config {
        let path = defaults.save().context("Failed to save settings")?;
        tracing::info!("Settings saved to {}", path.display());
    }
    Ok(())
}

/// File defaults overlaid with the command-line flags.
fn stitch_config(app: &AppConfig, args: &StitchArgs) -> StitchConfig {
    let mut config = app.stitch_config(&args.folder);
    if let Some(output) = &args.output {
        config.output_path = output.clone();
    }
    config.detection = super::detection_config(config.detection, &args.detection);
    config.save_preview = args.save_preview;
    config.parallel = config.parallel || args.parallel;
    config
}

/// App config that reproduces `config`'s settings on the next run.
fn remembered_defaults(app: &AppConfig, config: &StitchConfig) -> AppConfig {
    AppConfig {
        detection: config.detection,
        save_preview: config.save_preview,
        parallel: config.parallel,
        logging: app.logging.clone(),
    }
}

/// Run a fully specified stitch and print its summary.
pub fn execute(config: StitchConfig, json: bool) -> anyhow::Result<()> {
    let folder = config.folder.clone();
    let stitcher = SubtitleStitcher::new(config).context("Invalid stitch configuration")?;
    let report = stitcher
        .stitch()
        .with_context(|| format!("Failed to stitch {}", folder.display()))?;

    if json {
        println!("{}", report.to_json()?);
    } else {
        print_summary(&report);
    }
    Ok(())
}

fn print_summary(report: &StitchReport) {
    println!(
        "Base: {} ({}x{})",
        report.base.file_name, report.base.width, report.base.height
    );
    for frame in &report.frames {
        println!(
            "  [{:>3}] {}  top={} height={}{}{}",
            frame.index,
            frame.file_name,
            frame.band.top,
            frame.band.height,
            if frame.detection.is_fallback() {
                "  (fallback)"
            } else {
                ""
            },
            if frame.resized { "  (resized)" } else { "" },
        );
    }
    println!();
    println!("Language: {}", report.language);
    println!(
        "Output: {} ({}x{})",
        report.output_path.display(),
        report.width,
        report.height
    );
    if let Some(dir) = &report.preview_dir {
        println!(
            "Previews: {} files in {}",
            report.preview_paths.len(),
            dir.display()
        );
    }
    let fallbacks = report.fallback_count();
    if fallbacks > 0 {
        println!("[WARN] {fallbacks} image(s) used the default bottom band");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use substitch_common::SubtitleLanguage;

    fn args(folder: &str) -> StitchArgs {
        StitchArgs {
            folder: PathBuf::from(folder),
            output: None,
            detection: DetectionArgs::default(),
            save_preview: true,
            parallel: false,
            json: false,
            save_config: false,
        }
    }

    #[test]
    fn test_flags_override_file_defaults() {
        let mut app = AppConfig::default();
        app.parallel = true;
        let mut args = args("shots");
        args.output = Some(PathBuf::from("out.jpg"));
        args.save_preview = false;
        args.detection.lang = Some(SubtitleLanguage::Both);

        let config = stitch_config(&app, &args);
        assert_eq!(config.output_path, PathBuf::from("out.jpg"));
        assert!(!config.save_preview);
        assert!(config.parallel);
        assert_eq!(config.detection.language, SubtitleLanguage::Both);
    }

    #[test]
    fn test_remembered_defaults_carry_run_settings() {
        let mut app = AppConfig::default();
        app.logging.json = true;
        let mut args = args("shots");
        args.save_preview = false;
        args.detection.bottom_pixels = Some(120);

        let config = stitch_config(&app, &args);
        let defaults = remembered_defaults(&app, &config);
        assert_eq!(defaults.detection.bottom_pixels, 120);
        assert!(!defaults.save_preview);
        assert!(defaults.logging.json);
    }
}
