//! Show the subtitle band of a single image.

use std::path::PathBuf;

use anyhow::Context;
use substitch_common::AppConfig;
use substitch_detector::{BandSource, SubtitleRegionDetector};

use crate::DetectionArgs;

pub fn run(
    app: &AppConfig,
    image: PathBuf,
    detection: DetectionArgs,
    json: bool,
) -> anyhow::Result<()> {
    let config = super::detection_config(app.detection, &detection);
    config.validate()?;

    let detector = SubtitleRegionDetector::new(config);
    let result = detector
        .detect_path(&image)
        .with_context(|| format!("Failed to analyze {}", image.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("Image: {}", image.display());
    println!("  Language: {}", config.language);
    println!(
        "  Band: top={} height={}",
        result.band.top, result.band.height
    );
    match result.source {
        BandSource::Text { blocks } if blocks > 1 => {
            println!("  Source: text rows ({blocks} stacked lines found)")
        }
        BandSource::Text { .. } => println!("  Source: text rows"),
        BandSource::Fallback => println!("  Source: fallback (no text rows detected)"),
    }
    Ok(())
}
