//! Summary of a finished stitch run.

use std::path::PathBuf;

use serde::Serialize;
use substitch_common::SubtitleLanguage;
use substitch_detector::{Detection, SubtitleBand};

use crate::compositor::ExtractedBand;

#[derive(Debug, Clone, Serialize)]
pub struct StitchReport {
    pub output_path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub language: SubtitleLanguage,
    pub base: BaseReport,
    pub frames: Vec<FrameReport>,
    pub preview_dir: Option<PathBuf>,
    pub preview_paths: Vec<PathBuf>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BaseReport {
    pub file_name: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct FrameReport {
    pub index: usize,
    pub file_name: String,
    pub source_width: u32,
    pub source_height: u32,
    pub detection: Detection,
    pub band: SubtitleBand,
    pub resized: bool,
}

impl From<&ExtractedBand> for FrameReport {
    fn from(band: &ExtractedBand) -> Self {
        Self {
            index: band.index,
            file_name: file_name(&band.path),
            source_width: band.source_width,
            source_height: band.source_height,
            detection: band.detection,
            band: band.band,
            resized: band.resized,
        }
    }
}

pub(crate) fn file_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

impl StitchReport {
    /// Number of frames that fell back to the default band.
    pub fn fallback_count(&self) -> usize {
        self.frames
            .iter()
            .filter(|f| f.detection.is_fallback())
            .count()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
