//! Application configuration.
//!
//! The detector's tuned constants live here as named values so the CLI,
//! the persisted config file, and the library all agree on one set of
//! defaults.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{StitchError, StitchResult};

/// Rows scanned from the bottom edge when looking for subtitles.
pub const DEFAULT_BOTTOM_PIXELS: u32 = 150;

/// Padding added above and below a detected band, as a fraction of its height.
pub const DEFAULT_EXTRA_SPACE_RATIO: f64 = 0.1;

/// The scanned bottom region never exceeds this fraction of the frame height.
pub const MAX_BOTTOM_RATIO: f64 = 0.2;

/// Height of the fallback band, as a fraction of the frame height.
pub const FALLBACK_HEIGHT_RATIO: f64 = 0.15;

/// Fine pass: a row is text when its score exceeds `mean + std * FINE_STD_FACTOR`.
pub const FINE_STD_FACTOR: f64 = 0.5;

/// Coarse pass: a row is text when its score exceeds `mean * COARSE_MEAN_FACTOR`.
pub const COARSE_MEAN_FACTOR: f64 = 0.8;

/// Largest row gap tolerated while walking up from the bottom-most text row.
pub const FINE_GAP: usize = 8;

/// Largest row gap tolerated inside one coarse text block.
pub const COARSE_GAP: usize = 20;

/// Upper bound on the height of one detected subtitle band, in rows.
pub const MAX_SUBTITLE_HEIGHT: usize = 100;

/// Folder used when the user gives none.
pub const DEFAULT_INPUT_FOLDER: &str = "ted talk/";

/// Which line of a stacked bilingual subtitle to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubtitleLanguage {
    /// Keep the upper line.
    #[default]
    Chinese,
    /// Keep the lower line.
    English,
    /// Keep both lines.
    Both,
}

impl SubtitleLanguage {
    /// Whether detection should try to separate stacked lines.
    pub fn wants_split(self) -> bool {
        !matches!(self, Self::Both)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Chinese => "chinese",
            Self::English => "english",
            Self::Both => "both",
        }
    }
}

impl fmt::Display for SubtitleLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubtitleLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "1" | "chinese" | "zh" => Ok(Self::Chinese),
            "2" | "english" | "en" => Ok(Self::English),
            "3" | "both" => Ok(Self::Both),
            other => Err(format!(
                "Unknown subtitle language: {other}. Use: chinese (1), english (2), both (3)"
            )),
        }
    }
}

/// Tunables of a single detection call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Rows scanned from the bottom edge (capped at 20% of the frame).
    pub bottom_pixels: u32,

    /// Symmetric padding around the band, as a fraction of its height.
    pub extra_space_ratio: f64,

    /// Bilingual split policy.
    pub language: SubtitleLanguage,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            bottom_pixels: DEFAULT_BOTTOM_PIXELS,
            extra_space_ratio: DEFAULT_EXTRA_SPACE_RATIO,
            language: SubtitleLanguage::default(),
        }
    }
}

impl DetectionConfig {
    /// Reject values that cannot describe a band.
    pub fn validate(&self) -> Result<(), crate::StitchError> {
        if !self.extra_space_ratio.is_finite() || self.extra_space_ratio < 0.0 {
            return Err(crate::StitchError::config(format!(
                "extra_space_ratio must be a non-negative number, got {}",
                self.extra_space_ratio
            )));
        }
        Ok(())
    }
}

/// Everything one stitch run needs, with no dependency on interactive input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StitchConfig {
    /// Directory holding the ordered screenshots.
    pub folder: PathBuf,

    /// Where the composite is written.
    pub output_path: PathBuf,

    /// Whether each extracted band is also written to the preview directory.
    pub save_preview: bool,

    /// Extract bands on a worker pool. Output is identical either way.
    pub parallel: bool,

    /// Detection tunables, including the language choice.
    pub detection: DetectionConfig,
}

impl StitchConfig {
    /// Config with every default applied, output named after the folder.
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        let folder = folder.into();
        Self {
            output_path: default_output_path(&folder),
            folder,
            save_preview: true,
            parallel: false,
            detection: DetectionConfig::default(),
        }
    }

    pub fn with_output(mut self, output_path: impl Into<PathBuf>) -> Self {
        self.output_path = output_path.into();
        self
    }

    pub fn with_language(mut self, language: SubtitleLanguage) -> Self {
        self.detection.language = language;
        self
    }

    pub fn with_preview(mut self, save_preview: bool) -> Self {
        self.save_preview = save_preview;
        self
    }

    /// Sibling directory that receives per-frame preview crops.
    pub fn preview_dir(&self) -> PathBuf {
        sibling_with_suffix(&self.folder, "_subtitle_preview")
    }
}

/// Global application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default detection settings.
    pub detection: DetectionConfig,

    /// Whether previews are written by default.
    pub save_preview: bool,

    /// Whether extraction runs on a worker pool by default.
    pub parallel: bool,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "substitch_engine=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            detection: DetectionConfig::default(),
            save_preview: true,
            parallel: false,
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_file_path())
    }

    /// Load config from an explicit path, falling back to defaults.
    pub fn load_from(config_path: &Path) -> Self {
        if config_path.exists() {
            match std::fs::read_to_string(config_path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {:?}: {}", config_path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Save config to the standard location, returning where it went.
    pub fn save(&self) -> StitchResult<PathBuf> {
        let config_path = config_file_path();
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    pub fn save_to(&self, config_path: &Path) -> StitchResult<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StitchError::write(parent, e))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, json).map_err(|e| StitchError::write(config_path, e))
    }

    /// Build a stitch run for `folder` from these defaults.
    pub fn stitch_config(&self, folder: impl Into<PathBuf>) -> StitchConfig {
        let mut config = StitchConfig::new(folder);
        config.save_preview = self.save_preview;
        config.parallel = self.parallel;
        config.detection = self.detection;
        config
    }
}

/// `<folder name>_stitched.png` in the working directory.
pub fn default_output_path(folder: &Path) -> PathBuf {
    PathBuf::from(format!("{}_stitched.png", folder_name(folder)))
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("substitch").join("config.json")
}

/// Last component of `folder`, resolving `.`-style paths through the filesystem.
fn folder_name(folder: &Path) -> String {
    folder
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .or_else(|| {
            std::fs::canonicalize(folder)
                .ok()
                .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        })
        .unwrap_or_else(|| "frames".to_string())
}

fn sibling_with_suffix(folder: &Path, suffix: &str) -> PathBuf {
    let name = format!("{}{suffix}", folder_name(folder));
    match folder.file_name().and(folder.parent()) {
        Some(parent) => parent.join(name),
        None => std::fs::canonicalize(folder)
            .ok()
            .and_then(|p| p.parent().map(|parent| parent.join(&name)))
            .unwrap_or_else(|| PathBuf::from(name)),
    }
}
