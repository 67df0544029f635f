//! Top-level stitch orchestration.
//!
//! Every frame is decoded, detected and cropped before anything touches
//! the filesystem, so a failing frame leaves no composite and no previews
//! behind.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use substitch_common::{StitchConfig, StitchResult};
use substitch_detector::SubtitleRegionDetector;

use crate::compositor::{crop_band, resize_to_width, ExtractedBand, StitchPlan};
use crate::loader::{load_image_set, open_image};
use crate::output::{remove_written, write_image, write_previews};
use crate::report::{file_name, BaseReport, FrameReport, StitchReport};

/// Drives detection over a folder and writes the composite.
#[derive(Debug, Clone)]
pub struct SubtitleStitcher {
    config: StitchConfig,
    detector: SubtitleRegionDetector,
}

impl SubtitleStitcher {
    pub fn new(config: StitchConfig) -> StitchResult<Self> {
        config.detection.validate()?;
        Ok(Self {
            detector: SubtitleRegionDetector::new(config.detection),
            config,
        })
    }

    pub fn config(&self) -> &StitchConfig {
        &self.config
    }

    /// Load, detect and crop every frame without writing anything.
    pub fn plan(&self) -> StitchResult<StitchPlan> {
        let set = load_image_set(&self.config.folder)?;
        tracing::info!(
            "Found {} images in {}",
            set.len(),
            self.config.folder.display()
        );

        let base = open_image(set.base())?.to_rgb8();
        let width = base.width();
        tracing::info!(
            "Base image: {} ({}x{}), kept whole",
            file_name(set.base()),
            width,
            base.height()
        );

        // Human-facing numbering: the base is image 1.
        let extract = |(offset, path): (usize, &PathBuf)| {
            self.extract(offset + 2, path, width)
        };
        let frames = set.subtitle_frames();
        let bands: Vec<ExtractedBand> = if self.config.parallel {
            frames
                .par_iter()
                .enumerate()
                .map(extract)
                .collect::<StitchResult<_>>()?
        } else {
            frames
                .iter()
                .enumerate()
                .map(extract)
                .collect::<StitchResult<_>>()?
        };

        Ok(StitchPlan::new(set.base().to_path_buf(), base).with_bands(bands))
    }

    /// Run the whole stitch and write its outputs.
    pub fn stitch(&self) -> StitchResult<StitchReport> {
        tracing::info!(
            "Stitching {} (language: {})",
            self.config.folder.display(),
            self.config.detection.language
        );

        let plan = self.plan()?;
        let canvas = plan.compose();
        tracing::info!(
            "Composite size: {}x{}",
            canvas.width(),
            canvas.height()
        );

        write_image(&canvas, &self.config.output_path)?;
        tracing::info!("Composite saved to {}", self.config.output_path.display());

        let (preview_dir, preview_paths) = if self.config.save_preview {
            let dir = self.config.preview_dir();
            let paths = match write_previews(&dir, plan.bands()) {
                Ok(paths) => paths,
                Err(e) => {
                    // Previews are part of the output; drop the composite with them.
                    remove_written(std::slice::from_ref(&self.config.output_path));
                    return Err(e);
                }
            };
            tracing::info!("{} previews saved to {}", paths.len(), dir.display());
            (Some(dir), paths)
        } else {
            (None, Vec::new())
        };

        Ok(StitchReport {
            output_path: self.config.output_path.clone(),
            width: canvas.width(),
            height: canvas.height(),
            language: self.config.detection.language,
            base: BaseReport {
                file_name: file_name(&plan.base_path),
                width: plan.base().width(),
                height: plan.base().height(),
            },
            frames: plan.bands().iter().map(FrameReport::from).collect(),
            preview_dir,
            preview_paths,
        })
    }

    /// Decode, detect, normalize width and crop one subtitle frame.
    fn extract(&self, index: usize, path: &Path, width: u32) -> StitchResult<ExtractedBand> {
        let image = open_image(path)?;
        let detection = self.detector.detect_detailed(&image);
        let (source_width, source_height) = (image.width(), image.height());
        tracing::info!(
            "Image {index}: {} subtitle at top={}, height={}{}",
            file_name(path),
            detection.band.top,
            detection.band.height,
            if detection.is_fallback() {
                " (fallback)"
            } else {
                ""
            }
        );

        // Reuse the pre-resize detection: top and height both scale by
        // width / source_width, clamped to the resized frame.
        let (image, band, resized) = if source_width != width {
            tracing::warn!(
                "Image {index}: width {source_width} differs from base width {width}, resizing"
            );
            let resized = resize_to_width(&image, width);
            let band = detection
                .band
                .rescaled(width, source_width, resized.height());
            (resized, band, true)
        } else {
            (image, detection.band, false)
        };

        let crop = crop_band(&image, band);
        tracing::debug!(
            "Image {index}: band crop {}x{}",
            crop.width(),
            crop.height()
        );

        Ok(ExtractedBand {
            index,
            path: path.to_path_buf(),
            detection,
            band,
            source_width,
            source_height,
            resized,
            image: crop,
        })
    }
}

/// Stitch with `config` in one call.
pub fn stitch(config: &StitchConfig) -> StitchResult<StitchReport> {
    SubtitleStitcher::new(config.clone())?.stitch()
}
