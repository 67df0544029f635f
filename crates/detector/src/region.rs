//! Bottom-anchored subtitle band detection.
//!
//! Subtitles sit at the bottom of the frame, so the search only looks at
//! a bottom strip and anchors on the lowest text row found there:
//!
//! ```text
//! full frame ──► bottom strip (≤ 20% of height) ──► luma
//!                                                     │
//!                               row std-dev signal ◄──┘
//!                                      │
//!                 fine mask (mean + 0.5σ) ──► anchor at last text row,
//!                                              walk up (gap ≤ 8, span ≤ 100)
//!                                      │
//!                 coarse mask (0.8·mean, gap 20) ──► bilingual split
//!                                      │
//!                              pad ± ratio ──► full-frame band
//! ```

use std::path::Path;

use image::{DynamicImage, GrayImage};
use substitch_common::{
    DetectionConfig, StitchError, StitchResult, SubtitleLanguage, COARSE_MEAN_FACTOR,
    FALLBACK_HEIGHT_RATIO, FINE_STD_FACTOR, MAX_BOTTOM_RATIO,
};

use crate::band::{BandSource, Detection, SubtitleBand, TextBlock};
use crate::segment::TextBlockSegmenter;
use crate::signal::{luma_601, RowSignal, Threshold};

/// Locates the subtitle band of a single frame.
#[derive(Debug, Clone, Default)]
pub struct SubtitleRegionDetector {
    config: DetectionConfig,
}

impl SubtitleRegionDetector {
    pub fn new(config: DetectionConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(DetectionConfig::default())
    }

    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    /// Rows scanned from the bottom of a frame `image_height` rows tall.
    pub fn scan_height(&self, image_height: u32) -> u32 {
        let cap = ((image_height as f64) * MAX_BOTTOM_RATIO).floor() as u32;
        self.config.bottom_pixels.min(cap)
    }

    /// Band most likely to hold the subtitle. Never fails for a decoded image.
    pub fn detect(&self, image: &DynamicImage) -> SubtitleBand {
        self.detect_detailed(image).band
    }

    /// Like [`detect`](Self::detect), also reporting whether the fallback was used.
    pub fn detect_detailed(&self, image: &DynamicImage) -> Detection {
        let (width, height) = (image.width(), image.height());
        let scan = self.scan_height(height);
        let region = luma_601(&image.crop_imm(0, height - scan, width, scan));
        self.locate(&region, height)
    }

    /// Detection on a frame that is already single-channel.
    pub fn detect_luma(&self, gray: &GrayImage) -> Detection {
        let (width, height) = gray.dimensions();
        let scan = self.scan_height(height);
        let region = image::imageops::crop_imm(gray, 0, height - scan, width, scan).to_image();
        self.locate(&region, height)
    }

    /// Decode `path` and detect on it.
    pub fn detect_path(&self, path: &Path) -> StitchResult<Detection> {
        let image = image::open(path).map_err(|e| StitchError::unreadable(path, e))?;
        Ok(self.detect_detailed(&image))
    }

    /// `region` is the bottom strip of a frame `image_height` rows tall.
    fn locate(&self, region: &GrayImage, image_height: u32) -> Detection {
        let scan = region.height() as usize;
        let signal = RowSignal::from_image(region);
        let fine_mask = signal.mask(Threshold::MeanPlusStd(FINE_STD_FACTOR));

        let Some(anchored) = TextBlockSegmenter::fine().subtitle_anchor(&fine_mask) else {
            let band = SubtitleBand::bottom_fraction(image_height, FALLBACK_HEIGHT_RATIO);
            tracing::debug!(
                top = band.top,
                height = band.height,
                "no text rows in bottom {scan} rows, using fallback band"
            );
            return Detection {
                band,
                source: BandSource::Fallback,
            };
        };

        let (block, blocks) = if self.config.language.wants_split() {
            self.split_lines(&signal, anchored)
        } else {
            (anchored, 0)
        };

        let extra = ((block.len() as f64) * self.config.extra_space_ratio).floor() as usize;
        let padded = block.padded(extra, scan);
        let band = SubtitleBand::new(
            image_height - scan as u32 + padded.start as u32,
            padded.len() as u32,
        );

        tracing::debug!(
            anchored_start = anchored.start,
            anchored_end = anchored.end,
            blocks,
            top = band.top,
            height = band.height,
            "subtitle band located"
        );

        Detection {
            band,
            source: BandSource::Text { blocks },
        }
    }

    /// Pick one line out of a stacked bilingual band. The source language
    /// sits above the translation.
    fn split_lines(&self, signal: &RowSignal, anchored: TextBlock) -> (TextBlock, usize) {
        let sub = signal.slice(anchored.start..anchored.end);
        let coarse = TextBlockSegmenter::coarse().segment(&sub.mask(Threshold::MeanScaled(
            COARSE_MEAN_FACTOR,
        )));

        let chosen = match coarse.as_slice() {
            [] => anchored,
            [only] => only.offset(anchored.start),
            [first, .., last] => match self.config.language {
                SubtitleLanguage::English => last.offset(anchored.start),
                _ => first.offset(anchored.start),
            },
        };
        (chosen, coarse.len())
    }
}
