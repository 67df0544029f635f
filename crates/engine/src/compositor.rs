//! Band extraction geometry and vertical composition.

use std::path::PathBuf;

use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbImage};
use substitch_detector::{Detection, SubtitleBand};

/// One processed subtitle frame: its crop plus the geometry that produced it.
#[derive(Debug, Clone)]
pub struct ExtractedBand {
    /// 1-based position in the frame sequence (the base is 1).
    pub index: usize,

    pub path: PathBuf,

    /// Detection on the frame as decoded.
    pub detection: Detection,

    /// Band actually cropped, in the (possibly resized) frame.
    pub band: SubtitleBand,

    pub source_width: u32,
    pub source_height: u32,

    /// Whether the frame was rescaled to the base width.
    pub resized: bool,

    /// The cropped pixels, `base width × band.height`.
    pub image: RgbImage,
}

/// Base frame plus every extracted band, in composition order.
#[derive(Debug, Clone)]
pub struct StitchPlan {
    pub base_path: PathBuf,
    base: RgbImage,
    bands: Vec<ExtractedBand>,
}

impl StitchPlan {
    pub fn new(base_path: PathBuf, base: RgbImage) -> Self {
        Self {
            base_path,
            base,
            bands: Vec::new(),
        }
    }

    pub fn with_bands(mut self, bands: Vec<ExtractedBand>) -> Self {
        self.bands = bands;
        self
    }

    pub fn base(&self) -> &RgbImage {
        &self.base
    }

    pub fn bands(&self) -> &[ExtractedBand] {
        &self.bands
    }

    /// Output width, always the base width.
    pub fn width(&self) -> u32 {
        self.base.width()
    }

    /// Base height plus the height of every band.
    pub fn total_height(&self) -> u32 {
        self.base.height() + self.bands.iter().map(|b| b.image.height()).sum::<u32>()
    }

    /// Paint the base at the top and each band directly below the previous
    /// one, with no gap.
    pub fn compose(&self) -> RgbImage {
        let mut canvas = RgbImage::new(self.width(), self.total_height());
        imageops::replace(&mut canvas, &self.base, 0, 0);

        let mut y = self.base.height() as i64;
        for band in &self.bands {
            tracing::debug!(index = band.index, y, "pasting band");
            imageops::replace(&mut canvas, &band.image, 0, y);
            y += band.image.height() as i64;
        }
        canvas
    }
}

/// Height after scaling a `source_width` wide frame to `width`, aspect ratio kept.
pub fn scaled_height(source_width: u32, source_height: u32, width: u32) -> u32 {
    if source_width == 0 {
        return source_height;
    }
    ((source_height as u64 * width as u64) / source_width as u64).max(1) as u32
}

/// Rescale `image` to `width` with Lanczos resampling, aspect ratio kept.
pub fn resize_to_width(image: &DynamicImage, width: u32) -> DynamicImage {
    let height = scaled_height(image.width(), image.height(), width);
    image.resize_exact(width, height, FilterType::Lanczos3)
}

/// Copy the rows of `band` out of `image` as RGB.
pub fn crop_band(image: &DynamicImage, band: SubtitleBand) -> RgbImage {
    let top = band.top.min(image.height());
    let height = band.height.min(image.height() - top);
    image.crop_imm(0, top, image.width(), height).to_rgb8()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use substitch_detector::BandSource;

    fn band_of(index: usize, width: u32, height: u32, color: u8) -> ExtractedBand {
        ExtractedBand {
            index,
            path: PathBuf::from(format!("{index:03}.png")),
            detection: Detection {
                band: SubtitleBand::new(0, height),
                source: BandSource::Fallback,
            },
            band: SubtitleBand::new(0, height),
            source_width: width,
            source_height: height,
            resized: false,
            image: RgbImage::from_pixel(width, height, Rgb([color; 3])),
        }
    }

    #[test]
    fn test_compose_stacks_bands_under_base() {
        let base = RgbImage::from_pixel(8, 10, Rgb([10, 20, 30]));
        let plan = StitchPlan::new(PathBuf::from("001.png"), base.clone())
            .with_bands(vec![band_of(2, 8, 3, 200), band_of(3, 8, 5, 100)]);

        assert_eq!(plan.width(), 8);
        assert_eq!(plan.total_height(), 18);

        let canvas = plan.compose();
        assert_eq!(canvas.dimensions(), (8, 18));
        assert_eq!(*canvas.get_pixel(7, 9), Rgb([10, 20, 30]));
        assert_eq!(*canvas.get_pixel(0, 10), Rgb([200; 3]));
        assert_eq!(*canvas.get_pixel(0, 12), Rgb([200; 3]));
        assert_eq!(*canvas.get_pixel(0, 13), Rgb([100; 3]));
        assert_eq!(*canvas.get_pixel(7, 17), Rgb([100; 3]));
    }

    #[test]
    fn test_empty_plan_is_the_base() {
        let base = RgbImage::from_pixel(4, 4, Rgb([1, 2, 3]));
        let plan = StitchPlan::new(PathBuf::from("001.png"), base.clone());
        assert_eq!(plan.compose(), base);
    }

    #[test]
    fn test_resize_keeps_aspect_ratio() {
        assert_eq!(scaled_height(200, 2000, 100), 1000);
        assert_eq!(scaled_height(300, 100, 100), 33);
        assert_eq!(scaled_height(1000, 1, 10), 1);

        let image = DynamicImage::ImageRgb8(RgbImage::new(200, 50));
        let resized = resize_to_width(&image, 100);
        assert_eq!((resized.width(), resized.height()), (100, 25));
    }

    #[test]
    fn test_crop_band_clamps_to_image() {
        let image = DynamicImage::ImageRgb8(RgbImage::new(6, 20));
        assert_eq!(crop_band(&image, SubtitleBand::new(15, 5)).dimensions(), (6, 5));
        assert_eq!(crop_band(&image, SubtitleBand::new(18, 9)).dimensions(), (6, 2));
    }
}
