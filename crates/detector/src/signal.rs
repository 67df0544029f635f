//! Per-row "text-likeness" signal.
//!
//! Text strokes on a flat background make a row's intensities spread out,
//! so the population standard deviation of each row is a cheap proxy for
//! the presence of text.

use std::ops::Range;

use image::{DynamicImage, GrayImage, Luma};

/// One score per row of a grayscale region.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowSignal {
    scores: Vec<f64>,
}

/// Mean and population standard deviation of a signal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalStats {
    pub mean: f64,
    pub std_dev: f64,
}

/// How a signal is turned into a text-row mask. Rows strictly above the
/// threshold value are text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Threshold {
    /// `mean * factor`, the coarse block pass.
    MeanScaled(f64),
    /// `mean + std_dev * factor`, the fine subtitle pass.
    MeanPlusStd(f64),
}

impl Threshold {
    pub fn value(self, stats: SignalStats) -> f64 {
        match self {
            Self::MeanScaled(factor) => stats.mean * factor,
            Self::MeanPlusStd(factor) => stats.mean + stats.std_dev * factor,
        }
    }
}

impl RowSignal {
    /// Score rows `rows` of `gray`. An empty or inverted range yields an
    /// empty signal; rows past the bottom edge are ignored.
    pub fn from_rows(gray: &GrayImage, rows: Range<u32>) -> Self {
        let width = gray.width() as usize;
        let end = rows.end.min(gray.height());
        if rows.start >= end {
            return Self::default();
        }

        let raw = gray.as_raw();
        let scores = (rows.start..end)
            .map(|y| {
                let offset = y as usize * width;
                row_std_dev(&raw[offset..offset + width])
            })
            .collect();
        Self { scores }
    }

    /// Score every row of `gray`.
    pub fn from_image(gray: &GrayImage) -> Self {
        Self::from_rows(gray, 0..gray.height())
    }

    pub fn from_scores(scores: Vec<f64>) -> Self {
        Self { scores }
    }

    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Sub-signal over `range`, clamped to the signal length.
    pub fn slice(&self, range: Range<usize>) -> RowSignal {
        let end = range.end.min(self.scores.len());
        let start = range.start.min(end);
        Self {
            scores: self.scores[start..end].to_vec(),
        }
    }

    pub fn stats(&self) -> SignalStats {
        mean_and_std(&self.scores)
    }

    /// Boolean text-row mask under `threshold`.
    pub fn mask(&self, threshold: Threshold) -> Vec<bool> {
        if self.scores.is_empty() {
            return Vec::new();
        }
        let cutoff = threshold.value(self.stats());
        self.scores.iter().map(|&s| s > cutoff).collect()
    }
}

/// Grayscale conversion with ITU-R 601 weights (299/587/114), in 16-bit
/// fixed point. Single-channel 8-bit input is used as is.
pub fn luma_601(image: &DynamicImage) -> GrayImage {
    if let DynamicImage::ImageLuma8(gray) = image {
        return gray.clone();
    }
    let rgb = image.to_rgb8();
    GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| {
        let [r, g, b] = rgb.get_pixel(x, y).0;
        let weighted = r as u32 * 19595 + g as u32 * 38470 + b as u32 * 7471 + 0x8000;
        Luma([(weighted >> 16) as u8])
    })
}

/// Population mean and standard deviation. Both are zero for no values.
pub fn mean_and_std(values: &[f64]) -> SignalStats {
    if values.is_empty() {
        return SignalStats {
            mean: 0.0,
            std_dev: 0.0,
        };
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|&v| (v - mean).powi(2)).sum::<f64>() / n;
    SignalStats {
        mean,
        std_dev: variance.sqrt(),
    }
}

fn row_std_dev(row: &[u8]) -> f64 {
    if row.is_empty() {
        return 0.0;
    }
    let n = row.len() as f64;
    let mean = row.iter().map(|&p| p as u64).sum::<u64>() as f64 / n;
    let variance = row
        .iter()
        .map(|&p| {
            let diff = p as f64 - mean;
            diff * diff
        })
        .sum::<f64>()
        / n;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn striped(width: u32, height: u32, rows: Range<u32>, low: u8, high: u8) -> GrayImage {
        GrayImage::from_fn(width, height, |x, y| {
            if rows.contains(&y) {
                Luma([if x % 2 == 0 { low } else { high }])
            } else {
                Luma([90])
            }
        })
    }

    #[test]
    fn test_uniform_rows_score_zero() {
        let gray = GrayImage::from_pixel(64, 10, Luma([200]));
        let signal = RowSignal::from_image(&gray);
        assert_eq!(signal.len(), 10);
        assert!(signal.scores().iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_alternating_row_std_is_half_the_swing() {
        let gray = striped(100, 8, 2..4, 0, 255);
        let signal = RowSignal::from_image(&gray);
        assert!((signal.scores()[2] - 127.5).abs() < 1e-9);
        assert!((signal.scores()[3] - 127.5).abs() < 1e-9);
        assert_eq!(signal.scores()[0], 0.0);
    }

    #[test]
    fn test_row_range_is_respected() {
        let gray = striped(10, 20, 0..20, 100, 200);
        assert_eq!(RowSignal::from_rows(&gray, 5..12).len(), 7);
        assert!(RowSignal::from_rows(&gray, 12..5).is_empty());
        assert!(RowSignal::from_rows(&gray, 7..7).is_empty());
        assert_eq!(RowSignal::from_rows(&gray, 15..40).len(), 5);
    }

    #[test]
    fn test_thresholds() {
        let signal = RowSignal::from_scores(vec![0.0, 0.0, 10.0, 10.0]);
        let stats = signal.stats();
        assert!((stats.mean - 5.0).abs() < 1e-12);
        assert!((stats.std_dev - 5.0).abs() < 1e-12);

        assert_eq!(
            signal.mask(Threshold::MeanScaled(0.8)),
            vec![false, false, true, true]
        );
        // mean + 0.5 * std = 7.5
        assert_eq!(
            signal.mask(Threshold::MeanPlusStd(0.5)),
            vec![false, false, true, true]
        );
        assert_eq!(
            signal.mask(Threshold::MeanPlusStd(1.0)),
            vec![false, false, false, false]
        );
    }

    #[test]
    fn test_empty_signal_has_empty_mask() {
        let signal = RowSignal::default();
        assert!(signal.mask(Threshold::MeanPlusStd(0.5)).is_empty());
        assert_eq!(signal.stats().mean, 0.0);
    }

    #[test]
    fn test_luma_601_weights() {
        let rgb = image::RgbImage::from_fn(4, 1, |x, _| match x {
            0 => image::Rgb([255, 0, 0]),
            1 => image::Rgb([0, 255, 0]),
            2 => image::Rgb([0, 0, 255]),
            _ => image::Rgb([100, 100, 100]),
        });
        let gray = luma_601(&DynamicImage::ImageRgb8(rgb));
        assert_eq!(gray.as_raw(), &vec![76, 150, 29, 100]);
    }
}
