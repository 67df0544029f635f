//! Row ranges and bands produced by detection.

use serde::{Deserialize, Serialize};

/// Half-open row range `[start, end)` in a region's local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextBlock {
    pub start: usize,
    pub end: usize,
}

impl TextBlock {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "block start {start} after end {end}");
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Shift the block by `offset` rows.
    pub fn offset(self, offset: usize) -> Self {
        Self {
            start: self.start + offset,
            end: self.end + offset,
        }
    }

    /// Grow by `extra` rows on each side, clamped to `[0, limit)`.
    pub fn padded(self, extra: usize, limit: usize) -> Self {
        Self {
            start: self.start.saturating_sub(extra),
            end: (self.end + extra).min(limit),
        }
    }
}

/// A horizontal strip of a full image: `top` row and `height` in rows.
///
/// Invariant: `top + height <= image height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtitleBand {
    pub top: u32,
    pub height: u32,
}

impl SubtitleBand {
    pub fn new(top: u32, height: u32) -> Self {
        Self { top, height }
    }

    /// One past the last row of the band.
    pub fn bottom(&self) -> u32 {
        self.top + self.height
    }

    /// The bottom `fraction` of an image of height `image_height`.
    pub fn bottom_fraction(image_height: u32, fraction: f64) -> Self {
        let height = ((image_height as f64) * fraction).floor() as u32;
        let height = height.min(image_height);
        Self {
            top: image_height - height,
            height,
        }
    }

    /// Map the band into an image rescaled by `numer / denom`, clamped to
    /// the rescaled image's `target_height`.
    pub fn rescaled(self, numer: u32, denom: u32, target_height: u32) -> Self {
        if denom == 0 {
            return Self::new(0, 0);
        }
        let scale = |v: u32| ((v as u64 * numer as u64) / denom as u64) as u32;
        let top = scale(self.top).min(target_height);
        let height = scale(self.height).min(target_height - top);
        Self { top, height }
    }
}

/// How a band was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BandSource {
    /// Text rows were found. `blocks` counts the coarse blocks seen when a
    /// split was requested (0 when no split was attempted).
    Text { blocks: usize },
    /// No text row cleared the threshold; the bottom 15% was used.
    Fallback,
}

/// A band together with how it was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detection {
    pub band: SubtitleBand,
    pub source: BandSource,
}

impl Detection {
    pub fn is_fallback(&self) -> bool {
        matches!(self.source, BandSource::Fallback)
    }
}
