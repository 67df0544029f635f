//! Gap-tolerant grouping of text rows into blocks.

use substitch_common::{COARSE_GAP, FINE_GAP, MAX_SUBTITLE_HEIGHT};

use crate::band::TextBlock;

/// Groups true rows of a mask into maximal blocks. Two true rows belong to
/// the same block while their index delta is at most `max_gap`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextBlockSegmenter {
    pub max_gap: usize,
}

impl Default for TextBlockSegmenter {
    fn default() -> Self {
        Self::coarse()
    }
}

impl TextBlockSegmenter {
    pub fn new(max_gap: usize) -> Self {
        Self { max_gap }
    }

    /// Tolerance used when splitting a band into stacked lines.
    pub fn coarse() -> Self {
        Self::new(COARSE_GAP)
    }

    /// Tolerance used when refining the bottom subtitle band.
    pub fn fine() -> Self {
        Self::new(FINE_GAP)
    }

    /// Blocks in ascending row order. No true row means no blocks.
    pub fn segment(&self, mask: &[bool]) -> Vec<TextBlock> {
        let mut indices = true_rows(mask);
        let Some(first) = indices.next() else {
            return Vec::new();
        };

        let mut blocks = Vec::new();
        let mut start = first;
        let mut prev = first;
        for idx in indices {
            if idx - prev > self.max_gap {
                blocks.push(TextBlock::new(start, prev + 1));
                start = idx;
            }
            prev = idx;
        }
        blocks.push(TextBlock::new(start, prev + 1));
        blocks
    }

    /// Block anchored at the bottom-most true row, grown upward through true
    /// rows while each stays within `max_gap` of the current top and the
    /// block stays within `max_span` rows.
    pub fn anchor_bottom(&self, mask: &[bool], max_span: usize) -> Option<TextBlock> {
        let indices: Vec<usize> = true_rows(mask).collect();
        let &last = indices.last()?;

        let bottom = last + 1;
        let mut top = last;
        for &idx in indices.iter().rev() {
            if top - idx > self.max_gap {
                break;
            }
            if bottom - idx > max_span {
                break;
            }
            top = idx;
        }
        Some(TextBlock::new(top, bottom))
    }

    /// [`anchor_bottom`](Self::anchor_bottom) with the subtitle height cap.
    pub fn subtitle_anchor(&self, mask: &[bool]) -> Option<TextBlock> {
        self.anchor_bottom(mask, MAX_SUBTITLE_HEIGHT)
    }
}

fn true_rows(mask: &[bool]) -> impl Iterator<Item = usize> + '_ {
    mask.iter()
        .enumerate()
        .filter_map(|(i, &is_text)| is_text.then_some(i))
}
