//! Substitch Detector: subtitle band localization
//!
//! Finds the subtitle band near the bottom of a video screenshot from
//! pixel-intensity statistics alone:
//! - **Row signal:** per-row standard deviation of luminance
//! - **Segmentation:** gap-tolerant grouping of text-like rows into blocks
//! - **Region detection:** bottom-anchored band search with bilingual split
//!
//! This crate is pure computation over decoded images. No text is ever
//! read; only the spatial presence of high-variance rows matters.

pub mod band;
pub mod region;
pub mod segment;
pub mod signal;

pub use band::{BandSource, Detection, SubtitleBand, TextBlock};
pub use region::SubtitleRegionDetector;
pub use segment::TextBlockSegmenter;
pub use signal::{luma_601, RowSignal, Threshold};
