//! Substitch Engine
//!
//! Turns an ordered folder of screenshots into one tall image: the first
//! frame in full, followed by the subtitle band of every later frame.
//!
//! # Pipeline Architecture
//!
//! ```text
//! folder/ ──► loader (sorted by file name)
//!                │
//!                ├── 001.png ───────────────────────────────┐ base, kept whole
//!                │                                          │
//!                └── 002.png … N ──► decode ──► detect ──► resize to base width
//!                                                          │
//!                                                     crop band
//!                                                          │
//!                                      compositor ◄────────┘
//!                                          │
//!                          <folder>_stitched.png  (+ <folder>_subtitle_preview/)
//! ```

pub mod compositor;
pub mod loader;
pub mod output;
pub mod report;
pub mod stitcher;

pub use compositor::{ExtractedBand, StitchPlan};
pub use loader::{list_images, load_image_set, ImageSet};
pub use report::{BaseReport, FrameReport, StitchReport};
pub use stitcher::{stitch, SubtitleStitcher};
