//! Synthetic frame generation for pipeline tests.

use std::ops::Range;
use std::path::Path;

use image::{Rgb, RgbImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;

pub const BACKGROUND: Rgb<u8> = Rgb([90, 90, 90]);

/// A "scene" frame with colored blocks, standing in for the full first frame.
pub fn scene(width: u32, height: u32) -> RgbImage {
    let mut img = RgbImage::from_pixel(width, height, Rgb([30, 40, 60]));
    draw_filled_rect_mut(
        &mut img,
        Rect::at(5, 5).of_size(width / 3, height / 4),
        Rgb([220, 40, 40]),
    );
    draw_filled_rect_mut(
        &mut img,
        Rect::at((width / 2) as i32, (height / 2) as i32).of_size(width / 4, height / 5),
        Rgb([40, 200, 90]),
    );
    img
}

/// Flat frame with alternating black/white columns over `rows`, a stand-in
/// for a line of subtitle text.
pub fn subtitle_frame(width: u32, height: u32, rows: Range<u32>) -> RgbImage {
    let mut img = RgbImage::from_pixel(width, height, BACKGROUND);
    for y in rows {
        for x in 0..width {
            let v = if x % 2 == 0 { 0 } else { 255 };
            img.put_pixel(x, y, Rgb([v, v, v]));
        }
    }
    img
}

pub fn save(img: &RgbImage, dir: &Path, name: &str) {
    img.save(dir.join(name)).expect("synthetic frame should encode");
}
