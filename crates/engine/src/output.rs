//! Composite and preview encoding.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::{ImageFormat, RgbImage};
use substitch_common::{StitchError, StitchResult};

use crate::compositor::ExtractedBand;

/// JPEG quality used for composites written as `.jpg`/`.jpeg`.
pub const JPEG_QUALITY: u8 = 95;

/// Write `image` to `path`, picking the format from the extension.
pub fn write_image(image: &RgbImage, path: &Path) -> StitchResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| StitchError::write(parent, e))?;
    }

    match ImageFormat::from_path(path) {
        Ok(ImageFormat::Jpeg) => {
            let file = File::create(path).map_err(|e| StitchError::write(path, e))?;
            let mut writer = BufWriter::new(file);
            let encoder = JpegEncoder::new_with_quality(&mut writer, JPEG_QUALITY);
            image
                .write_with_encoder(encoder)
                .map_err(|e| StitchError::encode(path, e))?;
            writer.flush().map_err(|e| StitchError::write(path, e))?;
            Ok(())
        }
        _ => image.save(path).map_err(|e| StitchError::encode(path, e)),
    }
}

/// `{index:03}_{stem}_subtitle.png`
pub fn preview_file_name(index: usize, source: &Path) -> String {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{index:03}_{stem}_subtitle.png")
}

/// Write each band alone into `dir`, creating it if needed.
///
/// On failure the previews already written by this call are removed again.
pub fn write_previews(dir: &Path, bands: &[ExtractedBand]) -> StitchResult<Vec<PathBuf>> {
    std::fs::create_dir_all(dir).map_err(|e| StitchError::write(dir, e))?;

    let mut written = Vec::with_capacity(bands.len());
    for band in bands {
        let path = dir.join(preview_file_name(band.index, &band.path));
        if let Err(e) = band.image.save_with_format(&path, ImageFormat::Png) {
            remove_written(&written);
            return Err(StitchError::encode(&path, e));
        }
        tracing::debug!("Preview saved: {}", path.display());
        written.push(path);
    }
    Ok(written)
}

/// Best-effort removal of outputs from a run that failed part way.
pub fn remove_written(paths: &[PathBuf]) {
    for path in paths {
        if let Err(e) = std::fs::remove_file(path) {
            tracing::warn!("Could not remove {}: {}", path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_preview_name_is_zero_padded() {
        assert_eq!(
            preview_file_name(2, Path::new("shots/frame 7.jpg")),
            "002_frame 7_subtitle.png"
        );
        assert_eq!(
            preview_file_name(1234, Path::new("x.png")),
            "1234_x_subtitle.png"
        );
    }

    #[test]
    fn test_write_png_and_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let image = RgbImage::from_pixel(16, 8, Rgb([120, 60, 30]));

        let png = dir.path().join("out.png");
        write_image(&image, &png).unwrap();
        let decoded = image::open(&png).unwrap().to_rgb8();
        assert_eq!(decoded, image);

        let jpg = dir.path().join("nested").join("out.JPG");
        write_image(&image, &jpg).unwrap();
        let decoded = image::open(&jpg).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (16, 8));
    }

    #[test]
    fn test_blocked_parent_dir_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("taken");
        std::fs::write(&blocker, b"").unwrap();

        let err = write_image(&RgbImage::new(2, 2), &blocker.join("out.png")).unwrap_err();
        assert!(matches!(err, StitchError::Write { .. }));
        assert!(err.to_string().contains("taken"), "{err}");

        let err = write_previews(&blocker, &[]).unwrap_err();
        assert!(matches!(err, StitchError::Write { ref path, .. } if path == &blocker));
    }

    #[test]
    fn test_unknown_extension_is_an_encode_error() {
        let dir = tempfile::tempdir().unwrap();
        let image = RgbImage::new(2, 2);
        let err = write_image(&image, &dir.path().join("out.xyz")).unwrap_err();
        assert!(matches!(err, StitchError::Encode { .. }));
    }
}
