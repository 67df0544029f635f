//! Input frame discovery.
//!
//! Frames are ordered by file name alone, so callers must name them such
//! that lexicographic order is chronological (zero-padded prefixes).

use std::path::{Path, PathBuf};

use image::DynamicImage;
use substitch_common::{StitchError, StitchResult};

/// Extensions accepted as frames, compared case-insensitively.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Ordered frames of one stitch run: a base and at least one subtitle frame.
#[derive(Debug, Clone)]
pub struct ImageSet {
    files: Vec<PathBuf>,
}

impl ImageSet {
    /// The frame kept whole.
    pub fn base(&self) -> &Path {
        &self.files[0]
    }

    /// Frames contributing only their subtitle band.
    pub fn subtitle_frames(&self) -> &[PathBuf] {
        &self.files[1..]
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Whether `path` has an accepted image extension.
pub fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        })
        .unwrap_or(false)
}

/// Image files directly inside `folder`, ascending by file name.
/// Directories are skipped even when their name looks like an image.
pub fn list_images(folder: &Path) -> StitchResult<Vec<PathBuf>> {
    let unreadable = |source| StitchError::FolderUnreadable {
        folder: folder.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(folder).map_err(unreadable)? {
        let entry = entry.map_err(unreadable)?;
        let path = entry.path();
        if path.is_file() && has_image_extension(&path) {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Like [`list_images`], requiring a base plus at least one more frame.
pub fn load_image_set(folder: &Path) -> StitchResult<ImageSet> {
    let files = list_images(folder)?;
    match files.len() {
        0 => Err(StitchError::NoImagesFound {
            folder: folder.to_path_buf(),
        }),
        1 => Err(StitchError::InsufficientImages {
            folder: folder.to_path_buf(),
            found: 1,
        }),
        _ => Ok(ImageSet { files }),
    }
}

/// Decode one frame, naming the file on failure.
pub fn open_image(path: &Path) -> StitchResult<DynamicImage> {
    image::open(path).map_err(|e| StitchError::unreadable(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), b"").unwrap();
    }

    fn names(files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_lists_images_sorted_by_name() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.png", "a.png", "c.jpg", "readme.txt"] {
            touch(dir.path(), name);
        }
        let files = list_images(dir.path()).unwrap();
        assert_eq!(names(&files), vec!["a.png", "b.png", "c.jpg"]);
    }

    #[test]
    fn test_extension_match_is_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["02.JPEG", "01.Png", "03.jpg", "04.gif", "noext"] {
            touch(dir.path(), name);
        }
        std::fs::create_dir(dir.path().join("00.png")).unwrap();

        let files = list_images(dir.path()).unwrap();
        assert_eq!(names(&files), vec!["01.Png", "02.JPEG", "03.jpg"]);
    }

    #[test]
    fn test_image_set_needs_two_frames() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_image_set(dir.path()),
            Err(StitchError::NoImagesFound { .. })
        ));

        touch(dir.path(), "001.png");
        assert!(matches!(
            load_image_set(dir.path()),
            Err(StitchError::InsufficientImages { found: 1, .. })
        ));

        touch(dir.path(), "002.png");
        let set = load_image_set(dir.path()).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.base().ends_with("001.png"));
        assert_eq!(names(set.subtitle_frames()), vec!["002.png"]);
    }

    #[test]
    fn test_missing_folder_is_reported() {
        let err = list_images(Path::new("/nonexistent/frames")).unwrap_err();
        assert!(matches!(err, StitchError::FolderUnreadable { .. }));
    }
}
