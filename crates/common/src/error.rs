//! Error types shared across Substitch crates.

use std::path::PathBuf;

/// Top-level error type for Substitch operations.
#[derive(Debug, thiserror::Error)]
pub enum StitchError {
    #[error("Unreadable image {}: {source}", path.display())]
    UnreadableImage {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Cannot read folder {}: {source}", folder.display())]
    FolderUnreadable {
        folder: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No images found in {}", folder.display())]
    NoImagesFound { folder: PathBuf },

    #[error("At least 2 images are required in {}, found {found}", folder.display())]
    InsufficientImages { folder: PathBuf, found: usize },

    #[error("Failed to write image {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type alias using StitchError.
pub type StitchResult<T> = Result<T, StitchError>;

impl StitchError {
    pub fn unreadable(path: impl Into<PathBuf>, source: image::ImageError) -> Self {
        Self::UnreadableImage {
            path: path.into(),
            source,
        }
    }

    pub fn encode(path: impl Into<PathBuf>, source: image::ImageError) -> Self {
        Self::Encode {
            path: path.into(),
            source,
        }
    }

    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Whether this error means the folder did not hold enough frames to stitch.
    pub fn is_insufficient_images(&self) -> bool {
        matches!(
            self,
            Self::NoImagesFound { .. } | Self::InsufficientImages { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreadable_message_names_file() {
        let err = StitchError::unreadable(
            "frames/003.png",
            image::ImageError::IoError(std::io::Error::other("truncated")),
        );
        let msg = err.to_string();
        assert!(msg.contains("frames/003.png"), "{msg}");
        assert!(msg.contains("truncated"), "{msg}");
    }

    #[test]
    fn test_write_message_names_path() {
        let err = StitchError::write(
            "out/frames_subtitle_preview",
            std::io::Error::from(std::io::ErrorKind::AlreadyExists),
        );
        let msg = err.to_string();
        assert!(msg.contains("out/frames_subtitle_preview"), "{msg}");
    }

    #[test]
    fn test_insufficient_classification() {
        let none = StitchError::NoImagesFound {
            folder: PathBuf::from("shots"),
        };
        let one = StitchError::InsufficientImages {
            folder: PathBuf::from("shots"),
            found: 1,
        };
        assert!(none.is_insufficient_images());
        assert!(one.is_insufficient_images());
        assert!(!StitchError::config("bad").is_insufficient_images());
    }
}
