use std::fmt;
use std::path::PathBuf;

use crate::coords::{PixelRect, Size};

/// Error returned by image operations.
///
/// Every variant leaves the images involved exactly as they were before the
/// failing call: no pixels written, no log entries appended.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageError {
    /// The operation needs a loaded image (`channels != 0`).
    NotLoaded,
    /// A draw placement would extend past the target's extent.
    OutOfBounds {
        placement: PixelRect,
        target: Size,
    },
    /// The raster backend could not resolve or decode `path`.
    LoadFailure {
        path: PathBuf,
        reason: String,
    },
    /// A presentation surface failed to display a frame.
    Surface(String),
}

impl ImageError {
    pub(crate) fn load_failure(path: impl Into<PathBuf>, reason: impl fmt::Display) -> Self {
        Self::LoadFailure { path: path.into(), reason: reason.to_string() }
    }
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageError::NotLoaded => write!(f, "image is not loaded"),
            ImageError::OutOfBounds { placement, target } => write!(
                f,
                "{}x{} at ({},{}) does not fit in {} (right edge {}, bottom edge {})",
                placement.width,
                placement.height,
                placement.x,
                placement.y,
                target,
                placement.right(),
                placement.bottom(),
            ),
            ImageError::LoadFailure { path, reason } => {
                write!(f, "failed to load {}: {}", path.display(), reason)
            }
            ImageError::Surface(msg) => write!(f, "surface error: {msg}"),
        }
    }
}

impl std::error::Error for ImageError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_message_names_both_edges() {
        let err = ImageError::OutOfBounds {
            placement: PixelRect::new(150, 150, 100, 100),
            target: Size::new(200, 200),
        };
        assert_eq!(
            err.to_string(),
            "100x100 at (150,150) does not fit in 200x200 (right edge 250, bottom edge 250)"
        );
    }

    #[test]
    fn load_failure_mentions_path() {
        let err = ImageError::load_failure("missing.png", "No such file");
        assert_eq!(err.to_string(), "failed to load missing.png: No such file");
    }
}
