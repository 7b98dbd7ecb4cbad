use crate::error::ImageError;
use crate::image::Image;

use super::{Surface, SurfaceStatus};

/// Headless surface that writes each frame's summary to the log.
#[derive(Debug, Clone)]
pub struct LogSurface {
    level: log::Level,
    presented: u64,
}

impl Default for LogSurface {
    fn default() -> Self {
        Self { level: log::Level::Info, presented: 0 }
    }
}

impl LogSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(level: log::Level) -> Self {
        Self { level, presented: 0 }
    }

    /// Frames presented so far.
    #[inline]
    pub fn presented(&self) -> u64 {
        self.presented
    }
}

impl Surface for LogSurface {
    fn present(&mut self, image: &Image) -> Result<SurfaceStatus, ImageError> {
        self.presented += 1;
        log::log!(self.level, "frame {}\n{}", self.presented, image.info());
        Ok(SurfaceStatus::Open)
    }
}
