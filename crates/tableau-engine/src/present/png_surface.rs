use std::path::{Path, PathBuf};

use image::ExtendedColorType;

use crate::error::ImageError;
use crate::image::{Channels, Image};

use super::{Surface, SurfaceStatus};

/// Surface writing every frame as a numbered PNG (`<prefix>-00000.png`, ...).
///
/// With a frame limit the surface reports `Closed` once the limit is reached.
#[derive(Debug, Clone)]
pub struct PngSurface {
    dir: PathBuf,
    prefix: String,
    next_frame: u64,
    frame_limit: Option<u64>,
}

impl PngSurface {
    /// Creates the surface, creating `dir` if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, ImageError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .map_err(|e| ImageError::Surface(format!("{}: {e}", dir.display())))?;
        Ok(Self { dir, prefix: "frame".to_string(), next_frame: 0, frame_limit: None })
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_frame_limit(mut self, limit: u64) -> Self {
        self.frame_limit = Some(limit);
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path the next presented frame will be written to.
    pub fn next_path(&self) -> PathBuf {
        self.dir.join(format!("{}-{:05}.png", self.prefix, self.next_frame))
    }
}

impl Surface for PngSurface {
    fn present(&mut self, frame: &Image) -> Result<SurfaceStatus, ImageError> {
        let raster = frame.raster().ok_or(ImageError::NotLoaded)?;
        let color = match raster.channels() {
            Channels::Rgb => ExtendedColorType::Rgb8,
            Channels::Rgba => ExtendedColorType::Rgba8,
        };

        let path = self.next_path();
        image::save_buffer(&path, raster.samples(), raster.width(), raster.height(), color)
            .map_err(|e| ImageError::Surface(format!("{}: {e}", path.display())))?;
        log::debug!("presented {} to {}", raster.size(), path.display());

        self.next_frame += 1;
        match self.frame_limit {
            Some(limit) if self.next_frame >= limit => Ok(SurfaceStatus::Closed),
            _ => Ok(SurfaceStatus::Open),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{FsBackend, RasterBackend};
    use crate::coords::Size;
    use crate::image::Raster;
    use crate::paint::Color;

    fn frame(channels: Channels) -> Image {
        let raster = Raster::filled(Size::new(6, 4), channels, Color::from_rgb(1, 2, 3));
        Image::from_raster("frame", raster)
    }

    #[test]
    fn writes_numbered_frames() {
        let dir = tempfile::tempdir().unwrap();
        let mut surface = PngSurface::new(dir.path().join("out")).unwrap().with_prefix("board");

        assert_eq!(frame(Channels::Rgb).show(&mut surface), Ok(SurfaceStatus::Open));
        assert_eq!(frame(Channels::Rgb).show(&mut surface), Ok(SurfaceStatus::Open));

        assert!(dir.path().join("out/board-00000.png").is_file());
        assert!(dir.path().join("out/board-00001.png").is_file());
        assert_eq!(surface.next_path(), dir.path().join("out/board-00002.png"));
    }

    #[test]
    fn written_frame_decodes_back() {
        let dir = tempfile::tempdir().unwrap();
        let mut surface = PngSurface::new(dir.path()).unwrap();
        let path = surface.next_path();

        frame(Channels::Rgba).show(&mut surface).unwrap();

        let raster = FsBackend::new().decode(&path).unwrap();
        assert_eq!(raster.size(), Size::new(6, 4));
        assert_eq!(raster.channels(), Channels::Rgba);
        assert_eq!(raster.pixel(5, 3), Some(&[1, 2, 3, 255][..]));
    }

    #[test]
    fn closes_at_frame_limit() {
        let dir = tempfile::tempdir().unwrap();
        let mut surface = PngSurface::new(dir.path()).unwrap().with_frame_limit(2);

        assert_eq!(frame(Channels::Rgb).show(&mut surface), Ok(SurfaceStatus::Open));
        assert_eq!(frame(Channels::Rgb).show(&mut surface), Ok(SurfaceStatus::Closed));
    }

    #[test]
    fn show_rejects_unloaded_image_and_keeps_log() {
        let dir = tempfile::tempdir().unwrap();
        let mut surface = PngSurface::new(dir.path()).unwrap();
        assert_eq!(Image::new().show(&mut surface), Err(ImageError::NotLoaded));

        let img = frame(Channels::Rgb);
        img.show(&mut surface).unwrap();
        assert_eq!(img.operations().len(), 1);
    }
}
