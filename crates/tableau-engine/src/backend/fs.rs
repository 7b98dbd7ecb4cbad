use std::path::Path;

use image::imageops::{self, FilterType};
use image::{ImageBuffer, Rgb, Rgba};

use crate::coords::Size;
use crate::error::ImageError;
use crate::image::{Channels, Raster};

use super::{Filter, RasterBackend, ResampleError};

/// Backend decoding files from disk with the `image` crate.
///
/// Sources with an alpha channel load as RGBA, everything else as RGB.
#[derive(Debug, Copy, Clone, Default)]
pub struct FsBackend;

impl FsBackend {
    pub fn new() -> Self {
        Self
    }
}

fn filter_type(filter: Filter) -> FilterType {
    match filter {
        Filter::Nearest => FilterType::Nearest,
        Filter::Linear => FilterType::Triangle,
        Filter::Cubic => FilterType::CatmullRom,
        Filter::Lanczos => FilterType::Lanczos3,
    }
}

impl RasterBackend for FsBackend {
    fn decode(&self, path: &Path) -> Result<Raster, ImageError> {
        let decoded = image::open(path).map_err(|e| ImageError::load_failure(path, e))?;
        let size = Size::new(decoded.width(), decoded.height());

        let raster = if decoded.color().has_alpha() {
            Raster::from_samples(size, Channels::Rgba, decoded.into_rgba8().into_raw())
        } else {
            Raster::from_samples(size, Channels::Rgb, decoded.into_rgb8().into_raw())
        };

        raster.ok_or_else(|| ImageError::load_failure(path, "decoder returned a short buffer"))
    }

    fn resample(
        &self,
        raster: &Raster,
        size: Size,
        filter: Filter,
    ) -> Result<Raster, ResampleError> {
        let (w, h) = (raster.width(), raster.height());
        let filter = filter_type(filter);
        let short = || ResampleError(format!("buffer does not match {w}x{h}"));

        let samples = match raster.channels() {
            Channels::Rgb => {
                let view = ImageBuffer::<Rgb<u8>, &[u8]>::from_raw(w, h, raster.samples())
                    .ok_or_else(short)?;
                imageops::resize(&view, size.width, size.height, filter).into_raw()
            }
            Channels::Rgba => {
                let view = ImageBuffer::<Rgba<u8>, &[u8]>::from_raw(w, h, raster.samples())
                    .ok_or_else(short)?;
                imageops::resize(&view, size.width, size.height, filter).into_raw()
            }
        };

        Raster::from_samples(size, raster.channels(), samples)
            .ok_or_else(|| ResampleError(format!("resize produced a buffer not matching {size}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::Color;

    fn write_png(
        dir: &Path,
        name: &str,
        w: u32,
        h: u32,
        color: image::ExtendedColorType,
    ) -> std::path::PathBuf {
        let path = dir.join(name);
        let n = match color {
            image::ExtendedColorType::Rgba8 => 4,
            _ => 3,
        };
        let buf = vec![200u8; (w * h * n) as usize];
        image::save_buffer(&path, &buf, w, h, color).unwrap();
        path
    }

    // ── decode ────────────────────────────────────────────────────────────

    #[test]
    fn decodes_rgb_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path(), "board.png", 8, 6, image::ExtendedColorType::Rgb8);

        let raster = FsBackend::new().decode(&path).unwrap();
        assert_eq!(raster.size(), Size::new(8, 6));
        assert_eq!(raster.channels(), Channels::Rgb);
        assert_eq!(raster.pixel(0, 0), Some(&[200, 200, 200][..]));
    }

    #[test]
    fn decodes_rgba_png_with_alpha() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path(), "piece.png", 4, 4, image::ExtendedColorType::Rgba8);

        let raster = FsBackend::new().decode(&path).unwrap();
        assert_eq!(raster.channels(), Channels::Rgba);
    }

    #[test]
    fn missing_file_is_load_failure() {
        let dir = tempfile::tempdir().unwrap();
        let err = FsBackend::new().decode(&dir.path().join("nope.png")).unwrap_err();
        assert!(matches!(err, ImageError::LoadFailure { .. }));
    }

    // ── resample ──────────────────────────────────────────────────────────

    #[test]
    fn resample_keeps_channels_and_uniform_color() {
        let color = Color::from_rgba(40, 50, 60, 255);
        let raster = Raster::filled(Size::new(10, 10), Channels::Rgba, color);

        for filter in [Filter::Nearest, Filter::Linear, Filter::Cubic, Filter::Lanczos] {
            let out = FsBackend::new().resample(&raster, Size::new(5, 3), filter).unwrap();
            assert_eq!(out.size(), Size::new(5, 3));
            assert_eq!(out.channels(), Channels::Rgba);
            assert_eq!(out.pixel(2, 1), Some(&[40, 50, 60, 255][..]));
        }
    }
}
