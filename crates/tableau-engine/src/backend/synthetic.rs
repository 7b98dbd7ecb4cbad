use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::coords::Size;
use crate::error::ImageError;
use crate::image::{Channels, Raster};

use super::{Filter, RasterBackend, ResampleError};

/// Headless backend that fabricates a black raster for any path.
///
/// Every decode yields the same size and layout, which makes composition
/// results predictable without fixture files. Paths registered with
/// [`fail_on`](Self::fail_on) decode as [`ImageError::LoadFailure`].
#[derive(Debug, Clone)]
pub struct SyntheticBackend {
    size: Size,
    channels: Channels,
    failing: HashSet<PathBuf>,
}

impl Default for SyntheticBackend {
    /// `800x600`, RGB, black.
    fn default() -> Self {
        Self {
            size: Size::new(800, 600),
            channels: Channels::Rgb,
            failing: HashSet::new(),
        }
    }
}

impl SyntheticBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = Size::new(width, height);
        self
    }

    pub fn with_channels(mut self, channels: Channels) -> Self {
        self.channels = channels;
        self
    }

    pub fn fail_on(mut self, path: impl Into<PathBuf>) -> Self {
        self.failing.insert(path.into());
        self
    }
}

impl RasterBackend for SyntheticBackend {
    fn decode(&self, path: &Path) -> Result<Raster, ImageError> {
        if self.failing.contains(path) {
            return Err(ImageError::load_failure(path, "no such source"));
        }
        Ok(Raster::blank(self.size, self.channels))
    }

    /// Nearest-neighbour resampling; `filter` is ignored.
    fn resample(
        &self,
        raster: &Raster,
        size: Size,
        _filter: Filter,
    ) -> Result<Raster, ResampleError> {
        let n = raster.channels().count();
        let mut samples = Vec::with_capacity(size.area() * n);

        for y in 0..size.height {
            let sy = (y as u64 * raster.height() as u64 / size.height as u64) as u32;
            for x in 0..size.width {
                let sx = (x as u64 * raster.width() as u64 / size.width as u64) as u32;
                let px = raster
                    .pixel(sx, sy)
                    .ok_or_else(|| ResampleError(format!("source pixel ({sx},{sy}) missing")))?;
                samples.extend_from_slice(px);
            }
        }

        Raster::from_samples(size, raster.channels(), samples)
            .ok_or_else(|| ResampleError(format!("resampled buffer does not match {size}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_decodes_800_by_600_rgb() {
        let raster = SyntheticBackend::new().decode(Path::new("test.jpg")).unwrap();
        assert_eq!(raster.size(), Size::new(800, 600));
        assert_eq!(raster.channels(), Channels::Rgb);
    }

    #[test]
    fn registered_path_fails() {
        let backend = SyntheticBackend::new().fail_on("missing.png");
        assert!(backend.decode(Path::new("missing.png")).is_err());
        assert!(backend.decode(Path::new("present.png")).is_ok());
    }

    #[test]
    fn nearest_resample_picks_source_pixels() {
        let src =
            Raster::from_samples(Size::new(2, 1), Channels::Rgb, vec![1, 1, 1, 9, 9, 9]).unwrap();
        let out = SyntheticBackend::new().resample(&src, Size::new(4, 2), Filter::Nearest).unwrap();
        assert_eq!(out.pixel(0, 0), Some(&[1, 1, 1][..]));
        assert_eq!(out.pixel(1, 1), Some(&[1, 1, 1][..]));
        assert_eq!(out.pixel(2, 0), Some(&[9, 9, 9][..]));
        assert_eq!(out.pixel(3, 1), Some(&[9, 9, 9][..]));
    }
}
