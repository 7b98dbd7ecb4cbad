//! Raster backends.
//!
//! A backend turns a path into pixels and resamples buffers. The compositor
//! only relies on the declared size and channel layout of what comes back.

mod fs;
mod synthetic;

use std::fmt;
use std::path::Path;

use crate::coords::Size;
use crate::error::ImageError;
use crate::image::Raster;

pub use fs::FsBackend;
pub use synthetic::SyntheticBackend;

/// Resampling filter used when a load resizes its raster.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum Filter {
    Nearest,
    #[default]
    Linear,
    Cubic,
    Lanczos,
}

/// Error returned by [`RasterBackend::resample`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResampleError(pub String);

impl fmt::Display for ResampleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "resample error: {}", self.0)
    }
}

impl std::error::Error for ResampleError {}

/// Source of raster data.
pub trait RasterBackend {
    /// Decodes `path` into a raster, or fails with [`ImageError::LoadFailure`].
    fn decode(&self, path: &Path) -> Result<Raster, ImageError>;

    /// Resamples `raster` to `size`, preserving its channel layout.
    ///
    /// `size` is never empty.
    fn resample(
        &self,
        raster: &Raster,
        size: Size,
        filter: Filter,
    ) -> Result<Raster, ResampleError>;
}

impl<B> RasterBackend for &B
where
    B: RasterBackend + ?Sized,
{
    fn decode(&self, path: &Path) -> Result<Raster, ImageError> {
        (**self).decode(path)
    }

    fn resample(
        &self,
        raster: &Raster,
        size: Size,
        filter: Filter,
    ) -> Result<Raster, ResampleError> {
        (**self).resample(raster, size, filter)
    }
}
