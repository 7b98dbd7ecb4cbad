//! Presentation surfaces.
//!
//! A surface consumes finished frames. It reports whether it is still open so
//! a run loop knows when the user dismissed it.

mod log_surface;
mod png_surface;

use crate::error::ImageError;
use crate::image::Image;

pub use log_surface::LogSurface;
pub use png_surface::PngSurface;

/// State of a surface after presenting a frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceStatus {
    Open,
    Closed,
}

/// Destination for presented images.
///
/// Callers go through [`Image::show`], which rejects unloaded images before
/// the surface sees them.
pub trait Surface {
    fn present(&mut self, image: &Image) -> Result<SurfaceStatus, ImageError>;
}

impl<S> Surface for &mut S
where
    S: Surface + ?Sized,
{
    fn present(&mut self, image: &Image) -> Result<SurfaceStatus, ImageError> {
        (**self).present(image)
    }
}
