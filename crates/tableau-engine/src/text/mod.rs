//! Text rasterization.
//!
//! Fonts are parsed with `fontdue` and owned by a [`FontSystem`]. Glyph
//! coverage is blended straight into raster buffers on the CPU.

mod burn;
mod font_system;
mod style;

pub use font_system::{FontId, FontLoadError, FontSystem};
pub use style::{FontFace, TextStyle};

pub(crate) use burn::burn_text;

/// Pixel height of one font-size unit.
///
/// Text sizes are scale factors (`1.0` is a regular caption), not pixels.
pub const PIXELS_PER_FONT_UNIT: f32 = 24.0;
