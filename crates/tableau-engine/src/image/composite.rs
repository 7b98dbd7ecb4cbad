use crate::paint::Color;
use crate::paint::color::{blend_u8, mul_u8};

use super::raster::{Channels, Raster};

/// How a source footprint is written into a target.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum CompositeMode {
    /// Source alpha weights source against destination.
    AlphaBlend,
    /// Source samples overwrite the destination footprint.
    OpaqueCopy,
}

impl CompositeMode {
    /// Picks the mode for drawing a `source`-layout image onto a
    /// `target`-layout image.
    ///
    /// Any alpha on either side selects blending; two opaque layouts copy.
    #[inline]
    pub fn select(source: Channels, target: Channels) -> Self {
        let final_channels = source.count().max(target.count());
        if final_channels == Channels::Rgba.count() || source.has_alpha() {
            CompositeMode::AlphaBlend
        } else {
            CompositeMode::OpaqueCopy
        }
    }
}

/// Writes `src` into `dst` with its top-left corner at `(x, y)`.
///
/// The placement must already be known to fit.
pub(crate) fn composite(src: &Raster, dst: &mut Raster, x: u32, y: u32, mode: CompositeMode) {
    debug_assert!(x as u64 + src.width() as u64 <= dst.width() as u64);
    debug_assert!(y as u64 + src.height() as u64 <= dst.height() as u64);

    if src.size().is_empty() {
        return;
    }

    match mode {
        CompositeMode::OpaqueCopy if src.channels() == dst.channels() => {
            for row in 0..src.height() {
                let from = src.row_span(0, row, src.width());
                dst.row_span_mut(x, y + row, src.width()).copy_from_slice(from);
            }
        }
        CompositeMode::OpaqueCopy => {
            for row in 0..src.height() {
                for col in 0..src.width() {
                    let Some(s) = src.pixel(col, row) else { continue };
                    let rgb = [s[0], s[1], s[2]];
                    if let Some(d) = dst.pixel_mut(x + col, y + row) {
                        blend_into(d, rgb, 255);
                    }
                }
            }
        }
        CompositeMode::AlphaBlend => {
            let src_alpha = src.channels().has_alpha();
            for row in 0..src.height() {
                for col in 0..src.width() {
                    let Some(s) = src.pixel(col, row) else { continue };
                    let alpha = if src_alpha { s[3] } else { 255 };
                    let rgb = [s[0], s[1], s[2]];
                    if let Some(d) = dst.pixel_mut(x + col, y + row) {
                        blend_into(d, rgb, alpha);
                    }
                }
            }
        }
    }
}

/// Blends a single straight-alpha color into the pixel at `(x, y)`.
///
/// Pixels outside the raster are ignored.
pub(crate) fn blend_pixel(dst: &mut Raster, x: u32, y: u32, color: Color) {
    if let Some(d) = dst.pixel_mut(x, y) {
        blend_into(d, color.rgb(), color.a);
    }
}

#[inline]
fn blend_into(d: &mut [u8], rgb: [u8; 3], alpha: u8) {
    match alpha {
        0 => return,
        255 => d[..3].copy_from_slice(&rgb),
        a => {
            for (dc, sc) in d[..3].iter_mut().zip(rgb) {
                *dc = blend_u8(sc, *dc, a);
            }
        }
    }
    if d.len() == Channels::Rgba.count() {
        d[3] = alpha.saturating_add(mul_u8(d[3], 255 - alpha));
    }
}
