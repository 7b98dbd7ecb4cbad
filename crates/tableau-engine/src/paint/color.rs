use std::fmt;

/// Straight-alpha RGBA color with 8-bit components.
///
/// Rasters store samples in this channel order, so a color can be written to
/// either a 3- or 4-channel buffer without reordering.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    #[inline]
    pub const fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba(r, g, b, 255)
    }

    #[inline]
    pub const fn white() -> Self {
        Self::from_rgb(255, 255, 255)
    }

    #[inline]
    pub const fn black() -> Self {
        Self::from_rgb(0, 0, 0)
    }

    #[inline]
    pub const fn transparent() -> Self {
        Self::from_rgba(0, 0, 0, 0)
    }

    #[inline]
    pub fn is_opaque(self) -> bool {
        self.a == 255
    }

    /// Returns the color with its alpha scaled by `coverage` (`0`–`255`).
    ///
    /// Used to turn glyph coverage masks into per-pixel source alpha.
    #[inline]
    pub fn with_coverage(self, coverage: u8) -> Self {
        Self { a: mul_u8(self.a, coverage), ..self }
    }

    #[inline]
    pub fn rgb(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::white()
    }
}

impl From<[u8; 4]> for Color {
    #[inline]
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self::from_rgba(r, g, b, a)
    }
}

impl From<[u8; 3]> for Color {
    #[inline]
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::from_rgb(r, g, b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// `a * b / 255` with rounding.
#[inline]
pub(crate) fn mul_u8(a: u8, b: u8) -> u8 {
    let t = a as u32 * b as u32 + 128;
    ((t + (t >> 8)) >> 8) as u8
}

/// Straight-alpha "over" for one sample: `src * a + dst * (1 - a)`.
#[inline]
pub(crate) fn blend_u8(src: u8, dst: u8, alpha: u8) -> u8 {
    let inv = 255 - alpha;
    let v = src as u32 * alpha as u32 + dst as u32 * inv as u32;
    ((v + 127) / 255) as u8
}
