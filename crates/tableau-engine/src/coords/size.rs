use std::fmt;

/// Pixel dimensions of a raster.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Number of pixels covered.
    #[inline]
    pub fn area(self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Resolves the size a raster of `self` takes when resized towards `target`.
    ///
    /// Without `keep_aspect` the result is exactly `target`. With it, the
    /// raster is scaled uniformly by `min(tw / w, th / h)` and each side is
    /// truncated toward zero, so the result fits inside `target`.
    pub fn resized_towards(self, target: Size, keep_aspect: bool) -> Size {
        if !keep_aspect || self.is_empty() {
            return target;
        }

        let sx = target.width as f64 / self.width as f64;
        let sy = target.height as f64 / self.height as f64;
        let scale = sx.min(sy);

        Size::new(
            (self.width as f64 * scale) as u32,
            (self.height as f64 * scale) as u32,
        )
    }
}

impl From<(u32, u32)> for Size {
    #[inline]
    fn from((width, height): (u32, u32)) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
