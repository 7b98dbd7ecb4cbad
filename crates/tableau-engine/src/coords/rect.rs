use super::Size;

/// Axis-aligned rectangle in integer pixels (top-left origin).
///
/// The origin may be negative; the extent never is.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    #[inline]
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    #[inline]
    pub const fn from_origin_size(x: i32, y: i32, size: Size) -> Self {
        Self { x, y, width: size.width, height: size.height }
    }

    #[inline]
    pub fn size(self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Exclusive right edge.
    #[inline]
    pub fn right(self) -> i64 {
        self.x as i64 + self.width as i64
    }

    /// Exclusive bottom edge.
    #[inline]
    pub fn bottom(self) -> i64 {
        self.y as i64 + self.height as i64
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns `true` if the whole rectangle lies inside a `bounds`-sized
    /// canvas anchored at the origin.
    #[inline]
    pub fn fits_within(self, bounds: Size) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.right() <= bounds.width as i64
            && self.bottom() <= bounds.height as i64
    }

    #[inline]
    pub fn intersect(self, other: PixelRect) -> Option<PixelRect> {
        let x0 = (self.x as i64).max(other.x as i64);
        let y0 = (self.y as i64).max(other.y as i64);
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());

        if x1 <= x0 || y1 <= y0 {
            None
        } else {
            Some(PixelRect::new(x0 as i32, y0 as i32, (x1 - x0) as u32, (y1 - y0) as u32))
        }
    }
}
