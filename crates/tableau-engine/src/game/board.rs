use crate::coords::{PixelRect, Size};
use crate::error::ImageError;
use crate::image::Image;

/// Grid of equally sized cells laid over a board image.
#[derive(Debug)]
pub struct Board {
    cell_size: Size,
    cells: Size,
    image: Image,
}

impl Board {
    /// Wraps a loaded board image. `cells` counts columns and rows.
    pub fn new(cell_size: Size, cells: Size, image: Image) -> Result<Self, ImageError> {
        if !image.is_loaded() {
            return Err(ImageError::NotLoaded);
        }
        Ok(Self { cell_size, cells, image })
    }

    #[inline]
    pub fn cell_size(&self) -> Size {
        self.cell_size
    }

    #[inline]
    pub fn cells(&self) -> Size {
        self.cells
    }

    #[inline]
    pub fn image(&self) -> &Image {
        &self.image
    }

    #[inline]
    pub fn image_mut(&mut self) -> &mut Image {
        &mut self.image
    }

    /// Pixel rectangle covered by the cell at `(col, row)`.
    pub fn cell_rect(&self, col: u32, row: u32) -> Option<PixelRect> {
        if col >= self.cells.width || row >= self.cells.height {
            return None;
        }
        let x = i32::try_from(col as u64 * self.cell_size.width as u64).ok()?;
        let y = i32::try_from(row as u64 * self.cell_size.height as u64).ok()?;
        Some(PixelRect::from_origin_size(x, y, self.cell_size))
    }

    /// Cell containing the pixel `(x, y)`, if any.
    pub fn cell_at(&self, x: i32, y: i32) -> Option<(u32, u32)> {
        if x < 0 || y < 0 || self.cell_size.is_empty() {
            return None;
        }
        let col = x as u32 / self.cell_size.width;
        let row = y as u32 / self.cell_size.height;
        (col < self.cells.width && row < self.cells.height).then_some((col, row))
    }

    /// Same grid over a pixel copy of the board image, for painting a frame
    /// without touching the original.
    pub fn duplicate(&self) -> Board {
        Board { cell_size: self.cell_size, cells: self.cells, image: self.image.duplicate() }
    }
}
