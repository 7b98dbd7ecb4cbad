//! Coordinate and geometry types shared by the compositor and the board.
//!
//! Canonical space:
//! - integer pixels
//! - origin top-left
//! - +X right, +Y down

mod rect;
mod size;

pub use rect::PixelRect;
pub use size::Size;
