//! Paint model shared between the compositor and text rasterization.
//!
//! Geometry types remain in `coords`.

pub mod color;

pub use color::Color;
