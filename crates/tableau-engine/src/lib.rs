//! Tableau engine crate.
//!
//! This crate owns the image compositing kernel used to render board frames,
//! plus the thin collaborators around it: raster backends, text
//! rasterization, presentation surfaces, frame timing and the game-loop
//! boundary.

pub mod error;
pub mod image;
pub mod backend;
pub mod text;
pub mod present;
pub mod time;
pub mod game;

pub mod logging;
pub mod coords;
pub mod paint;

pub use error::ImageError;
pub use crate::image::{CompositeMode, Image, ImageInfo, LoadOptions, Operation, OperationSink};
