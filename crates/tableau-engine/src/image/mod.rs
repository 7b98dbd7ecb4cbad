//! Image compositing kernel.
//!
//! Responsibilities:
//! - own raster buffers and their channel layout (`Raster`)
//! - load with optional resize through a `RasterBackend`
//! - layer one image onto another (alpha blend or opaque copy)
//! - record every operation in order, and optionally publish it to a sink

mod composite;
mod img;
mod info;
mod operation;
mod raster;

pub use composite::CompositeMode;
pub use img::{Image, LoadOptions};
pub use info::ImageInfo;
pub use operation::{Operation, OperationSink};
pub use raster::{Channels, Raster};

pub(crate) use composite::blend_pixel;
