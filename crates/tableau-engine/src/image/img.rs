use std::fmt;
use std::path::Path;

use crate::backend::{Filter, FsBackend, RasterBackend};
use crate::coords::{PixelRect, Size};
use crate::error::ImageError;
use crate::present::{Surface, SurfaceStatus};
use crate::text::{TextStyle, burn_text};

use super::composite::{CompositeMode, composite};
use super::info::ImageInfo;
use super::operation::{Operation, OperationSink};
use super::raster::Raster;

/// Options for [`Image::load_with`].
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct LoadOptions {
    /// Resize target. `None` keeps the decoded size.
    pub size: Option<Size>,
    /// Fit inside `size` with a uniform scale instead of stretching to it.
    pub keep_aspect: bool,
    pub filter: Filter,
}

impl LoadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.size = Some(Size::new(width, height));
        self
    }

    pub fn keep_aspect(mut self, keep_aspect: bool) -> Self {
        self.keep_aspect = keep_aspect;
        self
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }
}

/// In-memory raster with an append-only operation log.
///
/// An image starts unloaded (`channels() == 0`, no buffer). Loading gives it
/// a buffer; drawing and text annotation mutate it in place. Every successful
/// operation appends one [`Operation`] per participant, and a failed one
/// appends nothing and changes nothing.
#[derive(Default)]
pub struct Image {
    raster: Option<Raster>,
    log: Vec<Operation>,
    sink: Option<Box<dyn OperationSink + Send>>,
}

impl fmt::Debug for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Image")
            .field("size", &self.size())
            .field("channels", &self.channels())
            .field("operations", &self.log.len())
            .field("sink", &self.sink.is_some())
            .finish()
    }
}

impl Image {
    /// Creates an unloaded image.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a loaded image from an existing raster, recording it as a read
    /// of `source`.
    pub fn from_raster(source: impl Into<String>, raster: Raster) -> Self {
        let mut image = Self::new();
        let size = raster.size();
        image.raster = Some(raster);
        image.record(Operation::Read { source: source.into(), size });
        image
    }

    /// Publishes every subsequent operation to `sink` as well as the log.
    pub fn with_sink(mut self, sink: impl OperationSink + Send + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Copies the pixels into a new image with an empty log and no sink.
    pub fn duplicate(&self) -> Self {
        Self { raster: self.raster.clone(), log: Vec::new(), sink: None }
    }

    // ── state ─────────────────────────────────────────────────────────────

    #[inline]
    pub fn is_loaded(&self) -> bool {
        self.raster.is_some()
    }

    #[inline]
    pub fn size(&self) -> Size {
        self.raster.as_ref().map_or(Size::default(), Raster::size)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.size().width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.size().height
    }

    /// `0` while unloaded, otherwise `3` or `4`.
    #[inline]
    pub fn channels(&self) -> u8 {
        self.raster.as_ref().map_or(0, |r| r.channels().count() as u8)
    }

    #[inline]
    pub fn raster(&self) -> Option<&Raster> {
        self.raster.as_ref()
    }

    /// Operations in the order they were performed.
    #[inline]
    pub fn operations(&self) -> &[Operation] {
        &self.log
    }

    /// Snapshot of size, channels, load state and rendered log lines.
    pub fn info(&self) -> ImageInfo {
        let size = self.size();
        ImageInfo {
            width: size.width,
            height: size.height,
            channels: self.channels(),
            operations: self.log.iter().map(ToString::to_string).collect(),
            loaded: self.is_loaded(),
        }
    }

    fn record(&mut self, op: Operation) {
        if let Some(sink) = self.sink.as_mut() {
            sink.record(&op);
        }
        self.log.push(op);
    }

    // ── load ──────────────────────────────────────────────────────────────

    /// Loads `path` from disk, optionally resizing to `size`.
    ///
    /// Returns `self` so calls can be chained.
    pub fn load(
        &mut self,
        path: impl AsRef<Path>,
        size: Option<(u32, u32)>,
        keep_aspect: bool,
    ) -> Result<&mut Self, ImageError> {
        let options = LoadOptions {
            size: size.map(Size::from),
            keep_aspect,
            ..LoadOptions::default()
        };
        self.load_with(&FsBackend, path, options)
    }

    /// Loads `path` through `backend`.
    ///
    /// Logs `READ` with the decoded size, then `RESIZE` if `options.size` is
    /// set. On failure the image keeps its previous buffer and log.
    pub fn load_with<B>(
        &mut self,
        backend: &B,
        path: impl AsRef<Path>,
        options: LoadOptions,
    ) -> Result<&mut Self, ImageError>
    where
        B: RasterBackend + ?Sized,
    {
        let path = path.as_ref();
        let decoded = backend.decode(path)?;
        let original = decoded.size();
        if original.is_empty() {
            let reason = format!("decoded raster is empty ({original})");
            return Err(ImageError::load_failure(path, reason));
        }

        let resized = match options.size {
            None => None,
            Some(target) => {
                let size = original.resized_towards(target, options.keep_aspect);
                let raster = if size.is_empty() {
                    Raster::blank(size, decoded.channels())
                } else {
                    backend
                        .resample(&decoded, size, options.filter)
                        .map_err(|e| ImageError::load_failure(path, e))?
                };
                Some(raster)
            }
        };

        log::debug!(
            "load {}: {} ({} channels)",
            path.display(),
            original,
            decoded.channels().count()
        );
        self.record(Operation::Read { source: path.display().to_string(), size: original });

        match resized {
            Some(raster) => {
                let to = raster.size();
                log::debug!(
                    "resize {}: {} -> {} (keep_aspect={})",
                    path.display(),
                    original,
                    to,
                    options.keep_aspect
                );
                self.raster = Some(raster);
                self.record(Operation::Resize { from: original, to });
            }
            None => self.raster = Some(decoded),
        }

        Ok(self)
    }

    // ── draw ──────────────────────────────────────────────────────────────

    /// Stamps this image onto `target` with its top-left corner at `(x, y)`.
    ///
    /// Blends when either side carries alpha, copies otherwise. Afterwards
    /// this image adopts the target's channel layout (3 on 4 gains an opaque
    /// alpha channel, 4 on 3 loses its alpha). Both logs record the draw with
    /// this image's size.
    ///
    /// Fails with `NotLoaded` or `OutOfBounds` before touching either image.
    pub fn draw_on(&mut self, target: &mut Image, x: i32, y: i32) -> Result<(), ImageError> {
        let (Some(src), Some(dst)) = (self.raster.as_mut(), target.raster.as_mut()) else {
            return Err(ImageError::NotLoaded);
        };

        let size = src.size();
        let placement = PixelRect::from_origin_size(x, y, size);
        if !placement.fits_within(dst.size()) {
            return Err(ImageError::OutOfBounds { placement, target: dst.size() });
        }

        let mode = CompositeMode::select(src.channels(), dst.channels());
        log::debug!(
            "draw {} ({} channels) onto {} ({} channels) at ({x},{y}): {:?}",
            size,
            src.channels().count(),
            dst.size(),
            dst.channels().count(),
            mode
        );
        composite(src, dst, x as u32, y as u32, mode);

        if src.channels() != dst.channels() {
            log::debug!(
                "source channels {} -> {}",
                src.channels().count(),
                dst.channels().count()
            );
            src.convert_channels(dst.channels());
        }

        self.record(Operation::Draw { size, x, y });
        target.record(Operation::DrawnOn { size, x, y });
        Ok(())
    }

    // ── text ──────────────────────────────────────────────────────────────

    /// Annotates the image with `text`, baseline starting at `(x, y)`.
    ///
    /// Glyphs are rasterized only when `style` names a font. Text running
    /// past the edges is clipped, never rejected.
    pub fn put_text(
        &mut self,
        text: &str,
        x: i32,
        y: i32,
        font_size: f32,
        style: &TextStyle<'_>,
    ) -> Result<(), ImageError> {
        let raster = self.raster.as_mut().ok_or(ImageError::NotLoaded)?;
        let glyphs = burn_text(raster, text, x, y, font_size, style);
        log::debug!("text '{text}' at ({x},{y}) size={font_size}: {glyphs} glyphs rasterized");

        self.record(Operation::Text { text: text.to_string(), x, y, font_size });
        Ok(())
    }

    // ── present ───────────────────────────────────────────────────────────

    /// Hands the image to `surface`. The log is left untouched.
    pub fn show<S>(&self, surface: &mut S) -> Result<SurfaceStatus, ImageError>
    where
        S: Surface + ?Sized,
    {
        if !self.is_loaded() {
            return Err(ImageError::NotLoaded);
        }
        surface.present(self)
    }
}
