use crate::coords::Size;
use crate::paint::Color;

/// Number of interleaved samples per pixel.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Channels {
    /// Opaque color, `r g b`.
    Rgb = 3,
    /// Color plus straight alpha, `r g b a`.
    Rgba = 4,
}

impl Channels {
    #[inline]
    pub const fn count(self) -> usize {
        self as usize
    }

    #[inline]
    pub const fn has_alpha(self) -> bool {
        matches!(self, Channels::Rgba)
    }

    #[inline]
    pub fn from_count(count: usize) -> Option<Self> {
        match count {
            3 => Some(Channels::Rgb),
            4 => Some(Channels::Rgba),
            _ => None,
        }
    }
}

/// Owned pixel buffer.
///
/// Invariant: `samples.len() == width * height * channels`. Samples are
/// row-major with interleaved channels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    size: Size,
    channels: Channels,
    samples: Vec<u8>,
}

impl Raster {
    /// Zero-filled raster (black; fully transparent when it has alpha).
    pub fn blank(size: Size, channels: Channels) -> Self {
        Self {
            size,
            channels,
            samples: vec![0; size.area() * channels.count()],
        }
    }

    /// Raster with every pixel set to `color`.
    pub fn filled(size: Size, channels: Channels, color: Color) -> Self {
        let px = [color.r, color.g, color.b, color.a];
        let px = &px[..channels.count()];
        let mut samples = Vec::with_capacity(size.area() * channels.count());
        for _ in 0..size.area() {
            samples.extend_from_slice(px);
        }
        Self { size, channels, samples }
    }

    /// Wraps existing samples, or returns `None` if their length does not
    /// match `size` and `channels`.
    pub fn from_samples(size: Size, channels: Channels, samples: Vec<u8>) -> Option<Self> {
        if samples.len() != size.area() * channels.count() {
            return None;
        }
        Some(Self { size, channels, samples })
    }

    #[inline]
    pub fn size(&self) -> Size {
        self.size
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.size.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.size.height
    }

    #[inline]
    pub fn channels(&self) -> Channels {
        self.channels
    }

    #[inline]
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    /// Bytes per row.
    #[inline]
    pub fn stride(&self) -> usize {
        self.size.width as usize * self.channels.count()
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        Some(y as usize * self.stride() + x as usize * self.channels.count())
    }

    /// Samples of the pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        let i = self.offset(x, y)?;
        Some(&self.samples[i..i + self.channels.count()])
    }

    pub(crate) fn pixel_mut(&mut self, x: u32, y: u32) -> Option<&mut [u8]> {
        let i = self.offset(x, y)?;
        let n = self.channels.count();
        Some(&mut self.samples[i..i + n])
    }

    /// Samples of row `y`, starting at column `x`, spanning `width` pixels.
    pub(crate) fn row_span(&self, x: u32, y: u32, width: u32) -> &[u8] {
        let start = y as usize * self.stride() + x as usize * self.channels.count();
        &self.samples[start..start + width as usize * self.channels.count()]
    }

    pub(crate) fn row_span_mut(&mut self, x: u32, y: u32, width: u32) -> &mut [u8] {
        let n = self.channels.count();
        let start = y as usize * self.stride() + x as usize * n;
        &mut self.samples[start..start + width as usize * n]
    }

    /// Rewrites the buffer in another channel layout.
    ///
    /// Adding alpha makes every pixel opaque; dropping alpha discards it.
    pub fn convert_channels(&mut self, channels: Channels) {
        if channels == self.channels {
            return;
        }

        let samples = match channels {
            Channels::Rgba => {
                let mut out = Vec::with_capacity(self.size.area() * 4);
                for px in self.samples.chunks_exact(3) {
                    out.extend_from_slice(px);
                    out.push(255);
                }
                out
            }
            Channels::Rgb => {
                let mut out = Vec::with_capacity(self.size.area() * 3);
                for px in self.samples.chunks_exact(4) {
                    out.extend_from_slice(&px[..3]);
                }
                out
            }
        };

        self.samples = samples;
        self.channels = channels;
    }
}
