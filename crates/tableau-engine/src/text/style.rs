use crate::paint::Color;

use super::{FontId, FontSystem};

/// A font selected from a [`FontSystem`].
#[derive(Copy, Clone)]
pub struct FontFace<'a> {
    pub fonts: &'a FontSystem,
    pub id: FontId,
}

/// Appearance of a text annotation.
///
/// Without a font the annotation is only recorded in the operation log.
#[derive(Copy, Clone)]
pub struct TextStyle<'a> {
    pub color: Color,
    /// Stroke width in pixels; `0` is treated as `1`, widths above 32 as 32.
    pub thickness: u32,
    pub font: Option<FontFace<'a>>,
}

impl Default for TextStyle<'_> {
    fn default() -> Self {
        Self { color: Color::white(), thickness: 1, font: None }
    }
}

impl<'a> TextStyle<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(mut self, color: impl Into<Color>) -> Self {
        self.color = color.into();
        self
    }

    pub fn thickness(mut self, thickness: u32) -> Self {
        self.thickness = thickness;
        self
    }

    pub fn font(mut self, fonts: &'a FontSystem, id: FontId) -> Self {
        self.font = Some(FontFace { fonts, id });
        self
    }
}
