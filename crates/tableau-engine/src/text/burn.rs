use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle as GlyphRun};

use crate::coords::PixelRect;
use crate::image::{Raster, blend_pixel};
use crate::paint::Color;

use super::{PIXELS_PER_FONT_UNIT, TextStyle};

/// Upper bound on the stroke grid side; wider strokes are clamped.
const MAX_STROKE: u32 = 32;

/// Blends `text` into `raster` with its baseline starting at `(x, y)`.
///
/// Glyph pixels outside the raster are clipped. Returns the number of glyphs
/// stamped; a style without a font stamps nothing.
pub(crate) fn burn_text(
    raster: &mut Raster,
    text: &str,
    x: i32,
    y: i32,
    font_size: f32,
    style: &TextStyle<'_>,
) -> usize {
    let Some(face) = style.font else { return 0 };
    let Some(font) = face.fonts.get(face.id) else {
        log::warn!("put_text: unknown FontId {:?}, text not rasterized", face.id);
        return 0;
    };

    let px = font_size * PIXELS_PER_FONT_UNIT;
    if !px.is_finite() || px <= 0.0 {
        return 0;
    }

    let ascent = font.horizontal_line_metrics(px).map_or(px, |m| m.ascent);

    let mut layout: Layout<()> = Layout::new(CoordinateSystem::PositiveYDown);
    layout.reset(&LayoutSettings {
        x: x as f32,
        y: y as f32 - ascent,
        ..LayoutSettings::default()
    });
    layout.append(&[font], &GlyphRun::new(text, px, 0));

    let canvas = PixelRect::from_origin_size(0, 0, raster.size());
    let stroke = style.thickness.clamp(1, MAX_STROKE) as i32;
    let mut stamped = 0;

    for g in layout.glyphs() {
        if !g.char_data.rasterize() || g.width == 0 || g.height == 0 {
            continue;
        }
        let (metrics, coverage) = font.rasterize_config(g.key);
        if metrics.width == 0 || metrics.height == 0 {
            continue;
        }

        let gx = g.x.round() as i32;
        let gy = g.y.round() as i32;
        for dy in 0..stroke {
            for dx in 0..stroke {
                // Origins past the i32 range can never reach the canvas.
                let (Some(ox), Some(oy)) = (gx.checked_add(dx), gy.checked_add(dy)) else {
                    continue;
                };
                let mask = GlyphMask {
                    coverage: &coverage,
                    width: metrics.width,
                    rect: PixelRect::new(ox, oy, metrics.width as u32, metrics.height as u32),
                };
                mask.stamp(raster, canvas, style.color);
            }
        }
        stamped += 1;
    }

    stamped
}

struct GlyphMask<'a> {
    coverage: &'a [u8],
    width: usize,
    rect: PixelRect,
}

impl GlyphMask<'_> {
    fn stamp(&self, raster: &mut Raster, canvas: PixelRect, color: Color) {
        let Some(clip) = self.rect.intersect(canvas) else { return };

        for py in clip.y..clip.y + clip.height as i32 {
            let row = (py - self.rect.y) as usize * self.width;
            for px in clip.x..clip.x + clip.width as i32 {
                let cov = self.coverage[row + (px - self.rect.x) as usize];
                if cov == 0 {
                    continue;
                }
                blend_pixel(raster, px as u32, py as u32, color.with_coverage(cov));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Size;
    use crate::image::Channels;
    use crate::text::{FontId, FontSystem};

    const MONO: &[u8] = include_bytes!("../../tests/fonts/DejaVuSansMono.ttf");

    fn fonts() -> (FontSystem, FontId) {
        let mut fonts = FontSystem::new();
        let id = fonts.load_font(MONO).unwrap();
        (fonts, id)
    }

    fn canvas(w: u32, h: u32) -> Raster {
        Raster::blank(Size::new(w, h), Channels::Rgb)
    }

    /// Coordinates of every pixel with a non-zero sample.
    fn lit(raster: &Raster) -> Vec<(u32, u32)> {
        let mut out = Vec::new();
        for y in 0..raster.height() {
            for x in 0..raster.width() {
                if raster.pixel(x, y).is_some_and(|p| p.iter().any(|&s| s != 0)) {
                    out.push((x, y));
                }
            }
        }
        out
    }

    // ── rasterization ─────────────────────────────────────────────────────

    #[test]
    fn glyph_pixels_land_above_the_baseline() {
        let (fonts, id) = fonts();
        let mut raster = canvas(60, 40);

        let stamped = burn_text(&mut raster, "H", 5, 30, 1.0, &TextStyle::new().font(&fonts, id));

        assert_eq!(stamped, 1);
        let pixels = lit(&raster);
        assert!(!pixels.is_empty());
        for (x, y) in pixels {
            assert!((4..5 + 24).contains(&x), "x={x} outside the glyph box");
            assert!((30 - 24 - 2..=31).contains(&y), "y={y} outside the glyph box");
        }
    }

    #[test]
    fn every_visible_glyph_is_counted() {
        let (fonts, id) = fonts();
        let mut raster = canvas(80, 40);
        let stamped = burn_text(&mut raster, "HI", 2, 30, 1.0, &TextStyle::new().font(&fonts, id));
        assert_eq!(stamped, 2);
    }

    #[test]
    fn style_without_font_leaves_pixels() {
        let mut raster = canvas(20, 20);
        assert_eq!(burn_text(&mut raster, "H", 2, 15, 1.0, &TextStyle::new()), 0);
        assert!(lit(&raster).is_empty());
    }

    #[test]
    fn color_alpha_scales_the_blend() {
        let (fonts, id) = fonts();
        let peak = |alpha: u8| {
            let mut raster = canvas(60, 40);
            let style = TextStyle::new().color([255, 255, 255, alpha]).font(&fonts, id);
            burn_text(&mut raster, "H", 5, 30, 1.0, &style);
            raster.samples().iter().copied().max().unwrap_or(0)
        };

        let full = peak(255);
        let half = peak(128);
        assert!(full >= 250, "opaque peak {full}");
        assert!(half > full / 4 && half <= 128, "half-alpha peak {half}");
    }

    // ── thickness ─────────────────────────────────────────────────────────

    #[test]
    fn thicker_strokes_cover_more_pixels() {
        let (fonts, id) = fonts();
        let coverage = |thickness: u32| {
            let mut raster = canvas(60, 40);
            let style = TextStyle::new().thickness(thickness).font(&fonts, id);
            burn_text(&mut raster, "H", 5, 30, 1.0, &style);
            lit(&raster).len()
        };

        assert!(coverage(2) > coverage(1));
        assert_eq!(coverage(0), coverage(1));
    }

    #[test]
    fn huge_thickness_is_clamped_and_still_draws() {
        let (fonts, id) = fonts();
        let mut raster = canvas(60, 40);
        let style = TextStyle::new().thickness(u32::MAX).font(&fonts, id);

        burn_text(&mut raster, "H", 5, 30, 1.0, &style);

        assert!(!lit(&raster).is_empty());
    }

    // ── clipping ──────────────────────────────────────────────────────────

    #[test]
    fn text_crossing_the_left_edge_is_clipped() {
        let (fonts, id) = fonts();
        let mut raster = canvas(30, 40);
        let style = TextStyle::new().thickness(2).font(&fonts, id);

        burn_text(&mut raster, "HHH", -20, 30, 1.0, &style);

        assert_eq!(raster.samples().len(), 30 * 40 * 3);
        assert!(!lit(&raster).is_empty());
    }

    #[test]
    fn origins_at_the_i32_limits_draw_nothing() {
        let (fonts, id) = fonts();
        let style = TextStyle::new().thickness(3).font(&fonts, id);

        for (x, y) in [(i32::MAX, 10), (10, i32::MAX), (i32::MIN, 10), (i32::MAX, i32::MAX)] {
            let mut raster = canvas(50, 50);
            burn_text(&mut raster, "W", x, y, 1.0, &style);
            assert!(lit(&raster).is_empty(), "origin ({x},{y}) wrote pixels");
        }
    }

    #[test]
    fn text_below_the_canvas_draws_nothing() {
        let (fonts, id) = fonts();
        let mut raster = canvas(50, 50);
        burn_text(&mut raster, "W", 0, 500, 1.0, &TextStyle::new().font(&fonts, id));
        assert!(lit(&raster).is_empty());
    }
}
