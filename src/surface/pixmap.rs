use egui::{Color32, ColorImage, Pos2};
use tiny_skia::{
    FillRule, LineCap, LineJoin, Mask, Paint, PathBuilder, Pixmap, Rect, Stroke, Transform,
};

use super::{GlyphFont, Pen, RenderSurface, SurfaceError};

/// A CPU raster surface backed by a tiny-skia pixmap.
///
/// Used both as the live canvas (uploaded to an egui texture) and as the
/// offscreen export target.
#[derive(Clone)]
pub struct PixmapSurface {
    pixmap: Pixmap,
    font: GlyphFont,
}

impl std::fmt::Debug for PixmapSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixmapSurface")
            .field("width", &self.pixmap.width())
            .field("height", &self.pixmap.height())
            .finish()
    }
}

impl PixmapSurface {
    pub fn new(width: u32, height: u32, font: GlyphFont) -> Result<Self, SurfaceError> {
        let pixmap = Pixmap::new(width, height).ok_or(SurfaceError::InvalidSize { width, height })?;
        Ok(Self { pixmap, font })
    }

    pub fn font(&self) -> &GlyphFont {
        &self.font
    }

    /// Premultiplied RGBA bytes, row major
    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }

    /// Straight (un-premultiplied) color of one pixel
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color32> {
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some(Color32::from_rgba_unmultiplied(c.red(), c.green(), c.blue(), c.alpha()))
    }

    /// Straight RGBA bytes, row major
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut rgba = Vec::with_capacity(self.pixmap.data().len());
        for pixel in self.pixmap.pixels() {
            let c = pixel.demultiply();
            rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
        rgba
    }

    pub fn to_image(&self) -> image::RgbaImage {
        let (width, height) = (self.pixmap.width(), self.pixmap.height());
        image::RgbaImage::from_fn(width, height, |x, y| {
            let [r, g, b, a] = self
                .pixel(x, y)
                .map(|c| c.to_srgba_unmultiplied())
                .unwrap_or_default();
            image::Rgba([r, g, b, a])
        })
    }

    pub fn to_color_image(&self) -> ColorImage {
        let size = [self.pixmap.width() as usize, self.pixmap.height() as usize];
        ColorImage::from_rgba_unmultiplied(size, &self.to_rgba())
    }

    fn full_rect(&self) -> Option<Rect> {
        Rect::from_xywh(0.0, 0.0, self.pixmap.width() as f32, self.pixmap.height() as f32)
    }
}

fn paint_for(color: Color32, alpha: f32) -> Paint<'static> {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    let a = (a as f32 * alpha.clamp(0.0, 1.0)).round() as u8;

    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;
    paint
}

impl RenderSurface for PixmapSurface {
    fn width(&self) -> u32 {
        self.pixmap.width()
    }

    fn height(&self) -> u32 {
        self.pixmap.height()
    }

    fn clear(&mut self) {
        self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
    }

    fn stroke_polyline(&mut self, points: &[Pos2], pen: &Pen) {
        let paint = paint_for(pen.color, pen.alpha);

        match points {
            [] => {}
            [dot] => {
                if let Some(path) = PathBuilder::from_circle(dot.x, dot.y, pen.width / 2.0) {
                    self.pixmap
                        .fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
                }
            }
            [first, rest @ ..] => {
                let mut builder = PathBuilder::new();
                builder.move_to(first.x, first.y);
                for p in rest {
                    builder.line_to(p.x, p.y);
                }
                let Some(path) = builder.finish() else {
                    return;
                };

                let stroke = Stroke {
                    width: pen.width,
                    line_cap: LineCap::Round,
                    line_join: LineJoin::Round,
                    ..Stroke::default()
                };
                self.pixmap
                    .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
            }
        }
    }

    fn stroke_circle(&mut self, center: Pos2, radius: f32, pen: &Pen) {
        let Some(path) = PathBuilder::from_circle(center.x, center.y, radius) else {
            return;
        };
        let stroke = Stroke {
            width: pen.width,
            ..Stroke::default()
        };
        self.pixmap.stroke_path(
            &path,
            &paint_for(pen.color, pen.alpha),
            &stroke,
            Transform::identity(),
            None,
        );
    }

    fn fill_glyph(&mut self, text: &str, center: Pos2, size: f32, color: Color32, alpha: f32) {
        let glyphs = self.font.outline_centered(text, size, center);
        if glyphs.is_empty() {
            return;
        }

        let (width, height) = (self.pixmap.width(), self.pixmap.height());
        let Some(mut mask) = Mask::new(width, height) else {
            return;
        };
        let coverage = mask.data_mut();
        for glyph in &glyphs {
            let bounds = glyph.px_bounds();
            let (ox, oy) = (bounds.min.x as i64, bounds.min.y as i64);
            glyph.draw(|x, y, c| {
                let (px, py) = (ox + x as i64, oy + y as i64);
                if px < 0 || py < 0 || px >= width as i64 || py >= height as i64 {
                    return;
                }
                let idx = (py * width as i64 + px) as usize;
                let value = (c.clamp(0.0, 1.0) * 255.0).round() as u8;
                coverage[idx] = coverage[idx].max(value);
            });
        }

        if let Some(rect) = self.full_rect() {
            self.pixmap.fill_rect(
                rect,
                &paint_for(color, alpha),
                Transform::identity(),
                Some(&mask),
            );
        }
    }

    fn can_draw_glyph(&self, text: &str) -> bool {
        self.font.covers(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface(size: u32) -> PixmapSurface {
        PixmapSurface::new(size, size, GlyphFont::egui_defaults().unwrap()).unwrap()
    }

    #[test]
    fn test_zero_size_is_rejected() {
        let font = GlyphFont::egui_defaults().unwrap();
        assert!(matches!(
            PixmapSurface::new(0, 10, font),
            Err(SurfaceError::InvalidSize { width: 0, height: 10 })
        ));
    }

    #[test]
    fn test_polyline_covers_its_path() {
        let mut s = surface(64);
        let pen = Pen::new(6.0, Color32::RED, 1.0);
        s.stroke_polyline(&[Pos2::new(10.0, 32.0), Pos2::new(54.0, 32.0)], &pen);

        assert_eq!(s.pixel(32, 32).unwrap(), Color32::RED);
        assert_eq!(s.pixel(32, 5).unwrap().a(), 0);
    }

    #[test]
    fn test_single_point_draws_a_dot() {
        let mut s = surface(32);
        s.stroke_polyline(&[Pos2::new(16.0, 16.0)], &Pen::new(10.0, Color32::WHITE, 1.0));
        assert_eq!(s.pixel(16, 16).unwrap().a(), 255);
        assert_eq!(s.pixel(2, 2).unwrap().a(), 0);
    }

    #[test]
    fn test_clear_resets_to_transparent() {
        let mut s = surface(16);
        s.stroke_polyline(&[Pos2::new(0.0, 8.0), Pos2::new(16.0, 8.0)], &Pen::new(4.0, Color32::BLUE, 1.0));
        s.clear();
        assert!(s.data().iter().all(|b| *b == 0));
    }

    #[test]
    fn test_glyph_stays_near_its_center() {
        let mut s = surface(64);
        s.fill_glyph("H", Pos2::new(32.0, 32.0), 20.0, Color32::WHITE, 1.0);

        let mut inside = 0;
        for y in 0..64 {
            for x in 0..64 {
                let a = s.pixel(x, y).unwrap().a();
                let near = (16..48).contains(&x) && (16..48).contains(&y);
                if near {
                    inside += usize::from(a > 0);
                } else {
                    assert_eq!(a, 0, "ink outside the glyph box at {x},{y}");
                }
            }
        }
        assert!(inside > 0);
    }
}
