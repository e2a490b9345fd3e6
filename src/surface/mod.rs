use egui::{Color32, Pos2};
use thiserror::Error;

mod glyph;
mod pixmap;

pub use glyph::{FontError, GlyphFont};
pub use pixmap::PixmapSurface;

/// Errors that can occur while creating a render surface
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("invalid surface size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
}

/// Line settings handed to a surface for one draw call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pen {
    pub width: f32,
    pub color: Color32,
    /// Multiplies the color's own alpha, 0.0..=1.0
    pub alpha: f32,
}

impl Pen {
    pub fn new(width: f32, color: Color32, alpha: f32) -> Self {
        Self {
            width,
            color,
            alpha: alpha.clamp(0.0, 1.0),
        }
    }
}

/// A pixel target that edits and previews draw into.
///
/// Coordinates are surface pixels. Implementations must be deterministic:
/// the same sequence of calls on a cleared surface yields the same pixels.
pub trait RenderSurface {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Reset every pixel to fully transparent
    fn clear(&mut self);

    /// Draw a round-capped, round-joined polyline. A single point draws a dot.
    fn stroke_polyline(&mut self, points: &[Pos2], pen: &Pen);

    /// Draw the outline of a circle
    fn stroke_circle(&mut self, center: Pos2, radius: f32, pen: &Pen);

    /// Draw a run of glyphs whose ink box is centered on `center`
    fn fill_glyph(&mut self, text: &str, center: Pos2, size: f32, color: Color32, alpha: f32);

    /// Whether `fill_glyph` would leave ink for every visible character of `text`
    fn can_draw_glyph(&self, text: &str) -> bool;
}

/// Scale a point from canvas space into surface space
pub(crate) fn scaled(point: Pos2, scale: f32) -> Pos2 {
    Pos2::new(point.x * scale, point.y * scale)
}
