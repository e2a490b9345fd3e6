use egui::Color32;

use super::{Point, Replayable};
use crate::surface::{RenderSurface, scaled};

/// Glyph size of a placed sticker, in canvas pixels
pub const STICKER_SIZE: f32 = 30.0;

/// Stickers are stamped in a fixed ink, independent of the stroke color.
/// Chosen to read against the dark paper backdrop behind the transparent canvas.
pub const STICKER_INK: Color32 = Color32::WHITE;

/// A single glyph stamped at a movable anchor
#[derive(Debug, Clone, PartialEq)]
pub struct Sticker {
    anchor: Point,
    glyph: String,
}

impl Sticker {
    pub fn new(anchor: Point, glyph: impl Into<String>) -> Self {
        Self {
            anchor,
            glyph: glyph.into(),
        }
    }

    pub fn anchor(&self) -> Point {
        self.anchor
    }

    pub fn glyph(&self) -> &str {
        &self.glyph
    }
}

impl Replayable for Sticker {
    fn render(&self, surface: &mut dyn RenderSurface, scale: f32) {
        surface.fill_glyph(
            &self.glyph,
            scaled(self.anchor, scale),
            STICKER_SIZE * scale,
            STICKER_INK,
            1.0,
        );
    }

    /// Dragging relocates the sticker rather than leaving a trail
    fn extend(&mut self, point: Point) {
        self.anchor = point;
    }
}
