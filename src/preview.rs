use egui::Pos2;

use crate::edit::{STICKER_INK, STICKER_SIZE};
use crate::surface::{Pen, RenderSurface};
use crate::tool::{ToolMode, ToolState};

pub const PREVIEW_ALPHA: f32 = 0.25;
pub const RING_RADIUS: f32 = 15.0;

/// Transient hover feedback drawn over the committed drawing. Never recorded in history.
#[derive(Debug, Clone, PartialEq)]
pub enum Preview {
    /// Outline showing where and how thick a stroke would start
    Ring { center: Pos2, radius: f32, pen: Pen },
    /// Faded copy of the sticker that a click would place
    Ghost { center: Pos2, glyph: String, size: f32 },
}

/// Preview for a pointer hovering at `position` with the given tool selection
pub fn compute_preview(position: Pos2, tools: &ToolState) -> Preview {
    match tools.mode() {
        ToolMode::Sticker { glyph } => Preview::Ghost {
            center: position,
            glyph: glyph.clone(),
            size: STICKER_SIZE,
        },
        ToolMode::Stroke(thickness) => Preview::Ring {
            center: position,
            radius: RING_RADIUS,
            pen: Pen::new(thickness.weight(), tools.color(), PREVIEW_ALPHA),
        },
    }
}

impl Preview {
    pub fn center(&self) -> Pos2 {
        match self {
            Preview::Ring { center, .. } | Preview::Ghost { center, .. } => *center,
        }
    }

    /// Paint the overlay at canvas scale
    pub fn draw(&self, surface: &mut dyn RenderSurface) {
        match self {
            Preview::Ring { center, radius, pen } => surface.stroke_circle(*center, *radius, pen),
            Preview::Ghost { center, glyph, size } => {
                surface.fill_glyph(glyph, *center, *size, STICKER_INK, PREVIEW_ALPHA)
            }
        }
    }
}
