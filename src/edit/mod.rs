use egui::Pos2;
use serde::{Deserialize, Serialize};

use crate::surface::RenderSurface;

pub(crate) mod sticker;
pub(crate) mod stroke;

pub use sticker::{STICKER_INK, STICKER_SIZE, Sticker};
pub use stroke::{Stroke, StrokeStyle};

/// A point in canvas-local coordinates
pub type Point = Pos2;

pub const PENCIL_WEIGHT: f32 = 2.0;
pub const MARKER_WEIGHT: f32 = 10.0;

/// The two line weights a stroke can be drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Thickness {
    #[default]
    Thin,
    Thick,
}

impl Thickness {
    /// Line width in canvas pixels
    pub fn weight(self) -> f32 {
        match self {
            Thickness::Thin => PENCIL_WEIGHT,
            Thickness::Thick => MARKER_WEIGHT,
        }
    }
}

/// Capabilities shared by every replayable drawing operation
pub trait Replayable {
    /// Draw onto `surface` with every coordinate and size multiplied by `scale`.
    /// Must not change `self` and must give identical pixels on every call.
    fn render(&self, surface: &mut dyn RenderSurface, scale: f32);

    /// Feed the next pointer position while the edit is being dragged
    fn extend(&mut self, point: Point);
}

/// One entry of the drawing history
#[derive(Debug, Clone, PartialEq)]
pub enum Edit {
    Stroke(Stroke),
    Sticker(Sticker),
}

impl Edit {
    pub fn stroke(start: Point, style: StrokeStyle) -> Self {
        Edit::Stroke(Stroke::new(start, style))
    }

    pub fn sticker(anchor: Point, glyph: impl Into<String>) -> Self {
        Edit::Sticker(Sticker::new(anchor, glyph))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Edit::Stroke(_) => "stroke",
            Edit::Sticker(_) => "sticker",
        }
    }

    pub fn as_stroke(&self) -> Option<&Stroke> {
        match self {
            Edit::Stroke(s) => Some(s),
            Edit::Sticker(_) => None,
        }
    }

    pub fn as_sticker(&self) -> Option<&Sticker> {
        match self {
            Edit::Sticker(s) => Some(s),
            Edit::Stroke(_) => None,
        }
    }
}

impl Replayable for Edit {
    fn render(&self, surface: &mut dyn RenderSurface, scale: f32) {
        match self {
            Edit::Stroke(s) => s.render(surface, scale),
            Edit::Sticker(s) => s.render(surface, scale),
        }
    }

    fn extend(&mut self, point: Point) {
        match self {
            Edit::Stroke(s) => s.extend(point),
            Edit::Sticker(s) => s.extend(point),
        }
    }
}

impl From<Stroke> for Edit {
    fn from(stroke: Stroke) -> Self {
        Edit::Stroke(stroke)
    }
}

impl From<Sticker> for Edit {
    fn from(sticker: Sticker) -> Self {
        Edit::Sticker(sticker)
    }
}
