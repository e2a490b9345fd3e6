use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::edit::{Edit, Point, StrokeStyle, Thickness};

/// What a pointer-down on the canvas creates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToolMode {
    Stroke(Thickness),
    Sticker { glyph: String },
}

impl Default for ToolMode {
    fn default() -> Self {
        ToolMode::Stroke(Thickness::Thin)
    }
}

/// The user's current tool selection.
///
/// Edits copy what they need out of this when they are created and never look
/// at it again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolState {
    mode: ToolMode,
    color: Color32,
    opacity: u8,
}

impl Default for ToolState {
    fn default() -> Self {
        Self {
            mode: ToolMode::default(),
            color: Color32::WHITE,
            opacity: 100,
        }
    }
}

impl ToolState {
    pub fn new(color: Color32) -> Self {
        Self {
            color,
            ..Self::default()
        }
    }

    pub fn mode(&self) -> &ToolMode {
        &self.mode
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn opacity(&self) -> u8 {
        self.opacity
    }

    pub fn sticker(&self) -> Option<&str> {
        match &self.mode {
            ToolMode::Sticker { glyph } => Some(glyph),
            ToolMode::Stroke(_) => None,
        }
    }

    pub fn thickness(&self) -> Option<Thickness> {
        match self.mode {
            ToolMode::Stroke(thickness) => Some(thickness),
            ToolMode::Sticker { .. } => None,
        }
    }

    pub fn select_thickness(&mut self, thickness: Thickness) {
        self.mode = ToolMode::Stroke(thickness);
    }

    /// Switch to sticker mode. Blank glyphs are refused.
    pub fn select_sticker(&mut self, glyph: &str) -> bool {
        let glyph = glyph.trim();
        if glyph.is_empty() {
            log::warn!("Refusing to select an empty sticker");
            return false;
        }
        self.mode = ToolMode::Sticker {
            glyph: glyph.to_owned(),
        };
        true
    }

    pub fn set_color(&mut self, color: Color32) {
        self.color = color;
    }

    pub fn set_opacity(&mut self, opacity: u8) {
        self.opacity = opacity.clamp(1, 100);
    }

    /// Snapshot of the settings a new stroke is drawn with
    pub fn stroke_style(&self) -> StrokeStyle {
        StrokeStyle::new(
            self.thickness().unwrap_or_default(),
            self.opacity,
            self.color,
        )
    }

    /// Build the edit a pointer-down at `point` starts
    pub fn create_edit(&self, point: Point) -> Edit {
        match &self.mode {
            ToolMode::Stroke(_) => Edit::stroke(point, self.stroke_style()),
            ToolMode::Sticker { glyph } => Edit::sticker(point, glyph.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn test_create_edit_follows_mode() {
        let mut tools = ToolState::new(Color32::RED);
        tools.select_thickness(Thickness::Thick);
        let edit = tools.create_edit(pos2(1.0, 2.0));
        let stroke = edit.as_stroke().unwrap();
        assert_eq!(stroke.style().thickness, Thickness::Thick);
        assert_eq!(stroke.style().color, Color32::RED);

        assert!(tools.select_sticker("🦢"));
        let edit = tools.create_edit(pos2(1.0, 2.0));
        assert_eq!(edit.as_sticker().unwrap().glyph(), "🦢");
    }

    #[test]
    fn test_blank_sticker_is_refused() {
        let mut tools = ToolState::default();
        assert!(!tools.select_sticker("   "));
        assert_eq!(tools.mode(), &ToolMode::Stroke(Thickness::Thin));
    }

    #[test]
    fn test_style_is_a_snapshot() {
        let mut tools = ToolState::default();
        let edit = tools.create_edit(pos2(0.0, 0.0));
        tools.set_color(Color32::BLUE);
        tools.set_opacity(10);
        let style = edit.as_stroke().unwrap().style();
        assert_eq!(style.color, Color32::WHITE);
        assert_eq!(style.opacity, 100);
    }

    #[test]
    fn test_persisted_state_roundtrips_through_json() {
        let mut tools = ToolState::new(Color32::from_rgb(10, 20, 30));
        tools.select_sticker("🥚");
        tools.set_opacity(42);
        let json = serde_json::to_string(&tools).unwrap();
        let restored: ToolState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, tools);
    }
}
