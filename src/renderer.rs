// src/renderer.rs
use crate::edit::{Edit, Replayable};
use crate::preview::Preview;
use crate::surface::RenderSurface;

/// Full-redraw renderer for the drawing history
#[derive(Debug, Default)]
pub struct Renderer {
    frames: u64,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paints `edits` onto a cleared surface, oldest first, so later edits land on top.
    ///
    /// Takes no `&self`: export replays through this without touching the live renderer.
    ///
    /// Args:
    ///     surface: The target to draw into; its previous contents are discarded
    ///     edits: Committed edits, oldest first
    ///     scale: Factor applied to every coordinate and size
    pub fn replay(surface: &mut dyn RenderSurface, edits: &[Edit], scale: f32) {
        surface.clear();
        for edit in edits {
            edit.render(surface, scale);
        }
    }

    /// Redraws the live surface at canvas scale
    ///
    /// Args:
    ///     surface: The live canvas surface
    ///     edits: Committed edits, oldest first
    pub fn redraw(&mut self, surface: &mut dyn RenderSurface, edits: &[Edit]) {
        self.redraw_with_overlay(surface, edits, None);
    }

    /// Redraws the live surface, then paints a hover preview on top
    ///
    /// Args:
    ///     surface: The live canvas surface
    ///     edits: Committed edits, oldest first
    ///     overlay: Preview to draw after the edits, if any
    pub fn redraw_with_overlay(
        &mut self,
        surface: &mut dyn RenderSurface,
        edits: &[Edit],
        overlay: Option<&Preview>,
    ) {
        Self::replay(surface, edits, 1.0);
        if let Some(preview) = overlay {
            preview.draw(surface);
        }

        self.frames += 1;
        log::trace!(
            "Redraw #{}: {} edits, preview: {}",
            self.frames,
            edits.len(),
            overlay.is_some()
        );
    }

    /// Number of redraws performed on the live surface
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit::StrokeStyle;
    use egui::{Color32, Pos2, pos2};

    use crate::surface::Pen;

    /// Records draw calls instead of rasterizing them
    #[derive(Default)]
    struct RecordingSurface {
        calls: Vec<String>,
    }

    impl RenderSurface for RecordingSurface {
        fn width(&self) -> u32 {
            100
        }

        fn height(&self) -> u32 {
            100
        }

        fn clear(&mut self) {
            self.calls.clear();
            self.calls.push("clear".to_owned());
        }

        fn stroke_polyline(&mut self, points: &[Pos2], pen: &Pen) {
            self.calls.push(format!("line {points:?} w={}", pen.width));
        }

        fn stroke_circle(&mut self, center: Pos2, radius: f32, _pen: &Pen) {
            self.calls.push(format!("circle {center:?} r={radius}"));
        }

        fn fill_glyph(&mut self, text: &str, center: Pos2, size: f32, _color: Color32, alpha: f32) {
            self.calls.push(format!("glyph {text} {center:?} s={size} a={alpha}"));
        }

        fn can_draw_glyph(&self, _text: &str) -> bool {
            true
        }
    }

    fn sample_edits() -> Vec<Edit> {
        let mut stroke = Edit::stroke(pos2(1.0, 1.0), StrokeStyle::default());
        stroke.extend(pos2(2.0, 2.0));
        vec![stroke, Edit::sticker(pos2(5.0, 5.0), "A")]
    }

    #[test]
    fn test_redraw_paints_in_order() {
        let mut surface = RecordingSurface::default();
        let mut renderer = Renderer::new();
        renderer.redraw(&mut surface, &sample_edits());

        assert_eq!(surface.calls.len(), 3);
        assert_eq!(surface.calls[0], "clear");
        assert!(surface.calls[1].starts_with("line"));
        assert!(surface.calls[2].starts_with("glyph A"));
        assert_eq!(renderer.frames(), 1);
    }

    #[test]
    fn test_replay_scales_everything() {
        let mut surface = RecordingSurface::default();
        Renderer::replay(&mut surface, &sample_edits(), 4.0);

        assert_eq!(surface.calls[1], format!("line {:?} w=8", [pos2(4.0, 4.0), pos2(8.0, 8.0)]));
        assert_eq!(surface.calls[2], format!("glyph A {:?} s=120 a=1", pos2(20.0, 20.0)));
    }

    #[test]
    fn test_overlay_is_drawn_last() {
        let mut surface = RecordingSurface::default();
        let mut renderer = Renderer::new();
        let preview = Preview::Ghost {
            center: pos2(3.0, 3.0),
            glyph: "B".to_owned(),
            size: 30.0,
        };
        renderer.redraw_with_overlay(&mut surface, &sample_edits(), Some(&preview));

        assert!(surface.calls.last().unwrap().starts_with("glyph B"));

        renderer.redraw(&mut surface, &sample_edits());
        assert!(surface.calls.iter().all(|c| !c.starts_with("glyph B")));
        assert_eq!(renderer.frames(), 2);
    }
}
