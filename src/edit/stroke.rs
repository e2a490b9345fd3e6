use egui::Color32;
use serde::{Deserialize, Serialize};

use super::{Point, Replayable, Thickness};
use crate::surface::{Pen, RenderSurface, scaled};

/// Everything a stroke needs from the tool selection, frozen when the stroke begins
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub thickness: Thickness,
    /// 1..=100
    pub opacity: u8,
    pub color: Color32,
}

impl StrokeStyle {
    pub fn new(thickness: Thickness, opacity: u8, color: Color32) -> Self {
        Self {
            thickness,
            opacity: opacity.clamp(1, 100),
            color,
        }
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::new(Thickness::Thin, 100, Color32::WHITE)
    }
}

/// Freehand polyline built from the pointer positions of one drag
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    points: Vec<Point>,
    style: StrokeStyle,
}

impl Stroke {
    pub fn new(start: Point, style: StrokeStyle) -> Self {
        Self {
            points: vec![start],
            style,
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn style(&self) -> StrokeStyle {
        self.style
    }

    fn pen(&self, scale: f32) -> Pen {
        Pen::new(
            self.style.thickness.weight() * scale,
            self.style.color,
            f32::from(self.style.opacity) / 100.0,
        )
    }
}

impl Replayable for Stroke {
    fn render(&self, surface: &mut dyn RenderSurface, scale: f32) {
        let points: Vec<Point> = self.points.iter().map(|p| scaled(*p, scale)).collect();
        surface.stroke_polyline(&points, &self.pen(scale));
    }

    fn extend(&mut self, point: Point) {
        self.points.push(point);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn test_extend_appends_points() {
        let mut stroke = Stroke::new(pos2(1.0, 1.0), StrokeStyle::default());
        stroke.extend(pos2(2.0, 3.0));
        stroke.extend(pos2(2.0, 3.0));
        assert_eq!(stroke.points(), &[pos2(1.0, 1.0), pos2(2.0, 3.0), pos2(2.0, 3.0)]);
    }

    #[test]
    fn test_opacity_is_clamped() {
        assert_eq!(StrokeStyle::new(Thickness::Thick, 0, Color32::RED).opacity, 1);
        assert_eq!(StrokeStyle::new(Thickness::Thick, 250, Color32::RED).opacity, 100);
    }

    #[test]
    fn test_pen_scales_with_weight() {
        let stroke = Stroke::new(pos2(0.0, 0.0), StrokeStyle::new(Thickness::Thick, 50, Color32::RED));
        let pen = stroke.pen(4.0);
        assert_eq!(pen.width, 40.0);
        assert_eq!(pen.alpha, 0.5);
    }
}
