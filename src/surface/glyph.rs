use std::path::Path;

use ab_glyph::{Font, FontArc, GlyphId, OutlinedGlyph, PxScale, ScaleFont, point};
use egui::{FontDefinitions, FontFamily, Pos2};
use thiserror::Error;

/// Errors that can occur while loading glyph faces
#[derive(Debug, Error)]
pub enum FontError {
    #[error("failed to read font file: {0}")]
    Read(#[from] std::io::Error),
    #[error("font {name} could not be parsed: {source}")]
    Invalid {
        name: String,
        #[source]
        source: ab_glyph::InvalidFont,
    },
    #[error("no usable font faces were found")]
    NoFaces,
}

/// An ordered fallback chain of font faces used to rasterize sticker glyphs.
///
/// Each character is drawn with the first face that has a glyph for it.
#[derive(Clone)]
pub struct GlyphFont {
    faces: Vec<FontArc>,
}

impl std::fmt::Debug for GlyphFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlyphFont")
            .field("faces", &self.faces.len())
            .finish()
    }
}

impl GlyphFont {
    /// Load the proportional family bundled with egui, in egui's fallback order
    pub fn egui_defaults() -> Result<Self, FontError> {
        let definitions = FontDefinitions::default();
        let names = definitions
            .families
            .get(&FontFamily::Proportional)
            .cloned()
            .unwrap_or_default();

        let mut faces = Vec::with_capacity(names.len());
        for name in names {
            let Some(data) = definitions.font_data.get(&name) else {
                log::warn!("Font {} is listed but has no data", name);
                continue;
            };
            let face = FontArc::try_from_vec(data.font.to_vec())
                .map_err(|source| FontError::Invalid { name, source })?;
            faces.push(face);
        }

        if faces.is_empty() {
            return Err(FontError::NoFaces);
        }
        Ok(Self { faces })
    }

    /// Load a font file and put it in front of the egui defaults
    pub fn with_primary_file(path: &Path) -> Result<Self, FontError> {
        let bytes = std::fs::read(path)?;
        let primary = FontArc::try_from_vec(bytes).map_err(|source| FontError::Invalid {
            name: path.display().to_string(),
            source,
        })?;

        let mut font = Self::egui_defaults()?;
        font.faces.insert(0, primary);
        log::info!("Loaded sticker font from {}", path.display());
        Ok(font)
    }

    fn face_for(&self, ch: char) -> Option<&FontArc> {
        self.faces.iter().find(|face| face.glyph_id(ch) != GlyphId(0))
    }

    /// Whether every visible character of `text` has a face in the chain
    pub fn covers(&self, text: &str) -> bool {
        let mut visible = text.chars().filter(|ch| !is_invisible(*ch)).peekable();
        visible.peek().is_some() && visible.all(|ch| self.face_for(ch).is_some())
    }

    /// Lay out `text` on one line and outline it so that its ink box is centered on `center`.
    pub fn outline_centered(&self, text: &str, size: f32, center: Pos2) -> Vec<OutlinedGlyph> {
        let scale = PxScale::from(size);

        let mut placed = Vec::new();
        let mut caret = 0.0;
        for ch in text.chars() {
            let Some(face) = self.face_for(ch) else {
                continue;
            };
            let id = face.glyph_id(ch);
            placed.push((face, id, caret));
            caret += face.as_scaled(scale).h_advance(id);
        }

        let outline_at = |dx: f32, dy: f32| -> Vec<OutlinedGlyph> {
            placed
                .iter()
                .filter_map(|(face, id, x)| {
                    face.outline_glyph(id.with_scale_and_position(scale, point(x + dx, dy)))
                })
                .collect()
        };

        let probe = outline_at(0.0, 0.0);
        let Some((min, max)) = ink_bounds(&probe) else {
            return Vec::new();
        };

        let dx = center.x - (min.x + max.x) / 2.0;
        let dy = center.y - (min.y + max.y) / 2.0;
        outline_at(dx, dy)
    }
}

/// Joiners and variation selectors only modify their neighbours
fn is_invisible(ch: char) -> bool {
    ch.is_whitespace() || ch == '\u{200D}' || ('\u{FE00}'..='\u{FE0F}').contains(&ch)
}

fn ink_bounds(glyphs: &[OutlinedGlyph]) -> Option<(Pos2, Pos2)> {
    glyphs.iter().map(OutlinedGlyph::px_bounds).fold(None, |acc, b| {
        let (lo, hi) = (Pos2::new(b.min.x, b.min.y), Pos2::new(b.max.x, b.max.y));
        Some(match acc {
            None => (lo, hi),
            Some((min, max)) => (min.min(lo), max.max(hi)),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_egui_defaults_load() {
        let font = GlyphFont::egui_defaults().unwrap();
        assert!(!font.faces.is_empty());
    }

    #[test]
    fn test_outline_is_centered() {
        let font = GlyphFont::egui_defaults().unwrap();
        let center = Pos2::new(100.0, 80.0);
        let glyphs = font.outline_centered("H", 30.0, center);
        let (min, max) = ink_bounds(&glyphs).unwrap();

        assert!(((min.x + max.x) / 2.0 - center.x).abs() < 1.0);
        assert!(((min.y + max.y) / 2.0 - center.y).abs() < 1.0);
    }

    #[test]
    fn test_uncovered_characters_are_skipped() {
        let font = GlyphFont::egui_defaults().unwrap();
        // A lone variation selector has no ink in any face
        assert!(font.outline_centered("\u{FE0F}", 30.0, Pos2::ZERO).is_empty());
        assert!(font.outline_centered("", 30.0, Pos2::ZERO).is_empty());
    }

    #[test]
    fn test_covers_only_drawable_text() {
        let font = GlyphFont::egui_defaults().unwrap();
        assert!(font.covers("H"));
        assert!(font.covers("bird"));
        assert!(font.covers("🕊\u{FE0F}"));

        assert!(!font.covers(""));
        assert!(!font.covers(" \u{FE0F}"));
        // Newer than the bundled emoji face
        assert!(!font.covers("🥚"));
        assert!(!font.covers("H🥚"));
    }
}
