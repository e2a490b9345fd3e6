use std::io::Cursor;
use std::path::Path;

use image::ImageFormat;
use thiserror::Error;

use crate::config::MAX_SIDE;
use crate::sketchpad::Sketchpad;
use crate::surface::{GlyphFont, PixmapSurface, RenderSurface, SurfaceError};

/// Errors that can occur while exporting the drawing
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Invalid export size {width}x{height} (expected 1..={max} per side)", max = MAX_SIDE)]
    InvalidSize { width: u32, height: u32 },

    #[error(transparent)]
    Surface(#[from] SurfaceError),

    #[error("Failed to encode image: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Failed to write export: {0}")]
    Io(#[from] std::io::Error),
}

/// Replay the drawing into a fresh offscreen surface of the given size
pub fn render<S: RenderSurface>(
    pad: &Sketchpad<S>,
    width: u32,
    height: u32,
    font: &GlyphFont,
) -> Result<PixmapSurface, ExportError> {
    if !(1..=MAX_SIDE).contains(&width) || !(1..=MAX_SIDE).contains(&height) {
        return Err(ExportError::InvalidSize { width, height });
    }
    let mut target = PixmapSurface::new(width, height, font.clone())?;
    pad.export_into(&mut target);
    Ok(target)
}

pub fn encode_png(surface: &PixmapSurface) -> Result<Vec<u8>, ExportError> {
    let mut bytes = Vec::new();
    surface
        .to_image()
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Render at `width`x`height` and write a PNG to `path`
pub fn save_png<S: RenderSurface>(
    pad: &Sketchpad<S>,
    width: u32,
    height: u32,
    font: &GlyphFont,
    path: &Path,
) -> Result<(), ExportError> {
    let surface = render(pad, width, height, font)?;
    let bytes = encode_png(&surface)?;
    std::fs::write(path, bytes)?;
    log::info!("Exported {}x{} image to {}", width, height, path.display());
    Ok(())
}
