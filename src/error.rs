use thiserror::Error;

use crate::config::ConfigError;
use crate::export::ExportError;
use crate::surface::{FontError, SurfaceError};

/// Any failure the sketchpad can report outside of the drawing core
#[derive(Debug, Error)]
pub enum SketchError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("font error: {0}")]
    Font(#[from] FontError),

    #[error("surface error: {0}")]
    Surface(#[from] SurfaceError),

    #[error("export error: {0}")]
    Export(#[from] ExportError),
}
