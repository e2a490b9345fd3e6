#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod color;
pub mod config;
pub mod edit;
pub mod error;
pub mod export;
pub mod history;
pub mod preview;
pub mod renderer;
pub mod sketchpad;
pub mod surface;
pub mod tool;

pub use app::SketchApp;
pub use config::SketchConfig;
pub use edit::{Edit, Point, Replayable, Sticker, Stroke, StrokeStyle, Thickness};
pub use error::SketchError;
pub use history::{EditHandle, History};
pub use preview::{Preview, compute_preview};
pub use renderer::Renderer;
pub use sketchpad::{PointerState, Sketchpad};
pub use surface::{GlyphFont, Pen, PixmapSurface, RenderSurface};
pub use tool::{ToolMode, ToolState};
