use std::path::{Path, PathBuf};

use egui::Color32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::{ColorParseError, parse_hex_rgb};

/// Environment variable that points at a JSON config file
pub const CONFIG_ENV: &str = "SKETCHPAD_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "sketchpad.json";

/// Largest side accepted for the canvas or the export
pub const MAX_SIDE: u32 = 8192;

/// Errors that can occur while loading the configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid {field} size {value} (expected 1..={max})", max = MAX_SIDE)]
    InvalidSize { field: &'static str, value: u32 },

    #[error("Invalid color: {0}")]
    InvalidColor(#[from] ColorParseError),

    #[error("Sticker palette entry {0} is blank")]
    BlankSticker(usize),
}

/// Startup settings for the sketchpad
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SketchConfig {
    /// Side of the square live canvas, in pixels
    pub canvas_size: u32,
    /// Side of the square exported image, in pixels
    pub export_size: u32,
    /// Stroke color used until the user picks another one
    pub default_color: String,
    /// Backdrop painted behind the transparent canvas in the window
    pub paper_color: String,
    pub stickers: Vec<String>,
    pub export_path: PathBuf,
    /// Optional font tried before egui's bundled faces for sticker glyphs
    pub sticker_font: Option<PathBuf>,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            canvas_size: 256,
            export_size: 1024,
            default_color: "#ffffff".to_owned(),
            paper_color: "#2b2b2b".to_owned(),
            stickers: vec!["🐦".to_owned(), "🕊".to_owned(), "🐣".to_owned()],
            export_path: PathBuf::from("canvas_image.png"),
            sticker_font: None,
        }
    }
}

impl SketchConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Load from `SKETCHPAD_CONFIG` or `sketchpad.json`, falling back to defaults.
    pub fn load_or_default() -> Self {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Self::default();
        }

        match Self::load(&path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(err) => {
                log::warn!("Ignoring config {}: {}", path.display(), err);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [("canvas", self.canvas_size), ("export", self.export_size)] {
            if value == 0 || value > MAX_SIDE {
                return Err(ConfigError::InvalidSize { field, value });
            }
        }
        parse_hex_rgb(&self.default_color)?;
        parse_hex_rgb(&self.paper_color)?;
        if let Some(index) = self.stickers.iter().position(|s| s.trim().is_empty()) {
            return Err(ConfigError::BlankSticker(index));
        }
        Ok(())
    }

    pub fn default_color(&self) -> Color32 {
        parse_hex_rgb(&self.default_color).unwrap_or(Color32::WHITE)
    }

    pub fn paper_color(&self) -> Color32 {
        parse_hex_rgb(&self.paper_color).unwrap_or(Color32::DARK_GRAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = SketchConfig::default();
        config.validate().unwrap();
        assert_eq!(config.export_size / config.canvas_size, 4);
        assert_eq!(config.default_color(), Color32::WHITE);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = SketchConfig::from_json(r#"{ "canvas_size": 512, "stickers": ["★"] }"#).unwrap();
        assert_eq!(config.canvas_size, 512);
        assert_eq!(config.export_size, 1024);
        assert_eq!(config.stickers, vec!["★".to_owned()]);
    }

    #[test]
    fn test_invalid_values_are_reported() {
        assert!(matches!(
            SketchConfig::from_json(r#"{ "canvas_size": 0 }"#),
            Err(ConfigError::InvalidSize { field: "canvas", value: 0 })
        ));
        assert!(matches!(
            SketchConfig::from_json(r##"{ "default_color": "#12" }"##),
            Err(ConfigError::InvalidColor(_))
        ));
        assert!(matches!(
            SketchConfig::from_json(r#"{ "stickers": ["a", " "] }"#),
            Err(ConfigError::BlankSticker(1))
        ));
        assert!(matches!(SketchConfig::from_json("{"), Err(ConfigError::Parse(_))));
    }
}
