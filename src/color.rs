use egui::Color32;
use thiserror::Error;

/// Errors produced while reading a `#rrggbb` color string
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("color must look like #rrggbb, got {0:?}")]
    Malformed(String),
    #[error("invalid hex digits in color {0:?}")]
    InvalidDigits(String),
}

/// Parse an opaque RGB color written as `#rrggbb` (the leading `#` is optional).
pub fn parse_hex_rgb(text: &str) -> Result<Color32, ColorParseError> {
    let trimmed = text.trim();
    let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(ColorParseError::Malformed(text.to_owned()));
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16).map_err(|_| ColorParseError::InvalidDigits(text.to_owned()))
    };

    Ok(Color32::from_rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Format the RGB part of a color as `#rrggbb`.
pub fn to_hex_rgb(color: Color32) -> String {
    let [r, g, b, _] = color.to_srgba_unmultiplied();
    format!("#{r:02x}{g:02x}{b:02x}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_and_without_hash() {
        assert_eq!(parse_hex_rgb("#ff8000"), Ok(Color32::from_rgb(255, 128, 0)));
        assert_eq!(parse_hex_rgb("00FF00"), Ok(Color32::from_rgb(0, 255, 0)));
        assert_eq!(parse_hex_rgb("  #ffffff "), Ok(Color32::WHITE));
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(matches!(parse_hex_rgb("#fff"), Err(ColorParseError::Malformed(_))));
        assert!(matches!(parse_hex_rgb("#gg0000"), Err(ColorParseError::InvalidDigits(_))));
        assert!(parse_hex_rgb("").is_err());
    }

    #[test]
    fn test_hex_format() {
        assert_eq!(to_hex_rgb(Color32::from_rgb(1, 2, 255)), "#0102ff");
    }
}
