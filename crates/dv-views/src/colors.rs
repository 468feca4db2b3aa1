//! Color utilities for charts

use dv_core::Theme;
use serde::{Serialize, Serializer};

/// An sRGB colour, serialised as `#rrggbb`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.hex())
    }
}

/// Get a categorical color from a palette
pub fn categorical_color(index: usize) -> Rgb {
    const PALETTE: &[Rgb] = &[
        Rgb(100, 150, 250), // Blue
        Rgb(250, 150, 100), // Orange
        Rgb(150, 250, 100), // Green
        Rgb(250, 100, 150), // Pink
        Rgb(150, 100, 250), // Purple
        Rgb(250, 250, 100), // Yellow
        Rgb(100, 250, 250), // Cyan
        Rgb(250, 100, 100), // Red
    ];
    PALETTE[index % PALETTE.len()]
}

/// Background, axis and grid colours for a theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeColors {
    pub background: Rgb,
    pub axis: Rgb,
    pub grid: Rgb,
}

pub fn theme_colors(theme: Theme) -> ThemeColors {
    match theme {
        Theme::Light => ThemeColors {
            background: Rgb(255, 255, 255),
            axis: Rgb(80, 80, 80),
            grid: Rgb(225, 225, 225),
        },
        Theme::Dark => ThemeColors {
            background: Rgb(23, 23, 23),
            axis: Rgb(160, 160, 160),
            grid: Rgb(50, 50, 50),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_wraps() {
        assert_eq!(categorical_color(0), categorical_color(8));
        assert_ne!(categorical_color(0), categorical_color(1));
    }

    #[test]
    fn test_hex_serialisation() {
        assert_eq!(Rgb(100, 150, 250).hex(), "#6496fa");
        assert_eq!(serde_json::to_string(&Rgb(0, 0, 0)).unwrap(), "\"#000000\"");
    }
}
