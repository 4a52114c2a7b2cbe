use egui::{Color32, Vec2};
use serde::{Deserialize, Serialize};

/// Settings the drawing surface is created from.
///
/// Persisted together with the toolbar state through eframe's storage, so every
/// field falls back to its default when an older snapshot lacks it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Surface width in surface units
    pub width: f32,
    /// Surface height in surface units
    pub height: f32,
    /// Background color as a hex string
    pub background: String,
    /// Brush widths offered in the size menu, in pixels
    pub brush_presets: Vec<f32>,
    /// Width every placed image is scaled to
    pub image_width: f32,
    /// Content of a freshly added text object
    pub default_text: String,
    /// Font size of a freshly added text object
    pub text_size: f32,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 600.0,
            background: "#ffffff".to_owned(),
            brush_presets: vec![1.0, 2.0, 3.0, 4.0],
            image_width: 200.0,
            default_text: "Text here".to_owned(),
            text_size: 18.0,
        }
    }
}

impl SurfaceConfig {
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Parses the background color, falling back to white on a malformed value
    pub fn background_color(&self) -> Color32 {
        parse_hex_color(&self.background).unwrap_or_else(|| {
            log::warn!("Invalid background color {:?}, using white", self.background);
            Color32::WHITE
        })
    }
}

/// Parses a `#rrggbb` (or `#rrggbbaa`) string
pub fn parse_hex_color(value: &str) -> Option<Color32> {
    Color32::from_hex(value).ok()
}

/// Formats a color the way an HTML color input reports it
pub fn to_hex_color(color: Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}
