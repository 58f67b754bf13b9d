use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::filter::ALL;

// ---------------------------------------------------------------------------
// Category colours
// ---------------------------------------------------------------------------

const REGISTERED_CATEGORIES: &[(&str, Color32)] = &[
    ("diatomic nonmetal", Color32::from_rgb(0x22, 0xc5, 0x5e)),
    ("noble gas", Color32::from_rgb(0xa8, 0x55, 0xf7)),
    ("alkali metal", Color32::from_rgb(0xef, 0x44, 0x44)),
    ("alkaline earth metal", Color32::from_rgb(0xf9, 0x73, 0x16)),
    ("metalloid", Color32::from_rgb(0xea, 0xb3, 0x08)),
    ("polyatomic nonmetal", Color32::from_rgb(0x84, 0xcc, 0x16)),
    ("post-transition metal", Color32::from_rgb(0x3b, 0x82, 0xf6)),
    ("transition metal", Color32::from_rgb(0x63, 0x66, 0xf1)),
    ("lanthanide", Color32::from_rgb(0xec, 0x48, 0x99)),
    ("actinide", Color32::from_rgb(0xf4, 0x3f, 0x5e)),
    ("unknown, probably transition metal", UNKNOWN_GRAY),
    ("unknown, probably post-transition metal", UNKNOWN_GRAY),
    ("unknown, probably metalloid", UNKNOWN_GRAY),
    ("unknown, predicted to be noble gas", UNKNOWN_GRAY),
];

const UNKNOWN_GRAY: Color32 = Color32::from_rgb(0x6b, 0x72, 0x80);

/// Fill for categories that have no registered colour.
pub const DEFAULT_CATEGORY_COLOR: Color32 = Color32::from_rgb(0x37, 0x41, 0x51);

/// Maps element categories to tile fill colours.
#[derive(Debug, Clone)]
pub struct CategoryPalette {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl Default for CategoryPalette {
    fn default() -> Self {
        CategoryPalette {
            mapping: REGISTERED_CATEGORIES
                .iter()
                .map(|(name, c)| (name.to_string(), *c))
                .collect(),
            default_color: DEFAULT_CATEGORY_COLOR,
        }
    }
}

impl CategoryPalette {
    /// Look up the fill for a category, falling back to the default.
    pub fn color_for(&self, category: &str) -> Color32 {
        self.mapping
            .get(category)
            .copied()
            .unwrap_or(self.default_color)
    }

    /// Legend rows for the categories present in a dataset (sentinel skipped).
    pub fn legend_entries(&self, categories: &[String]) -> Vec<(String, Color32)> {
        categories
            .iter()
            .filter(|c| c.as_str() != ALL)
            .map(|c| (c.clone(), self.color_for(c)))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Phase borders
// ---------------------------------------------------------------------------

pub const DEFAULT_PHASE_COLOR: Color32 = Color32::from_rgb(0x6b, 0x72, 0x80);

/// Tile border colour for a phase.
pub fn phase_border(phase: &str) -> Color32 {
    match phase {
        "Gas" => Color32::from_rgb(0x38, 0xbd, 0xf8),
        "Liquid" => Color32::from_rgb(0x25, 0x63, 0xeb),
        "Solid" => Color32::from_rgb(0xa8, 0xa2, 0x9e),
        _ => DEFAULT_PHASE_COLOR,
    }
}

// ---------------------------------------------------------------------------
// Emphasis adjustments
// ---------------------------------------------------------------------------

/// Greyscale, darkened variant used for tiles that do not match the filters.
pub fn dimmed(color: Color32) -> Color32 {
    let mut hsl = to_hsl(color);
    hsl.saturation = 0.0;
    hsl.lightness *= 0.7;
    from_hsl(hsl)
}

/// Slightly lighter variant used under the pointer.
pub fn hovered(color: Color32) -> Color32 {
    let mut hsl = to_hsl(color);
    hsl.lightness = (hsl.lightness + 0.08).min(1.0);
    from_hsl(hsl)
}

fn to_hsl(color: Color32) -> Hsl {
    let rgb = Srgb::new(
        color.r() as f32 / 255.0,
        color.g() as f32 / 255.0,
        color.b() as f32 / 255.0,
    );
    rgb.into_color()
}

fn from_hsl(hsl: Hsl) -> Color32 {
    let rgb: Srgb = hsl.into_color();
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgb(channel(rgb.red), channel(rgb.green), channel(rgb.blue))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unregistered_category_gets_default_fill() {
        let palette = CategoryPalette::default();
        assert_eq!(palette.color_for("made-up metal"), DEFAULT_CATEGORY_COLOR);
        assert_ne!(palette.color_for("noble gas"), DEFAULT_CATEGORY_COLOR);
    }

    #[test]
    fn unknown_phase_gets_default_border() {
        assert_eq!(phase_border("Plasma"), DEFAULT_PHASE_COLOR);
        assert_ne!(phase_border("Gas"), DEFAULT_PHASE_COLOR);
    }

    #[test]
    fn dimmed_is_grey_and_darker() {
        let c = dimmed(Color32::from_rgb(0xa8, 0x55, 0xf7));
        assert_eq!(c.r(), c.g());
        assert_eq!(c.g(), c.b());
        assert!(c.r() < 0xa8);
    }

    #[test]
    fn legend_skips_sentinel() {
        let palette = CategoryPalette::default();
        let entries = palette.legend_entries(&["all".to_string(), "lanthanide".to_string()]);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].0, "lanthanide");
    }
}
