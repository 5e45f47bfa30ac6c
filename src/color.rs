use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Mix, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            to_color32(Hsl::new(hue, 0.75, 0.55))
        })
        .collect()
}

/// `n` colours blended from deep purple to yellow-green, for ranked bars.
pub fn generate_ramp(n: usize) -> Vec<Color32> {
    let start = Hsl::new(270.0, 0.55, 0.35);
    let end = Hsl::new(75.0, 0.75, 0.55);
    (0..n)
        .map(|i| {
            let t = if n > 1 { i as f32 / (n - 1) as f32 } else { 0.0 };
            to_color32(start.mix(end, t))
        })
        .collect()
}

fn to_color32(hsl: Hsl) -> Color32 {
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

// ---------------------------------------------------------------------------
// Color mapping: category → Color32
// ---------------------------------------------------------------------------

/// Maps category labels (boroughs, grades) to distinct colours.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Build a colour map over the given categories, in order.
    pub fn new<'a>(categories: impl IntoIterator<Item = &'a str>) -> Self {
        let categories: Vec<&str> = categories.into_iter().collect();
        let palette = generate_palette(categories.len());
        let mapping = categories
            .into_iter()
            .zip(palette)
            .map(|(c, color)| (c.to_string(), color))
            .collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a category.
    pub fn color_for(&self, category: &str) -> Color32 {
        self.mapping
            .get(category)
            .copied()
            .unwrap_or(self.default_color)
    }
}

pub const GOOD_GREEN: Color32 = Color32::from_rgb(46, 160, 67);
pub const WARNING_AMBER: Color32 = Color32::from_rgb(219, 171, 9);
pub const CRITICAL_RED: Color32 = Color32::from_rgb(207, 34, 46);

/// Fixed colours for the letter grades.
pub fn grade_color(grade: &str) -> Color32 {
    match grade {
        "A" => GOOD_GREEN,
        "B" => WARNING_AMBER,
        "C" => CRITICAL_RED,
        _ => Color32::GRAY,
    }
}
