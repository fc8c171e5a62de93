use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::CellValue;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: segment value → Color32
// ---------------------------------------------------------------------------

/// Maps the distinct values of a segment column to distinct colours.
///
/// Built once over the *full* set of values a column takes, so a segment
/// value keeps its colour no matter which filter subset is visible.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<CellValue, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Build a colour map for a column from its unique values.
    pub fn new(unique_values: &BTreeSet<CellValue>) -> Self {
        let palette = generate_palette(unique_values.len());
        let mapping: BTreeMap<CellValue, Color32> = unique_values
            .iter()
            .zip(palette.into_iter())
            .map(|(v, c): (&CellValue, Color32)| (v.clone(), c))
            .collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a given segment value.
    pub fn color_for(&self, value: &CellValue) -> Color32 {
        self.mapping
            .get(value)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(names: &[&str]) -> BTreeSet<CellValue> {
        names
            .iter()
            .map(|n| CellValue::String(n.to_string()))
            .collect()
    }

    #[test]
    fn palette_has_requested_size_and_distinct_colors() {
        let palette = generate_palette(8);
        assert_eq!(palette.len(), 8);
        let distinct: std::collections::BTreeSet<_> =
            palette.iter().map(|c| c.to_array()).collect();
        assert_eq!(distinct.len(), 8);
    }

    #[test]
    fn assignment_is_deterministic_over_sorted_values() {
        let a = ColorMap::new(&values(&["EU", "US", "APAC"]));
        let b = ColorMap::new(&values(&["US", "APAC", "EU"]));
        for v in values(&["EU", "US", "APAC"]) {
            assert_eq!(a.color_for(&v), b.color_for(&v));
        }
    }

    #[test]
    fn unknown_value_falls_back_to_default() {
        let cm = ColorMap::new(&values(&["EU"]));
        assert_eq!(
            cm.color_for(&CellValue::String("MARS".into())),
            Color32::GRAY
        );
    }
}
