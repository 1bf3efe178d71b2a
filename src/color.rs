use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Conference hue bands
// ---------------------------------------------------------------------------

/// Share of a conference's hue band its divisions spread over; the rest
/// separates neighbouring conferences.
const BAND_FILL: f32 = 0.7;

fn hsl_to_color32(hue: f32) -> Color32 {
    let rgb: Srgb = Hsl::new(hue, 0.75, 0.45).into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

/// Colour each `(conference, division)` pair. Every conference owns an
/// equal slice of the hue circle, so divisions of one conference read as
/// one family of colours.
fn division_hues(pairs: &[(String, String)]) -> Vec<(String, Color32)> {
    let mut conferences: Vec<&str> = Vec::new();
    for (conf, _) in pairs {
        if !conferences.contains(&conf.as_str()) {
            conferences.push(conf);
        }
    }
    let band = 360.0 / conferences.len().max(1) as f32;

    let mut out = Vec::with_capacity(pairs.len());
    for (ci, conf) in conferences.iter().enumerate() {
        let members: Vec<&str> = pairs
            .iter()
            .filter(|(c, _)| c.as_str() == *conf)
            .map(|(_, d)| d.as_str())
            .collect();
        let step = band * BAND_FILL / members.len() as f32;
        for (di, division) in members.iter().enumerate() {
            let hue = ci as f32 * band + di as f32 * step;
            out.push((division.to_string(), hsl_to_color32(hue)));
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Division → Color32
// ---------------------------------------------------------------------------

/// Maps each division to a distinct colour for plain (logo-less) points.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Build from `(conference, division)` pairs as listed by the dataset.
    pub fn new(divisions: &[(String, String)]) -> Self {
        ColorMap {
            mapping: division_hues(divisions).into_iter().collect(),
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, division: &str) -> Color32 {
        self.mapping
            .get(division)
            .copied()
            .unwrap_or(self.default_color)
    }

    /// Legend entries (division → colour) for the UI.
    pub fn legend_entries(&self) -> Vec<(String, Color32)> {
        self.mapping
            .iter()
            .map(|(name, c)| (name.clone(), *c))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(list: &[(&str, &str)]) -> Vec<(String, String)> {
        list.iter().map(|(c, d)| (c.to_string(), d.to_string())).collect()
    }

    fn hue(color: Color32) -> f32 {
        let rgb = Srgb::new(color.r(), color.g(), color.b()).into_format::<f32>();
        let hsl: Hsl = rgb.into_color();
        hsl.hue.into_positive_degrees()
    }

    #[test]
    fn divisions_get_distinct_colours_grouped_by_conference() {
        let divisions = pairs(&[
            ("AFC", "AFC East"),
            ("AFC", "AFC North"),
            ("AFC", "AFC South"),
            ("AFC", "AFC West"),
            ("NFC", "NFC East"),
            ("NFC", "NFC North"),
            ("NFC", "NFC South"),
            ("NFC", "NFC West"),
        ]);
        let map = ColorMap::new(&divisions);

        let entries = map.legend_entries();
        assert_eq!(entries.len(), 8);
        for (i, (_, a)) in entries.iter().enumerate() {
            assert!(entries[i + 1..].iter().all(|(_, b)| a != b));
        }

        // AFC takes the first half of the hue circle, NFC the second.
        for (_, division) in &divisions {
            let h = hue(map.color_for(division));
            if division.starts_with("AFC") {
                assert!(h < 180.0, "{division}: {h}");
            } else {
                assert!(h >= 175.0, "{division}: {h}");
            }
        }
    }

    #[test]
    fn unknown_division_is_gray() {
        let map = ColorMap::new(&pairs(&[("AFC", "AFC East"), ("NFC", "NFC West")]));
        assert_ne!(map.color_for("AFC East"), map.color_for("NFC West"));
        assert_eq!(map.color_for("XFL North"), Color32::GRAY);
        assert_eq!(map.legend_entries().len(), 2);
        assert!(ColorMap::new(&[]).legend_entries().is_empty());
    }
}
