use std::collections::BTreeMap;

use clap::ValueEnum;
use palette::{Hsv, IntoColor, Srgb};
use serde::{Deserialize, Serialize};

use crate::data::model::LabelSet;

/// Fractional part of the golden ratio; successive multiples stay well spread on the hue circle.
pub const GOLDEN_RATIO_CONJUGATE: f64 = 0.61803398875;

pub const SATURATION: f64 = 0.6;
pub const VALUE: f64 = 0.95;

/// Colour handed out for labels that are not in the map.
pub const FALLBACK_COLOR: &str = "#808080";

/// Ten hand-picked series colours (D3 category10, uppercased).
pub const FIXED_PALETTE: [&str; 10] = [
    "#1F77B4", "#FF7F0E", "#2CA02C", "#D62728", "#9467BD",
    "#8C564B", "#E377C2", "#7F7F7F", "#BCBD22", "#17BECF",
];

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// How a sorted label position is turned into a colour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ColorStrategy {
    /// Unbounded: hue rotated by the golden ratio per position.
    #[default]
    #[value(name = "golden")]
    GoldenRatio,
    /// Bounded: [`FIXED_PALETTE`] cycled modulo its length.
    #[value(name = "fixed")]
    FixedPalette,
}

impl ColorStrategy {
    /// Colour for the label at sorted position `index`.
    pub fn color_at(self, index: usize) -> String {
        match self {
            ColorStrategy::GoldenRatio => golden_ratio_color(index),
            ColorStrategy::FixedPalette => palette_color(index).to_string(),
        }
    }
}

/// Hue in `[0, 1)` for sorted position `index`.
pub fn golden_hue(index: usize) -> f64 {
    (index as f64 * GOLDEN_RATIO_CONJUGATE) % 1.0
}

/// `#RRGGBB` for position `index` under golden-ratio hue rotation.
///
/// Channels are truncated, not rounded, when scaled to `0..=255`.
pub fn golden_ratio_color(index: usize) -> String {
    let hsv: Hsv<palette::encoding::Srgb, f64> =
        Hsv::new(golden_hue(index) * 360.0, SATURATION, VALUE);
    let rgb: Srgb<f64> = hsv.into_color();
    format!(
        "#{:02X}{:02X}{:02X}",
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

/// Fixed palette entry for position `index`; repeats every ten labels.
pub fn palette_color(index: usize) -> &'static str {
    FIXED_PALETTE[index % FIXED_PALETTE.len()]
}

/// Generates `n` colours for positions `0..n`.
pub fn generate_palette(n: usize, strategy: ColorStrategy) -> Vec<String> {
    (0..n).map(|i| strategy.color_at(i)).collect()
}

// ---------------------------------------------------------------------------
// Color mapping: label → hex colour
// ---------------------------------------------------------------------------

/// Maps every label of a label set to its series colour.
///
/// Serializes as a plain `{ "label": "#RRGGBB" }` object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ColorMap {
    #[serde(skip)]
    strategy: ColorStrategy,
    mapping: BTreeMap<String, String>,
}

impl ColorMap {
    /// Build a colour map from a label set (already deduplicated and ordered).
    pub fn new(labels: &LabelSet, strategy: ColorStrategy) -> Self {
        Self::from_sorted(labels.iter(), strategy)
    }

    /// Build a colour map from labels in their final order; position `i` gets colour `i`.
    pub fn from_sorted<I, S>(labels: I, strategy: ColorStrategy) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let labels: Vec<String> = labels
            .into_iter()
            .map(|label| label.as_ref().to_string())
            .collect();
        let palette = generate_palette(labels.len(), strategy);
        let mapping = labels.into_iter().zip(palette).collect();

        ColorMap { strategy, mapping }
    }

    pub fn strategy(&self) -> ColorStrategy {
        self.strategy
    }

    /// Look up the colour for a label, falling back to neutral gray.
    pub fn color_for(&self, label: &str) -> &str {
        self.mapping
            .get(label)
            .map(String::as_str)
            .unwrap_or(FALLBACK_COLOR)
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.mapping.get(label).map(String::as_str)
    }

    /// Legend entries (label → colour) in label order.
    pub fn legend_entries(&self) -> Vec<(String, String)> {
        self.mapping
            .iter()
            .map(|(label, color)| (label.clone(), color.clone()))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.mapping.iter().map(|(l, c)| (l.as_str(), c.as_str()))
    }

    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_hex_color(s: &str) -> bool {
        s.len() == 7
            && s.starts_with('#')
            && s[1..]
                .chars()
                .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c))
    }

    fn labels(names: &[&str]) -> LabelSet {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn key_set_matches_label_set() {
        let set = labels(&["moss mother", "hornet", "false knight", "gruz mother"]);
        for strategy in [ColorStrategy::GoldenRatio, ColorStrategy::FixedPalette] {
            let map = ColorMap::new(&set, strategy);
            assert_eq!(map.len(), set.len());
            let keys: Vec<&str> = map.iter().map(|(l, _)| l).collect();
            let expected: Vec<&str> = set.iter().collect();
            assert_eq!(keys, expected);
        }
    }

    #[test]
    fn empty_label_set_gives_empty_map() {
        let map = ColorMap::new(&LabelSet::default(), ColorStrategy::GoldenRatio);
        assert!(map.is_empty());
        assert!(generate_palette(0, ColorStrategy::FixedPalette).is_empty());
    }

    #[test]
    fn golden_hues_never_collide() {
        let mut hues: Vec<f64> = (0..1usize << 20).map(golden_hue).collect();
        hues.sort_by(f64::total_cmp);
        assert!(hues.windows(2).all(|w| w[0] != w[1]));
        assert!(hues.iter().all(|h| (0.0..1.0).contains(h)));
    }

    #[test]
    fn golden_colors_are_uppercase_hex() {
        for i in 0..4096 {
            let color = golden_ratio_color(i);
            assert!(is_hex_color(&color), "bad colour {color} at {i}");
        }
    }

    #[test]
    fn first_golden_color_is_pure_hue_zero() {
        // hue 0, s 0.6, v 0.95 → (0.95, 0.38, 0.38)
        assert_eq!(golden_ratio_color(0), "#F26060");
    }

    #[test]
    fn golden_mapping_is_deterministic() {
        let set = labels(&["c", "a", "b", "d", "e"]);
        let first = ColorMap::new(&set, ColorStrategy::GoldenRatio);
        let second = ColorMap::new(&set, ColorStrategy::GoldenRatio);
        assert_eq!(first, second);
    }

    #[test]
    fn hornet_and_moss_mother() {
        let set = labels(&["Moss Mother", "Hornet"]);
        let ordered: Vec<&str> = set.iter().collect();
        assert_eq!(ordered, ["Hornet", "Moss Mother"]);

        assert!(golden_hue(0).abs() < 1e-12);
        assert!((golden_hue(1) - 0.618).abs() < 1e-3);

        let map = ColorMap::new(&set, ColorStrategy::GoldenRatio);
        let hornet = map.color_for("Hornet");
        let moss = map.color_for("Moss Mother");
        assert!(is_hex_color(hornet));
        assert!(is_hex_color(moss));
        assert_ne!(hornet, moss);
    }

    #[test]
    fn fixed_palette_cycles_every_ten() {
        for i in 0..25 {
            assert_eq!(palette_color(i), palette_color(i + 10));
        }
        let names: Vec<String> = (0..12).map(|i| format!("label {i:02}")).collect();
        let map = ColorMap::from_sorted(&names, ColorStrategy::FixedPalette);
        assert_eq!(map.len(), 12);
        assert_eq!(map.color_for("label 00"), map.color_for("label 10"));
        assert_eq!(map.color_for("label 01"), map.color_for("label 11"));
        assert_ne!(map.color_for("label 00"), map.color_for("label 01"));
    }

    #[test]
    fn legend_entries_follow_label_order() {
        let set = labels(&["nosk", "hornet", "zote", "false knight"]);
        let map = ColorMap::new(&set, ColorStrategy::GoldenRatio);
        let entries = map.legend_entries();

        let names: Vec<&str> = entries.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(names, ["false knight", "hornet", "nosk", "zote"]);
        for (i, (label, color)) in entries.iter().enumerate() {
            assert_eq!(color, map.color_for(label));
            assert_eq!(*color, golden_ratio_color(i));
        }
    }

    #[test]
    fn generate_palette_matches_positions() {
        let colors = generate_palette(12, ColorStrategy::FixedPalette);
        assert_eq!(colors.len(), 12);
        assert_eq!(colors[0], FIXED_PALETTE[0]);
        assert_eq!(colors[10], FIXED_PALETTE[0]);
        assert_eq!(colors[11], FIXED_PALETTE[1]);
    }

    #[test]
    fn unknown_label_falls_back_to_gray() {
        let map = ColorMap::new(&labels(&["hornet"]), ColorStrategy::GoldenRatio);
        assert_eq!(map.color_for("radiance"), FALLBACK_COLOR);
        assert_eq!(map.get("radiance"), None);
    }

    #[test]
    fn serializes_as_plain_object() {
        let map = ColorMap::new(&labels(&["b", "a"]), ColorStrategy::FixedPalette);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r##"{"a":"#1F77B4","b":"#FF7F0E"}"##);
    }
}
