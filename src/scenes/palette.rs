//! Theme-aware color ramps for scene primitives.
//!
//! Each catalog entry picks its colors from a [`PaletteRamp`], a pure
//! function of theme mode and primitive index. Ramps are data, not
//! closures, so scene configurations stay serializable.

use serde::{Deserialize, Serialize};

/// Host theme signal consumed at generation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
}

impl ThemeMode {
    /// Scene clear color for this theme (slate-950 / slate-50).
    pub fn background(&self) -> [f32; 3] {
        match self {
            ThemeMode::Dark => parse_hex_color("#0f172a").unwrap_or([0.0, 0.0, 0.0]),
            ThemeMode::Light => parse_hex_color("#f8fafc").unwrap_or([1.0, 1.0, 1.0]),
        }
    }
}

/// Indexed color ramp, one per catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaletteRamp {
    /// Fixed blue/indigo pool cycled by index (sphere field).
    IndigoPool,
    /// HSL sweep starting at blue, drifting hue and lightness per index.
    SlateSweep,
    /// Two-tone circuit ink: indigo traces with violet accents.
    CircuitInk,
    /// Chart series colors: wider hue steps, steeper lightness ramp.
    ChartSeries,
    /// Neon blue-to-pink cycle for trail heads.
    NeonTrail,
}

const INDIGO_POOL_DARK: [&str; 6] = [
    "#3b82f6", "#8b5cf6", "#6366f1", "#4f46e5", "#2563eb", "#1d4ed8",
];
const INDIGO_POOL_LIGHT: [&str; 6] = [
    "#60a5fa", "#a78bfa", "#818cf8", "#6366f1", "#3b82f6", "#2563eb",
];
const NEON_TRAIL_DARK: [&str; 5] = ["#3b82f6", "#6366f1", "#8b5cf6", "#a855f7", "#ec4899"];
const NEON_TRAIL_LIGHT: [&str; 5] = ["#60a5fa", "#818cf8", "#a78bfa", "#c084fc", "#f472b6"];

impl PaletteRamp {
    /// Color for the primitive at `index` under the given theme.
    pub fn color(&self, theme: ThemeMode, index: usize) -> [f32; 3] {
        let dark = theme == ThemeMode::Dark;
        match self {
            PaletteRamp::IndigoPool => {
                let pool = if dark { &INDIGO_POOL_DARK } else { &INDIGO_POOL_LIGHT };
                parse_hex_color(pool[index % pool.len()]).unwrap_or([0.4, 0.5, 0.9])
            }
            PaletteRamp::SlateSweep => {
                let i = index as f32;
                if dark {
                    hsl_to_rgb(210.0 + i * 10.0, 0.70, (0.40 + i * 0.02).min(0.75))
                } else {
                    hsl_to_rgb(210.0 + i * 10.0, 0.60, (0.60 + i * 0.015).min(0.85))
                }
            }
            PaletteRamp::CircuitInk => {
                let accent = index % 3 == 2;
                let hex = match (dark, accent) {
                    (true, false) => "#4f46e5",
                    (true, true) => "#8b5cf6",
                    (false, false) => "#3b82f6",
                    (false, true) => "#6366f1",
                };
                parse_hex_color(hex).unwrap_or([0.3, 0.3, 0.9])
            }
            PaletteRamp::ChartSeries => {
                let i = index as f32;
                if dark {
                    hsl_to_rgb(210.0 + i * 10.0, 0.70, (0.40 + i * 0.05).min(0.75))
                } else {
                    hsl_to_rgb(210.0 + i * 10.0, 0.80, (0.50 + i * 0.03).min(0.85))
                }
            }
            PaletteRamp::NeonTrail => {
                let pool = if dark { &NEON_TRAIL_DARK } else { &NEON_TRAIL_LIGHT };
                parse_hex_color(pool[index % pool.len()]).unwrap_or([0.5, 0.4, 0.9])
            }
        }
    }
}

/// Parse hex color to RGB floats (accepts 6-char RGB or 8-char RGBA, alpha is ignored).
pub fn parse_hex_color(hex: &str) -> Option<[f32; 3]> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 && hex.len() != 8 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()? as f32 / 255.0;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()? as f32 / 255.0;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()? as f32 / 255.0;
    Some([r, g, b])
}

/// Convert HSL (hue in degrees, s/l in 0..1) to linear-ish RGB floats.
pub fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> [f32; 3] {
    let h = hue.rem_euclid(360.0) / 60.0;
    let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = lightness - c * 0.5;
    [r + m, g + m, b + m]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#00ff88"), Some([0.0, 1.0, 136.0 / 255.0]));
        assert_eq!(parse_hex_color("ffffff"), Some([1.0, 1.0, 1.0]));
        assert_eq!(parse_hex_color("#00000000"), Some([0.0, 0.0, 0.0]));
        assert_eq!(parse_hex_color("invalid"), None);
    }

    #[test]
    fn test_hsl_primaries() {
        let red = hsl_to_rgb(0.0, 1.0, 0.5);
        assert!((red[0] - 1.0).abs() < 1e-5 && red[1].abs() < 1e-5);
        let green = hsl_to_rgb(120.0, 1.0, 0.5);
        assert!((green[1] - 1.0).abs() < 1e-5);
        let blue = hsl_to_rgb(240.0, 1.0, 0.5);
        assert!((blue[2] - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_ramps_stay_in_unit_range() {
        for ramp in [
            PaletteRamp::IndigoPool,
            PaletteRamp::SlateSweep,
            PaletteRamp::CircuitInk,
            PaletteRamp::ChartSeries,
            PaletteRamp::NeonTrail,
        ] {
            for theme in [ThemeMode::Dark, ThemeMode::Light] {
                for index in 0..64 {
                    let c = ramp.color(theme, index);
                    for channel in c {
                        assert!((0.0..=1.0).contains(&channel), "{ramp:?} {theme:?} {index}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_theme_changes_ramp_output() {
        let dark = PaletteRamp::SlateSweep.color(ThemeMode::Dark, 3);
        let light = PaletteRamp::SlateSweep.color(ThemeMode::Light, 3);
        assert_ne!(dark, light);
    }
}
