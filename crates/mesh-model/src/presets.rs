//! Built-in starting gradients.

use crate::color::Rgb;
use crate::point::{GradientPoint, Position};

/// Static description of one preset point: `(x, y, hex, intensity, bend)`.
type PresetPoint = (f32, f32, &'static str, f32, f32);

/// A named, built-in point arrangement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preset {
    pub name: &'static str,
    points: &'static [PresetPoint],
}

impl Preset {
    /// Materializes the preset as an owned point list.
    ///
    /// Preset colors are compile-time literals; an unparsable entry falls back
    /// to mid gray and is logged.
    pub fn points(&self) -> Vec<GradientPoint> {
        self.points
            .iter()
            .map(|&(x, y, hex, intensity, bend)| {
                let color = Rgb::from_hex(hex).unwrap_or_else(|e| {
                    log::warn!("preset '{}': {e}", self.name);
                    Rgb::new(0.5, 0.5, 0.5)
                });
                GradientPoint::new(Position::new(x, y), color)
                    .with_intensity(intensity)
                    .with_bend(bend)
            })
            .collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

pub const PRESETS: &[Preset] = &[
    Preset {
        name: "sunset",
        points: &[
            (0.15, 0.85, "#ff5e62", 1.0, 3.0),
            (0.85, 0.80, "#ff9966", 1.0, 3.0),
            (0.50, 0.45, "#f9d423", 0.8, 2.5),
            (0.20, 0.10, "#6a3093", 1.2, 3.5),
            (0.85, 0.15, "#a044ff", 1.0, 3.0),
        ],
    },
    Preset {
        name: "ocean",
        points: &[
            (0.10, 0.90, "#00c6ff", 1.0, 3.0),
            (0.90, 0.85, "#0072ff", 1.0, 3.0),
            (0.50, 0.50, "#43cea2", 0.9, 2.0),
            (0.15, 0.15, "#185a9d", 1.1, 3.0),
            (0.85, 0.10, "#1cb5e0", 1.0, 3.5),
        ],
    },
    Preset {
        name: "aurora",
        points: &[
            (0.10, 0.75, "#00f260", 1.0, 2.5),
            (0.45, 0.90, "#0575e6", 1.0, 3.0),
            (0.80, 0.70, "#8e2de2", 1.2, 3.0),
            (0.30, 0.30, "#0f2027", 1.4, 2.0),
            (0.75, 0.20, "#2c5364", 1.0, 3.0),
            (0.55, 0.55, "#7f00ff", 0.6, 4.0),
        ],
    },
    Preset {
        name: "peach",
        points: &[
            (0.20, 0.80, "#ffecd2", 1.0, 3.0),
            (0.80, 0.80, "#fcb69f", 1.0, 3.0),
            (0.50, 0.20, "#ff9a9e", 1.0, 3.0),
            (0.10, 0.20, "#fad0c4", 0.8, 2.5),
        ],
    },
    Preset {
        name: "neon",
        points: &[
            (0.20, 0.20, "#f72585", 1.0, 4.0),
            (0.80, 0.20, "#4361ee", 1.0, 4.0),
            (0.50, 0.80, "#4cc9f0", 1.0, 4.0),
            (0.50, 0.45, "#7209b7", 0.7, 5.0),
        ],
    },
];

/// Looks a preset up by name (case-insensitive).
pub fn find_preset(name: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{GradientState, MAX_POINTS, MIN_POINTS};

    #[test]
    fn every_preset_is_a_valid_point_set() {
        for preset in PRESETS {
            assert!((MIN_POINTS..=MAX_POINTS).contains(&preset.len()), "{}", preset.name);
            for &(_, _, hex, _, _) in preset.points {
                assert!(Rgb::from_hex(hex).is_ok(), "{}: {hex}", preset.name);
            }
        }
    }

    #[test]
    fn preset_names_are_unique() {
        for (i, a) in PRESETS.iter().enumerate() {
            assert!(PRESETS[i + 1..].iter().all(|b| b.name != a.name));
        }
    }

    #[test]
    fn load_preset_replaces_points() {
        let mut s = GradientState::default();
        s.select(Some(2));
        let preset = find_preset("Aurora").unwrap();
        s.load_preset(preset).unwrap();
        assert_eq!(s.len(), 6);
        assert_eq!(s.selected(), None);
        assert_eq!(s.point(0).unwrap().color.to_hex(), "#00f260");
        assert_eq!(s.point(3).unwrap().intensity, 1.4);
    }
}
