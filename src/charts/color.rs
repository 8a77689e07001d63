//! Series colors.
//!
//! Colors are drawn uniformly per channel. Without a seed every build gets new
//! colors; with a seed the generator restarts from that seed on every build so
//! a zone keeps its color across redraws.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// RGBA color of a chart series. Alpha is always 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl SeriesColor {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn to_color32(self) -> egui::Color32 {
        let alpha = (self.a.clamp(0.0, 1.0) * 255.0).round() as u8;
        egui::Color32::from_rgba_unmultiplied(self.r, self.g, self.b, alpha)
    }

    pub fn to_rgb_color(self) -> plotters::style::RGBColor {
        plotters::style::RGBColor(self.r, self.g, self.b)
    }
}

/// Produces one color per series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColorSource {
    seed: Option<u64>,
}

impl ColorSource {
    pub fn from_seed(seed: Option<u64>) -> Self {
        Self { seed }
    }

    /// Start a color sequence for one dataset build.
    pub fn sequence(&self) -> ColorSequence {
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        ColorSequence { rng }
    }
}

/// Iterator over series colors for a single build.
pub struct ColorSequence {
    rng: StdRng,
}

impl Iterator for ColorSequence {
    type Item = SeriesColor;

    fn next(&mut self) -> Option<SeriesColor> {
        Some(SeriesColor::rgb(self.rng.gen(), self.rng.gen(), self.rng.gen()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_sequence_repeats() {
        let source = ColorSource::from_seed(Some(42));
        let first: Vec<_> = source.sequence().take(5).collect();
        let second: Vec<_> = source.sequence().take(5).collect();
        assert_eq!(first, second);
        assert!(first.iter().all(|c| c.a == 1.0));
    }

    #[test]
    fn test_different_seeds_differ() {
        let a: Vec<_> = ColorSource::from_seed(Some(1)).sequence().take(4).collect();
        let b: Vec<_> = ColorSource::from_seed(Some(2)).sequence().take(4).collect();
        assert_ne!(a, b);
    }

    #[test]
    fn test_color32_is_opaque() {
        let color = SeriesColor::rgb(10, 20, 30).to_color32();
        assert_eq!(color, egui::Color32::from_rgb(10, 20, 30));
    }
}
