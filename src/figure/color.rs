//! Colors and palettes.

use plotters::style::{Color, HSLColor};
use serde::{Deserialize, Serialize};

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A fixed-size cyclic palette.
///
/// Lookups wrap around, so any index is valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    /// `count` hues sampled evenly over the full hue circle, endpoints included.
    ///
    /// The first and last entries are both red, so `count = n + 1` gives
    /// `n` distinct hues for indices `0..n`.
    pub fn hsv(count: usize) -> Self {
        let count = count.max(1);
        let colors = (0..count)
            .map(|i| {
                let hue = if count == 1 {
                    0.0
                } else {
                    i as f64 / (count - 1) as f64
                };
                let (r, g, b) = HSLColor(hue, 1.0, 0.5).rgb();
                Rgb::new(r, g, b)
            })
            .collect();
        Self { colors }
    }

    /// Qualitative palette for unrelated series.
    pub fn qualitative() -> Self {
        Self {
            colors: vec![
                Rgb::new(99, 110, 250),
                Rgb::new(239, 85, 59),
                Rgb::new(0, 204, 150),
                Rgb::new(171, 99, 250),
                Rgb::new(255, 161, 90),
                Rgb::new(25, 211, 243),
                Rgb::new(255, 102, 146),
                Rgb::new(182, 232, 128),
                Rgb::new(255, 151, 255),
                Rgb::new(254, 203, 82),
            ],
        }
    }

    /// Color at `index`, wrapping around.
    pub fn color(&self, index: usize) -> Rgb {
        self.colors[index % self.colors.len()]
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hsv_palette_endpoints_wrap() {
        // n = 3 jobs -> 4 entries, last one repeats the first hue
        let p = Palette::hsv(4);
        assert_eq!(p.len(), 4);
        assert_eq!(p.color(0), Rgb::RED);
        assert_eq!(p.color(3), Rgb::RED);
        assert_eq!(p.color(1), Rgb::new(0, 255, 0));
        assert_eq!(p.color(2), Rgb::new(0, 0, 255));
    }

    #[test]
    fn test_job_colors_are_distinct() {
        let n = 15;
        let p = Palette::hsv(n + 1);
        let mut colors: Vec<_> = (0..n).map(|i| p.color(i)).collect();
        colors.sort_by_key(|c| (c.r, c.g, c.b));
        colors.dedup();
        assert_eq!(colors.len(), n);
    }

    #[test]
    fn test_cyclic_lookup() {
        let p = Palette::qualitative();
        assert_eq!(p.color(0), p.color(p.len()));
        assert!(!p.is_empty());
    }

    #[test]
    fn test_single_entry_palette() {
        let p = Palette::hsv(0);
        assert_eq!(p.len(), 1);
        assert_eq!(p.color(5), Rgb::RED);
    }
}
