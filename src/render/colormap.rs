use image::Rgba;
use plotters::style::colors::colormaps::{BlackWhite, Bone, ColorMap, Copper, ViridisRGB};
use plotters::style::RGBColor;
use serde::{Deserialize, Serialize};


#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Colormap {
    Viridis,
    Gray,
    Bone,
    Copper,
}

impl Default for Colormap {
    fn default() -> Self {
        Colormap::Viridis
    }
}

impl Colormap {
    /// Maps `v` in `[0, 1]` to an opaque color. Values outside are clipped,
    /// NaN maps to the low end.
    pub fn map(&self, v: f64) -> Rgba<u8> {
        let v = if v.is_nan() { 0.0 } else { v.max(0.0).min(1.0) };

        let RGBColor(r, g, b) = match self {
            Colormap::Viridis => ViridisRGB.get_color(v),
            Colormap::Gray    => BlackWhite.get_color(v),
            Colormap::Bone    => Bone.get_color(v),
            Colormap::Copper  => Copper.get_color(v),
        };

        Rgba([r, g, b, 255])
    }
}


/// Normalizes values from `[vmin, vmax]` to `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalize {
    pub vmin: f64,
    pub vmax: f64,
}

impl Normalize {
    pub fn new(vmin: f64, vmax: f64) -> Self {
        Normalize { vmin, vmax }
    }

    pub fn apply(&self, v: f64) -> f64 {
        if self.vmax <= self.vmin {
            return 0.0;
        }

        (v - self.vmin) / (self.vmax - self.vmin)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn brightness(p: Rgba<u8>) -> u32 {
        p[0] as u32 + p[1] as u32 + p[2] as u32
    }

    #[test]
    fn viridis_runs_from_purple_to_yellow() {
        let low = Colormap::Viridis.map(0.0);
        let high = Colormap::Viridis.map(1.0);

        assert!(low[2] > low[1] && low[0] > low[1]);
        assert!(high[0] > 200 && high[1] > 200 && high[2] < 100);
        assert_eq!(low[3], 255);
        assert_eq!(high[3], 255);
    }

    #[test]
    fn brightness_increases_along_the_map() {
        for cmap in [Colormap::Viridis, Colormap::Gray, Colormap::Bone, Colormap::Copper].iter() {
            let steps: Vec<u32> = (0..=10).map(|i| brightness(cmap.map(i as f64 / 10.0))).collect();
            assert!(steps.windows(2).all(|w| w[0] <= w[1]), "{:?}: {:?}", cmap, steps);
            assert!(steps[0] < steps[10]);
        }
    }

    #[test]
    fn gray_spans_black_to_white() {
        let black = Colormap::Gray.map(0.0);
        let white = Colormap::Gray.map(1.0);

        assert!(black.0[..3].iter().all(|&c| c <= 1));
        assert!(white.0[..3].iter().all(|&c| c >= 254));
        assert_eq!(black[0], black[1]);
        assert_eq!(white[1], white[2]);
    }

    #[test]
    fn out_of_range_is_clipped() {
        assert_eq!(Colormap::Viridis.map(-3.0), Colormap::Viridis.map(0.0));
        assert_eq!(Colormap::Viridis.map(7.0), Colormap::Viridis.map(1.0));
        assert_eq!(Colormap::Viridis.map(f64::NAN), Colormap::Viridis.map(0.0));
        assert_eq!(Colormap::Viridis.map(f64::NEG_INFINITY), Colormap::Viridis.map(0.0));
    }

    #[test]
    fn normalize_range() {
        let n = Normalize::new(-20.0, 50.0);

        assert_eq!(n.apply(-20.0), 0.0);
        assert_eq!(n.apply(50.0), 1.0);
        assert!((n.apply(15.0) - 0.5).abs() < 1e-12);
    }
}
