use super::canvas;
use crate::error::{self, Result};
use crate::params::WaveformParams;

use std::ops::Range;

use image::{Rgb, RgbaImage};
use ndarray::{ArrayBase, Data, Ix1};
use plotters::prelude::*;
use snafu::OptionExt;


/// Vertical value range of the plot: data limits widened by `margin` of
/// their span on both sides. Flat signals get a unit range around the value.
pub fn amplitude_range<D>(samples: &ArrayBase<D, Ix1>, margin: f64) -> (f64, f64)
where
    D: Data<Elem = i16>,
{
    let (lo, hi) = samples.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
        (lo.min(v as f64), hi.max(v as f64))
    });

    if lo > hi {
        return (-1.0, 1.0);
    }
    if lo == hi {
        return (lo - 1.0, hi + 1.0);
    }

    let pad = (hi - lo) * margin;
    (lo - pad, hi + pad)
}

/// Background for drawing in `ink`: as far from it as possible in every
/// channel, so that blended edges can be told apart from the paper.
fn paper_for(ink: [u8; 3]) -> [u8; 3] {
    let far = |c: u8| if c < 128 { 255 } else { 0 };
    [far(ink[0]), far(ink[1]), far(ink[2])]
}

fn draw<I>(buffer: &mut [u8], params: &WaveformParams, paper: [u8; 3], x: Range<f64>, y: Range<f64>,
           points: I) -> std::result::Result<(), Box<dyn std::error::Error>>
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let [r, g, b] = params.color;
    let [pr, pg, pb] = paper;

    let root = BitMapBackend::with_buffer(buffer, (params.width, params.height)).into_drawing_area();
    root.fill(&RGBColor(pr, pg, pb))?;

    // no margins or label areas: the plot covers the whole canvas
    let mut chart = ChartBuilder::on(&root).build_cartesian_2d(x, y)?;
    chart.draw_series(LineSeries::new(points, RGBColor(r, g, b).stroke_width(params.line_width)))?;

    root.present()?;
    Ok(())
}

/// Plots `samples` over `times` as a line on a transparent canvas, with x
/// fixed to `[0, duration]`, and trims the result to the drawn pixels.
pub fn render<D1, D2>(samples: &ArrayBase<D1, Ix1>, times: &ArrayBase<D2, Ix1>, duration: f64,
                      params: &WaveformParams) -> Result<RgbaImage>
where
    D1: Data<Elem = i16>,
    D2: Data<Elem = f64>,
{
    let (width, height) = (params.width, params.height);
    let paper = paper_for(params.color);

    let (lo, hi) = amplitude_range(samples, params.margin);
    let xmax = if duration > 0.0 { duration } else { 1.0 };

    let points = times.iter().zip(samples.iter()).map(|(&t, &v)| (t, v as f64));

    let mut buffer = vec![0; width as usize * height as usize * 3];
    draw(&mut buffer, params, paper, 0.0..xmax, lo..hi, points)
        .map_err(|e| error::PlotSnafu { reason: e.to_string() }.build())?;

    let img = canvas::unblend(buffer, width, height, Rgb(paper), Rgb(params.color))
        .context(error::PlotSnafu { reason: "pixel buffer does not match the canvas size" })?;

    Ok(canvas::trim(img))
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::canvas::opaque_bounds;
    use crate::wave::time_axis;

    use ndarray::Array1;

    fn params(width: u32, height: u32) -> WaveformParams {
        WaveformParams { width, height, line_width: 1, ..WaveformParams::default() }
    }

    #[test]
    fn range_has_margin() {
        let (lo, hi) = amplitude_range(&Array1::from(vec![-100i16, 100]), 0.05);

        assert!((lo + 110.0).abs() < 1e-9);
        assert!((hi - 110.0).abs() < 1e-9);
    }

    #[test]
    fn range_of_flat_and_empty_signals() {
        assert_eq!(amplitude_range(&Array1::from(vec![7i16; 4]), 0.05), (6.0, 8.0));
        assert_eq!(amplitude_range(&Array1::<i16>::zeros(0), 0.05), (-1.0, 1.0));
    }

    #[test]
    fn ramp_spans_full_width() {
        let samples: Array1<i16> = (0..100).map(|i| i as i16 * 100).collect();
        let times = time_axis(100, 1.0);

        let img = render(&samples, &times, 1.0, &params(200, 80)).unwrap();

        // line reaches both horizontal ends, margins trimmed vertically
        assert!(img.width() >= 198);
        assert!(img.height() < 80);
        assert_eq!(opaque_bounds(&img), Some((0, 0, img.width(), img.height())));
    }

    #[test]
    fn background_is_transparent() {
        let samples: Array1<i16> = (0..400)
            .map(|i| ((i as f64 / 20.0).sin() * 1000.0) as i16)
            .collect();
        let times = time_axis(400, 1.0);

        let img = render(&samples, &times, 1.0, &params(300, 100)).unwrap();

        assert!(img.pixels().any(|p| p[3] == 0));
        assert!(img.pixels().any(|p| p[3] > 0));

        // only the line color is ever drawn, at varying coverage
        let [r, g, b] = WaveformParams::default().color;
        assert!(img.pixels().filter(|p| p[3] > 0).all(|p| p.0[..3] == [r, g, b]));
    }

    #[test]
    fn rendering_is_deterministic() {
        let samples: Array1<i16> = (0..1000).map(|i| ((i * 37) % 2001 - 1000) as i16).collect();
        let times = time_axis(1000, 0.125);

        let a = render(&samples, &times, 0.125, &params(256, 64)).unwrap();
        let b = render(&samples, &times, 0.125, &params(256, 64)).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn line_stays_on_canvas_for_any_margin() {
        let samples: Array1<i16> = (0..500).map(|i| if i % 2 == 0 { i16::MAX } else { i16::MIN }).collect();
        let times = time_axis(500, 0.5);

        for &margin in [0.0, 0.05, 3.0].iter() {
            let p = WaveformParams { margin, line_width: 4, ..params(120, 40) };
            let img = render(&samples, &times, 0.5, &p).unwrap();

            assert!(img.width() <= 120 && img.height() <= 40);
            assert!(img.pixels().any(|p| p[3] > 0));
        }
    }

    #[test]
    fn light_line_color_is_kept() {
        let samples: Array1<i16> = (0..200).map(|i| (i % 50) as i16 * 10).collect();
        let times = time_axis(200, 1.0);
        let p = WaveformParams { color: [250, 250, 250], line_width: 3, ..params(100, 50) };

        let img = render(&samples, &times, 1.0, &p).unwrap();

        assert!(img.pixels().any(|p| p.0 == [250, 250, 250, 255]));
    }
}
