use super::canvas::{self, TRANSPARENT};
use super::colormap::Normalize;
use crate::ft::Spectrogram;
use crate::params::SpectrogramParams;

use image::RgbaImage;


/// Frame shown in each pixel column for an x range of `[0, duration]`, or
/// `None` where no frame covers the column.
fn column_frames(spec: &Spectrogram<f64>, width: u32, duration: f64) -> Vec<Option<usize>> {
    let (t0, t1) = spec.time_extent();
    let n = spec.num_frames();

    (0..width)
        .map(|px| {
            let t = (px as f64 + 0.5) / width as f64 * duration;

            if n == 0 || t < t0 || t >= t1 {
                return None;
            }

            let f = ((t - t0) / spec.frame_step).floor() as usize;
            Some(f.min(n - 1))
        })
        .collect()
}

/// Bin shown in each pixel row, lowest frequency at the bottom.
fn row_bins(spec: &Spectrogram<f64>, height: u32) -> Vec<usize> {
    let n = spec.num_bins();

    (0..height)
        .map(|py| {
            let frac = 1.0 - (py as f64 + 0.5) / height as f64;
            ((frac * n as f64).floor() as usize).min(n.saturating_sub(1))
        })
        .collect()
}

/// Paints the spectrogram in dB, colored over `[vmin, vmax]`, and trims the
/// result to the painted area.
pub fn render(spec: &Spectrogram<f64>, duration: f64, params: &SpectrogramParams) -> RgbaImage {
    let mut img = RgbaImage::from_pixel(params.width, params.height, TRANSPARENT);

    if spec.num_frames() == 0 || spec.num_bins() == 0 {
        return img;
    }

    let db = spec.to_db();
    let norm = Normalize::new(params.vmin, params.vmax);

    let columns = column_frames(spec, params.width, duration);
    let rows = row_bins(spec, params.height);

    for (px, frame) in columns.iter().enumerate() {
        let frame = match frame {
            Some(f) => *f,
            None => continue,
        };

        for (py, &bin) in rows.iter().enumerate() {
            let color = params.colormap.map(norm.apply(db[(frame, bin)]));
            img.put_pixel(px as u32, py as u32, color);
        }
    }

    canvas::trim(img)
}
