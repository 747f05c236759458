use crate::error::{self, Result};
use crate::ft::Spectrogram;
use crate::params::SpectrogramParams;

use std::path::Path;

use image::{ImageFormat, RgbaImage};
use ndarray::{ArrayBase, Data, Ix1};
use snafu::{ensure, ResultExt};


/// Writes `img` as PNG. The parent directory has to exist already.
pub fn write_png<P: AsRef<Path>>(path: P, img: &RgbaImage) -> Result<()> {
    let path = path.as_ref();

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        ensure!(dir.is_dir(), error::OutputDirMissingSnafu { path: dir });
    }

    img.save_with_format(path, ImageFormat::Png)
        .context(error::WriteImageSnafu { path })
}

pub fn show_waveform<D1, D2>(samples: &ArrayBase<D1, Ix1>, times: &ArrayBase<D2, Ix1>, duration: f64)
    -> Result<()>
where
    D1: Data<Elem = i16>,
    D2: Data<Elem = f64>,
{
    use gnuplot::{AutoOption, AxesCommon, Figure};

    let mut fig = Figure::new();
    let ax = fig.axes2d();
    ax.set_x_range(AutoOption::Fix(0.0), AutoOption::Fix(duration));
    ax.lines(times.iter(), samples.iter().map(|&v| v as f64), &[]);
    fig.show().context(error::PreviewSnafu)?;

    Ok(())
}

pub fn show_spectrogram(spectrum: &Spectrogram<f64>, duration: f64, params: &SpectrogramParams)
    -> Result<()>
{
    use gnuplot::{AutoOption, AxesCommon, Figure};

    if spectrum.num_frames() == 0 {
        return Ok(());
    }

    let (t0, t1) = spectrum.time_extent();
    let (f0, f1) = spectrum.freq_extent();

    // gnuplot cannot color infinite values
    let visual = spectrum.to_db().mapv(|v| v.max(params.vmin).min(params.vmax));

    let mut fig = Figure::new();
    let ax = fig.axes2d();
    ax.set_palette(gnuplot::HELIX);
    ax.set_x_range(AutoOption::Fix(0.0), AutoOption::Fix(duration));
    ax.set_y_range(AutoOption::Fix(f0), AutoOption::Fix(f1));
    ax.image(visual.t().iter(), visual.shape()[1], visual.shape()[0], Some((t0, f0, t1, f1)), &[]);
    fig.show().context(error::PreviewSnafu)?;

    Ok(())
}
