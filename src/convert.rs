//! The conversion job: wave file in, waveform and spectrogram textures out.

use crate::error::Result;
use crate::ft::{Spectrogram, SpectrogramBuilder};
use crate::params::Parameters;
use crate::profile;
use crate::render;
use crate::utils;
use crate::wave::{self, Recording};

use std::path::{Path, PathBuf};

use image::RgbaImage;
use log::info;
use ndarray::Array1;


/// File locations relative to a project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    root: PathBuf,
}

impl Layout {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Layout { root: root.into() }
    }

    pub fn assets(&self) -> PathBuf {
        self.root.join("Assets")
    }

    pub fn input(&self) -> PathBuf {
        self.assets().join("wave.wav")
    }

    pub fn output_dir(&self) -> PathBuf {
        self.assets().join("GeneratedPlots")
    }

    pub fn waveform(&self) -> PathBuf {
        self.output_dir().join("waveform.png")
    }

    pub fn spectrogram(&self) -> PathBuf {
        self.output_dir().join("frequencySpectrum.png")
    }

    pub fn profile(&self, name: &Path) -> PathBuf {
        self.assets().join(name)
    }
}


/// Everything produced by a run, kept for previews and inspection.
#[derive(Debug, Clone)]
pub struct Output {
    pub left: Array1<i16>,
    pub times: Array1<f64>,
    pub duration: f64,
    pub waveform: RgbaImage,
    pub spectrum: Spectrogram<f64>,
    pub spectrogram: RgbaImage,
}


pub fn analyze(samples: &Array1<i16>, sample_rate: u32, params: &Parameters) -> Spectrogram<f64> {
    let sp = &params.spectrogram;

    let window = sp.window.build::<f64>(sp.nfft);
    let mut analyzer = SpectrogramBuilder::new(window.as_ref())
        .overlap(sp.overlap)
        .build();

    analyzer.process(&samples.mapv(f64::from), sample_rate as f64)
}

/// Runs all steps in order. Each image is written before the next step
/// starts, so a failure leaves only the files of the completed steps.
pub fn run(layout: &Layout, params: &Parameters) -> Result<Output> {
    params.validate()?;

    let recording = Recording::open(layout.input())?;
    let channels = recording.split_channels();

    let left = channels.left;
    let duration = recording.duration();
    let times = wave::time_axis(left.len(), duration);

    // waveform
    let waveform = render::waveform::render(&left, &times, duration, &params.waveform)?;
    utils::write_png(layout.waveform(), &waveform)?;
    info!("wrote {} ({}x{})", layout.waveform().display(), waveform.width(), waveform.height());

    // spectrogram
    let spectrum = analyze(&left, recording.sample_rate, params);
    let spectrogram = render::spectrogram::render(&spectrum, duration, &params.spectrogram);
    utils::write_png(layout.spectrogram(), &spectrogram)?;
    info!("wrote {} ({}x{})", layout.spectrogram().display(), spectrogram.width(), spectrogram.height());

    // height profile for the terrain generator
    if let Some(name) = &params.profile {
        let path = layout.profile(name);
        profile::write_profile(&path, &profile::height_profile(&waveform))?;
        info!("wrote {}", path.display());
    }

    Ok(Output { left, times, duration, waveform, spectrum, spectrogram })
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_paths() {
        let layout = Layout::new("/project");

        assert_eq!(layout.input(), PathBuf::from("/project/Assets/wave.wav"));
        assert_eq!(layout.waveform(), PathBuf::from("/project/Assets/GeneratedPlots/waveform.png"));
        assert_eq!(layout.spectrogram(),
                   PathBuf::from("/project/Assets/GeneratedPlots/frequencySpectrum.png"));
        assert_eq!(layout.profile(Path::new("waveform.txt")),
                   PathBuf::from("/project/Assets/waveform.txt"));
    }
}
