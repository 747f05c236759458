use crate::error::{self, Result};
use crate::render::colormap::Colormap;
use crate::window::Window;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use snafu::{ensure, ResultExt};


/// Rendering parameters. Every field has a default, so an empty document
/// (or no document at all) gives the standard output.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Parameters {
    #[serde(default)]
    pub waveform: WaveformParams,

    #[serde(default)]
    pub spectrogram: SpectrogramParams,

    /// Where to write the waveform height profile, relative to the assets
    /// directory. Not written if absent.
    #[serde(default)]
    pub profile: Option<PathBuf>,
}

impl Parameters {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let file = std::fs::File::open(path).context(error::LoadParamsSnafu { path })?;
        let params: Parameters = serde_yaml::from_reader(file).context(error::ParseParamsSnafu { path })?;

        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<()> {
        let w = &self.waveform;
        let s = &self.spectrogram;

        ensure!(w.width > 0 && w.height > 0,
                error::InvalidParamsSnafu { reason: "waveform size must be non-zero" });
        ensure!(w.margin.is_finite() && w.margin >= 0.0,
                error::InvalidParamsSnafu { reason: "waveform margin must be finite and not negative" });
        ensure!(s.width > 0 && s.height > 0,
                error::InvalidParamsSnafu { reason: "spectrogram size must be non-zero" });
        ensure!(s.vmin.is_finite() && s.vmax.is_finite() && s.vmin < s.vmax,
                error::InvalidParamsSnafu { reason: "spectrogram vmin must be finite and below vmax" });
        ensure!(s.nfft >= 2,
                error::InvalidParamsSnafu { reason: "spectrogram nfft must be at least 2" });
        ensure!(s.overlap < s.nfft,
                error::InvalidParamsSnafu { reason: "spectrogram overlap must be smaller than nfft" });

        Ok(())
    }
}


#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WaveformParams {
    #[serde(default = "param_defaults::waveform_width")]
    pub width: u32,             // in pixels

    #[serde(default = "param_defaults::waveform_height")]
    pub height: u32,            // in pixels

    #[serde(default = "param_defaults::line_width")]
    pub line_width: u32,        // in pixels

    #[serde(default = "param_defaults::line_color")]
    pub color: [u8; 3],

    #[serde(default = "param_defaults::margin")]
    pub margin: f64,            // relative to amplitude range
}

impl Default for WaveformParams {
    fn default() -> Self {
        WaveformParams {
            width: param_defaults::waveform_width(),
            height: param_defaults::waveform_height(),
            line_width: param_defaults::line_width(),
            color: param_defaults::line_color(),
            margin: param_defaults::margin(),
        }
    }
}


#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SpectrogramParams {
    #[serde(default = "param_defaults::spectrogram_width")]
    pub width: u32,

    #[serde(default = "param_defaults::spectrogram_height")]
    pub height: u32,

    #[serde(default = "param_defaults::nfft")]
    pub nfft: usize,

    #[serde(default = "param_defaults::overlap")]
    pub overlap: usize,

    #[serde(default)]
    pub window: Window,

    #[serde(default = "param_defaults::vmin")]
    pub vmin: f64,              // in dB

    #[serde(default = "param_defaults::vmax")]
    pub vmax: f64,              // in dB

    #[serde(default)]
    pub colormap: Colormap,
}

impl Default for SpectrogramParams {
    fn default() -> Self {
        SpectrogramParams {
            width: param_defaults::spectrogram_width(),
            height: param_defaults::spectrogram_height(),
            nfft: param_defaults::nfft(),
            overlap: param_defaults::overlap(),
            window: Window::default(),
            vmin: param_defaults::vmin(),
            vmax: param_defaults::vmax(),
            colormap: Colormap::default(),
        }
    }
}


mod param_defaults {
    pub fn waveform_width() -> u32 {
        2000
    }

    pub fn waveform_height() -> u32 {
        500
    }

    pub fn line_width() -> u32 {
        2
    }

    pub fn line_color() -> [u8; 3] {
        [0x1f, 0x77, 0xb4]
    }

    pub fn margin() -> f64 {
        0.05
    }

    pub fn spectrogram_width() -> u32 {
        2000
    }

    pub fn spectrogram_height() -> u32 {
        1000
    }

    pub fn nfft() -> usize {
        256
    }

    pub fn overlap() -> usize {
        128
    }

    pub fn vmin() -> f64 {
        -20.0
    }

    pub fn vmax() -> f64 {
        50.0
    }
}
