use std::path::PathBuf;

use snafu::Snafu;


#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("cannot open wave file {}: {}", path.display(), source))]
    OpenInput { path: PathBuf, source: hound::Error },

    #[snafu(display("cannot read samples from {}: {}", path.display(), source))]
    ReadSamples { path: PathBuf, source: hound::Error },

    #[snafu(display("unsupported sample format in {}: {:?} with {} bits (expected 16 bit integer PCM)",
                    path.display(), format, bits))]
    UnsupportedFormat { path: PathBuf, format: hound::SampleFormat, bits: u16 },

    #[snafu(display("output directory {} does not exist", path.display()))]
    OutputDirMissing { path: PathBuf },

    #[snafu(display("cannot draw plot: {}", reason))]
    Plot { reason: String },

    #[snafu(display("cannot write image {}: {}", path.display(), source))]
    WriteImage { path: PathBuf, source: image::ImageError },

    #[snafu(display("cannot write profile {}: {}", path.display(), source))]
    WriteProfile { path: PathBuf, source: std::io::Error },

    #[snafu(display("cannot open parameter file {}: {}", path.display(), source))]
    LoadParams { path: PathBuf, source: std::io::Error },

    #[snafu(display("invalid parameter file {}: {}", path.display(), source))]
    ParseParams { path: PathBuf, source: serde_yaml::Error },

    #[snafu(display("invalid parameters: {}", reason))]
    InvalidParams { reason: String },

    #[snafu(display("cannot start gnuplot: {}", source))]
    Preview { source: gnuplot::GnuplotInitError },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
