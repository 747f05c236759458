use crate::error::{self, Result};

use std::io::{Read, Error as IoError, ErrorKind as IoErrorKind};
use std::path::Path;

use hound::{WavReader, WavSpec, Sample as InputSample, Error, SampleFormat};
use log::{debug, warn};
use ndarray::{s, Array1, ArrayBase, Data, Ix1};
use num::traits::Zero;
use snafu::{ensure, ResultExt};


pub trait WavReaderExt<R> {
    /// Reads all frames into a single buffer with channels interleaved
    /// (`L, R, L, R, ...` for stereo).
    fn collect_interleaved<S>(self) -> Result<(Array1<S>, WavSpec), Error>
    where
        S: InputSample + Zero + Clone;
}

impl<R> WavReaderExt<R> for WavReader<R>
where
    R: Read,
{
    fn collect_interleaved<S>(self) -> Result<(Array1<S>, WavSpec), Error>
    where
        S: InputSample + Zero + Clone,
    {
        let spec = self.spec();
        let len = self.duration() as usize * spec.channels as usize;
        let mut iter = self.into_samples::<S>();

        let mut data = Array1::zeros(len);

        for i in 0..len {
            data[i] = iter.next().ok_or_else(|| {
                Error::IoError(IoError::new(IoErrorKind::InvalidData, "not enough data"))
            })??;
        }

        Ok((data, spec))
    }
}


/// A fully decoded 16 bit PCM wave file.
#[derive(Debug, Clone)]
pub struct Recording {
    pub sample_rate: u32,
    pub frames: usize,
    pub channels: u16,
    pub samples: Array1<i16>,
}

impl Recording {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let reader = WavReader::open(path).context(error::OpenInputSnafu { path })?;
        let spec = reader.spec();

        ensure!(spec.sample_format == SampleFormat::Int && spec.bits_per_sample == 16,
                error::UnsupportedFormatSnafu { path, format: spec.sample_format, bits: spec.bits_per_sample });

        let frames = reader.duration() as usize;
        let (samples, spec) = reader.collect_interleaved::<i16>()
            .context(error::ReadSamplesSnafu { path })?;

        debug!("loaded {}: {} frames, {} channels at {} Hz", path.display(), frames,
               spec.channels, spec.sample_rate);

        Ok(Recording {
            sample_rate: spec.sample_rate,
            frames,
            channels: spec.channels,
            samples,
        })
    }

    pub fn duration(&self) -> f64 {
        self.frames as f64 / self.sample_rate as f64
    }

    pub fn split_channels(&self) -> Channels {
        if self.channels != 2 {
            warn!("expected a stereo recording but got {} channel(s), channel separation will be wrong",
                  self.channels);
        }

        deinterleave(&self.samples)
    }
}


#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channels {
    pub left: Array1<i16>,
    pub right: Array1<i16>,
}

/// Splits an interleaved stereo buffer: even indices go left, odd indices
/// go right.
pub fn deinterleave<D>(samples: &ArrayBase<D, Ix1>) -> Channels
where
    D: Data<Elem = i16>,
{
    Channels {
        left: samples.slice(s![0..;2]).to_owned(),
        right: samples.slice(s![1..;2]).to_owned(),
    }
}

/// `num` evenly spaced timestamps from zero to `duration`, both endpoints
/// included.
pub fn time_axis(num: usize, duration: f64) -> Array1<f64> {
    match num {
        0 => Array1::zeros(0),
        1 => Array1::zeros(1),
        _ => Array1::linspace(0.0, duration, num),
    }
}
