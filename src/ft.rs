use crate::window::WindowFunction;

use ndarray::{s, Array1, Array2, ArrayBase, Data, Ix1};
use num::{Complex, Float, traits::FloatConst, traits::NumAssign, traits::Zero};
use rustfft::{Fft, FftNum, FftPlanner};

use std::sync::Arc;


pub fn power_to_db<F: Float>(p: F) -> F {
    F::from(10.0).unwrap() * F::log10(p)
}

/// Frequencies of the bins of a one-sided spectrum of length `nfft / 2 + 1`.
pub fn rfftfreq(nfft: usize, sample_rate: f64) -> Array1<f64> {
    let df = sample_rate / nfft as f64;
    (0..nfft / 2 + 1).map(|i| i as f64 * df).collect()
}


/// One-sided power spectral density over time.
#[derive(Debug, Clone)]
pub struct Spectrogram<T> {
    /// Power spectral density, indexed by `(frame, bin)`.
    pub power: Array2<T>,

    /// Center time of each frame in seconds.
    pub times: Array1<f64>,

    /// Frequency of each bin in Hz.
    pub freqs: Array1<f64>,

    /// Distance between frame centers in seconds.
    pub frame_step: f64,
}

impl<T: Float> Spectrogram<T> {
    pub fn num_frames(&self) -> usize {
        self.power.shape()[0]
    }

    pub fn num_bins(&self) -> usize {
        self.power.shape()[1]
    }

    pub fn to_db(&self) -> Array2<T> {
        self.power.mapv(power_to_db)
    }

    /// Time interval covered by the frames, each frame extending half a
    /// step to either side of its center.
    pub fn time_extent(&self) -> (f64, f64) {
        if self.times.is_empty() {
            return (0.0, 0.0);
        }

        let pad = self.frame_step / 2.0;
        (self.times[0] - pad, self.times[self.times.len() - 1] + pad)
    }

    pub fn freq_extent(&self) -> (f64, f64) {
        if self.freqs.is_empty() {
            return (0.0, 0.0);
        }

        (self.freqs[0], self.freqs[self.freqs.len() - 1])
    }
}


pub struct SpectrogramBuilder<'a, T> {
    window: &'a dyn WindowFunction<T>,
    overlap: Option<usize>,
}

impl<'a, T> SpectrogramBuilder<'a, T>
where
    T: FftNum + Float + FloatConst + NumAssign,
{
    pub fn new(window: &'a dyn WindowFunction<T>) -> Self {
        SpectrogramBuilder {
            window,
            overlap: None,
        }
    }

    pub fn overlap(mut self, overlap: usize) -> Self {
        self.overlap = Some(overlap);
        self
    }

    pub fn build(self) -> SpectrogramAnalyzer<T> {
        let nfft = self.window.len();
        let overlap = self.overlap.unwrap_or(nfft / 2).min(nfft - 1);

        let window = self.window.to_array();
        let window_power = window.iter().fold(T::zero(), |a, &w| a + w * w);

        let fft = FftPlanner::new().plan_fft_forward(nfft);

        SpectrogramAnalyzer {
            fft,
            window,
            window_power,
            overlap,
            buffer: vec![Complex::zero(); nfft],
        }
    }
}


/// Computes power spectral density spectrograms with a fixed window and
/// overlap.
pub struct SpectrogramAnalyzer<T> {
    fft: Arc<dyn Fft<T>>,
    window: Array1<T>,
    window_power: T,
    overlap: usize,
    buffer: Vec<Complex<T>>,
}

impl<T> SpectrogramAnalyzer<T>
where
    T: FftNum + Float + FloatConst + NumAssign,
{
    pub fn nfft(&self) -> usize {
        self.window.len()
    }

    pub fn step(&self) -> usize {
        self.nfft() - self.overlap
    }

    /// Number of full frames for a signal of `len` samples, after padding
    /// short signals to one segment.
    pub fn num_frames(&self, len: usize) -> usize {
        let len = len.max(self.nfft());
        (len - self.overlap) / self.step()
    }

    pub fn process<D>(&mut self, input: &ArrayBase<D, Ix1>, sample_rate: f64) -> Spectrogram<T>
    where
        D: Data<Elem = T>,
    {
        let nfft = self.nfft();
        let step = self.step();

        // zero-pad signals shorter than a single segment
        let signal = if input.len() < nfft {
            let mut padded = Array1::zeros(nfft);
            padded.slice_mut(s![..input.len()]).assign(input);
            padded
        } else {
            input.to_owned()
        };

        let num_frames = self.num_frames(signal.len());
        let num_bins = nfft / 2 + 1;

        let two = T::from(2.0).unwrap();
        let scale = T::one() / (T::from(sample_rate).unwrap() * self.window_power);

        let mut power = Array2::zeros((num_frames, num_bins));

        for f in 0..num_frames {
            let segment = signal.slice(s![f * step..f * step + nfft]);

            for ((b, &x), &w) in self.buffer.iter_mut().zip(segment.iter()).zip(self.window.iter()) {
                *b = Complex { re: x * w, im: T::zero() };
            }

            self.fft.process(&mut self.buffer);

            let mut row = power.row_mut(f);
            for (k, p) in row.iter_mut().enumerate() {
                let mut v = self.buffer[k].norm_sqr() * scale;

                // one-sided: fold negative frequencies, except DC and Nyquist
                let nyquist = nfft % 2 == 0 && k == nfft / 2;
                if k != 0 && !nyquist {
                    v *= two;
                }

                *p = v;
            }
        }

        let half = (nfft / 2) as f64;
        let times = (0..num_frames)
            .map(|f| (half + (f * step) as f64) / sample_rate)
            .collect();

        Spectrogram {
            power,
            times,
            freqs: rfftfreq(nfft, sample_rate),
            frame_step: step as f64 / sample_rate,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::window;

    fn tone(freq: f64, sample_rate: f64, len: usize) -> Array1<f64> {
        (0..len)
            .map(|i| (2.0 * std::f64::consts::PI * freq * i as f64 / sample_rate).sin())
            .collect()
    }

    #[test]
    fn frame_count_and_bins() {
        let w = window::hann::<f64>(256);
        let mut an = SpectrogramBuilder::new(&w).overlap(128).build();

        let spec = an.process(&Array1::zeros(1024), 8000.0);

        assert_eq!(spec.num_frames(), (1024 - 128) / 128);
        assert_eq!(spec.num_bins(), 129);
        assert_eq!(spec.times.len(), spec.num_frames());
        assert!((spec.times[0] - 128.0 / 8000.0).abs() < 1e-12);
        assert!((spec.freqs[128] - 4000.0).abs() < 1e-9);
    }

    #[test]
    fn short_signal_is_padded_to_one_frame() {
        let w = window::hann::<f64>(256);
        let mut an = SpectrogramBuilder::new(&w).overlap(128).build();

        let spec = an.process(&Array1::from_elem(10, 1.0), 8000.0);

        assert_eq!(spec.num_frames(), 1);
        assert!(spec.power[(0, 0)] > 0.0);
    }

    #[test]
    fn tone_peaks_at_its_bin() {
        let sample_rate = 8000.0;
        let freq = 1000.0;              // bin 32 for nfft = 256

        let w = window::hann::<f64>(256);
        let mut an = SpectrogramBuilder::new(&w).overlap(128).build();

        let spec = an.process(&tone(freq, sample_rate, 4096), sample_rate);

        for f in 0..spec.num_frames() {
            let row = spec.power.row(f);
            let (peak, _) = row.iter().enumerate()
                .fold((0, f64::MIN), |(bi, bv), (i, &v)| if v > bv { (i, v) } else { (bi, bv) });

            assert_eq!(peak, 32);
        }
    }

    #[test]
    fn psd_integrates_to_signal_power() {
        // Parseval with hann scaling: the sum over bins of the psd times the
        // bin width approximates the mean square of the signal (0.5 for a
        // unit sine).
        let sample_rate = 8000.0;
        let w = window::hann::<f64>(256);
        let mut an = SpectrogramBuilder::new(&w).overlap(128).build();

        let spec = an.process(&tone(1000.0, sample_rate, 4096), sample_rate);
        let df = sample_rate / 256.0;
        let total: f64 = spec.power.row(3).sum() * df;

        assert!((total - 0.5).abs() < 0.05, "total power {}", total);
    }

    #[test]
    fn every_frame_is_transformed_on_reuse() {
        let sample_rate = 8000.0;
        let w = window::hann::<f64>(256);
        let mut an = SpectrogramBuilder::new(&w).overlap(128).build();

        let signal = tone(2000.0, sample_rate, 2048);
        let first = an.process(&signal, sample_rate);

        an.process(&Array1::zeros(512), sample_rate);
        let again = an.process(&signal, sample_rate);

        let mut fresh = SpectrogramBuilder::new(&w).overlap(128).build();
        assert_eq!(again.power, first.power);
        assert_eq!(fresh.process(&signal, sample_rate).power, first.power);

        // 2 kHz is bin 64
        for f in 0..first.num_frames() {
            assert!(first.power[(f, 64)] > first.power[(f, 0)]);
        }
    }

    #[test]
    fn silence_maps_to_negative_infinity_db() {
        let w = window::hann::<f64>(16);
        let mut an = SpectrogramBuilder::new(&w).build();

        let db = an.process(&Array1::zeros(64), 100.0).to_db();
        assert!(db.iter().all(|v| v.is_infinite() && *v < 0.0));
    }
}
