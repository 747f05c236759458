pub mod canvas;
pub mod colormap;
pub mod spectrogram;
pub mod waveform;
