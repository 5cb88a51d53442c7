//! Loading and conditioning of source waveforms.
//!
//! The tracer itself only consumes [`Source`](crate::source::Source)
//! objects built from raw mono samples; everything here is the
//! collaborator side that produces them: decoding audio files, picking or
//! downmixing a channel, and explicit resampling. Nothing in the tracing
//! path resamples implicitly.

mod load_options;
mod loader;
mod resampler;

pub use load_options::{LoadOptions, MonoConversion};
pub use resampler::AudioResampler;

use crate::error::{Result, SonitraceError};
use crate::math::Vec3;
use crate::source::Source;
use std::path::Path;
use std::time::Duration;

/// Decoded audio samples in interleaved layout.
///
/// Frames hold one sample per channel: stereo is `[L0, R0, L1, R1, ...]`,
/// mono is just the sample sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioData {
    samples: Vec<f32>,
    sample_rate: u32,
    channels: u16,
}

impl AudioData {
    /// Wraps already-decoded interleaved samples.
    pub fn new(samples: Vec<f32>, sample_rate: u32, channels: u16) -> Result<Self> {
        if sample_rate == 0 {
            return Err(SonitraceError::AudioFormat(
                "sample rate must be greater than 0".to_string(),
            ));
        }
        if channels == 0 {
            return Err(SonitraceError::AudioFormat(
                "channel count must be greater than 0".to_string(),
            ));
        }
        if samples.len() % channels as usize != 0 {
            return Err(SonitraceError::AudioFormat(format!(
                "{} samples do not divide into {} channels",
                samples.len(),
                channels
            )));
        }
        Ok(Self {
            samples,
            sample_rate,
            channels,
        })
    }

    /// Decodes an audio file with default options.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        loader::load_audio_file(path.as_ref(), &LoadOptions::default())
    }

    /// Decodes an audio file, applying the given load options.
    pub fn from_path_with_options(path: impl AsRef<Path>, options: &LoadOptions) -> Result<Self> {
        loader::load_audio_file(path.as_ref(), options)
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    pub fn total_frames(&self) -> usize {
        self.samples.len() / self.channels as usize
    }

    pub fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.total_frames() as f64 / self.sample_rate as f64)
    }

    /// Extracts one channel as a planar sample vector.
    pub fn channel_samples(&self, channel: usize) -> Result<Vec<f32>> {
        if channel >= self.channels as usize {
            return Err(SonitraceError::AudioFormat(format!(
                "channel {} out of range (have {})",
                channel, self.channels
            )));
        }
        Ok(self
            .samples
            .chunks(self.channels as usize)
            .map(|frame| frame[channel])
            .collect())
    }

    /// Returns a copy resampled to `target_rate`.
    pub fn resample(&self, target_rate: u32) -> Result<Self> {
        let resampler = AudioResampler::new(self.sample_rate, target_rate, self.channels, None)?;
        let samples = resampler.resample_interleaved(&self.samples)?;
        Self::new(samples, target_rate, self.channels)
    }

    /// Turns the first channel into a traceable [`Source`] at `location`.
    ///
    /// Peak normalization happens in the source constructor.
    pub fn into_source(self, location: Vec3, name: impl Into<String>) -> Result<Source> {
        let mono = if self.channels == 1 {
            self.samples
        } else {
            self.channel_samples(0)?
        };
        Source::from_samples(mono, self.sample_rate, location, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_validates_shape() {
        assert!(AudioData::new(vec![0.0; 4], 8000, 2).is_ok());
        assert!(AudioData::new(vec![0.0; 5], 8000, 2).is_err());
        assert!(AudioData::new(vec![0.0; 4], 0, 2).is_err());
        assert!(AudioData::new(vec![0.0; 4], 8000, 0).is_err());
    }

    #[test]
    fn channel_extraction_deinterleaves() {
        let data = AudioData::new(vec![1.0, -1.0, 2.0, -2.0], 8000, 2).unwrap();
        assert_eq!(data.channel_samples(0).unwrap(), vec![1.0, 2.0]);
        assert_eq!(data.channel_samples(1).unwrap(), vec![-1.0, -2.0]);
        assert!(data.channel_samples(2).is_err());
        assert_eq!(data.total_frames(), 2);
    }

    #[test]
    fn into_source_takes_first_channel() {
        let data = AudioData::new(vec![0.5, -1.0, 0.25, -1.0], 8000, 2).unwrap();
        let source = data
            .into_source(Vec3::new(1.0, 2.0, 3.0), "speaker")
            .unwrap();
        // Left channel [0.5, 0.25], normalized by its own peak.
        assert_eq!(source.signal(), &[1.0, 0.5]);
        assert_eq!(source.sample_rate(), 8000);
    }
}
