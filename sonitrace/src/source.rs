//! Point sound sources.

use crate::error::{Result, SonitraceError};
use crate::geometry::Sphere;
use crate::math::Vec3;

/// Hit radius of a source's spherical target, in meters.
///
/// A ray picks up a source's signal when it passes within this radius of
/// the source location.
pub const SOURCE_RADIUS: f32 = 0.05;

/// A point emitter carrying a monaural waveform.
///
/// The signal is peak-normalized to `[-1, 1]` at construction and is
/// immutable once the source is placed in a scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Source {
    location: Vec3,
    signal: Vec<f32>,
    sample_rate: u32,
    name: String,
}

impl Source {
    /// Builds a source from raw mono samples.
    ///
    /// The samples are scaled so the peak absolute value is 1.0. Empty or
    /// all-zero signals and a zero sample rate are rejected; a silent
    /// source has no meaningful normalization and would contribute nothing.
    pub fn from_samples(
        samples: Vec<f32>,
        sample_rate: u32,
        location: Vec3,
        name: impl Into<String>,
    ) -> Result<Self> {
        let name = name.into();
        if sample_rate == 0 {
            return Err(SonitraceError::Configuration(format!(
                "source '{}': sample rate must be greater than 0",
                name
            )));
        }
        if samples.is_empty() {
            return Err(SonitraceError::EmptySignal(format!(
                "source '{}' has no samples",
                name
            )));
        }

        let peak = samples.iter().fold(0.0f32, |acc, s| acc.max(s.abs()));
        if peak == 0.0 {
            return Err(SonitraceError::EmptySignal(format!(
                "source '{}' is silent",
                name
            )));
        }

        let signal = samples.iter().map(|s| s / peak).collect();
        Ok(Self {
            location,
            signal,
            sample_rate,
            name,
        })
    }

    /// Prepends `round(seconds * sample_rate)` zero samples.
    ///
    /// Chainable; delaying by zero is a no-op and successive delays add.
    pub fn delay(mut self, seconds: f64) -> Self {
        let pad = (seconds * self.sample_rate as f64).round().max(0.0) as usize;
        if pad > 0 {
            let mut padded = vec![0.0f32; pad + self.signal.len()];
            padded[pad..].copy_from_slice(&self.signal);
            self.signal = padded;
        }
        self
    }

    pub fn location(&self) -> Vec3 {
        self.location
    }

    pub fn signal(&self) -> &[f32] {
        &self.signal
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The spherical target rays are tested against.
    pub fn hit_sphere(&self) -> Sphere {
        Sphere::new(self.location, SOURCE_RADIUS)
    }
}
