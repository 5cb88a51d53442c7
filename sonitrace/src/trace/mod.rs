//! The tracing driver: direction grid, parallel dispatch, reduction.
//!
//! For every receiver, a spherical grid of ray directions is traced in
//! parallel and the per-ray buffers are summed into one channel. Rays are
//! dispatched in chunks sized so that the combined working set of private
//! ray buffers stays under [`TraceConfig::mem_chunk`] bytes; within a
//! chunk, worker results stream over a channel and are accumulated
//! serially as they complete, in whatever order they finish (float
//! addition is treated as associative up to reduction-order noise).

mod tracer;

use crate::error::{Result, SonitraceError};
use crate::geometry::SurfaceMode;
use crate::math::{self, Vec3};
use crate::output;
use crate::scene::Scene;
use rayon::prelude::*;
use std::path::Path;

/// Speed of sound, m/s, at room temperature and 1 atm.
pub const PROP_SPEED: f32 = 343.0;
/// Per-bounce specular reflection gain, estimated for 500 Hz from
/// random-incidence absorption.
pub const REFL_COEFF: f32 = 0.97;
/// Absolute cutoff on accumulated path length, meters.
pub const MAX_PATH_LEN: f32 = 50.0;
/// Atmospheric attenuation exponent per meter (energy domain), roughly
/// room temperature at 50% humidity.
pub const ATM_ATTEN: f32 = 6.0e-4;

/// Hard cap on reflections per ray. The path budget alone bounds depth for
/// any sane scene; this guards degenerate geometry where the per-bounce
/// distance underflows and the budget stops advancing.
pub(crate) const MAX_BOUNCES: usize = 1024;

/// Knobs for a single [`Scene::trace`] call.
#[derive(Debug, Clone)]
pub struct TraceConfig {
    /// Azimuthal divisions of the direction sphere.
    pub rays_azimuth: usize,
    /// Polar divisions of the direction sphere.
    pub rays_polar: usize,
    /// Output length per channel, in seconds.
    pub duration: f64,
    /// Upper bound, in bytes, on the per-chunk working set of private ray
    /// buffers. A hard constraint, not a hint.
    pub mem_chunk: u64,
    /// Surface intersection acceptance predicate.
    pub surface_mode: SurfaceMode,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            rays_azimuth: 128,
            rays_polar: 128,
            duration: 5.0,
            mem_chunk: 5_000_000_000,
            surface_mode: SurfaceMode::default(),
        }
    }
}

impl TraceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rays_azimuth(mut self, n: usize) -> Self {
        self.rays_azimuth = n;
        self
    }

    pub fn rays_polar(mut self, n: usize) -> Self {
        self.rays_polar = n;
        self
    }

    pub fn duration(mut self, seconds: f64) -> Self {
        self.duration = seconds;
        self
    }

    pub fn mem_chunk(mut self, bytes: u64) -> Self {
        self.mem_chunk = bytes;
        self
    }

    pub fn surface_mode(mut self, mode: SurfaceMode) -> Self {
        self.surface_mode = mode;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.rays_azimuth == 0 || self.rays_polar == 0 {
            return Err(SonitraceError::Configuration(
                "direction grid must have at least one division on each axis".into(),
            ));
        }
        if !(self.duration > 0.0) {
            return Err(SonitraceError::Configuration(format!(
                "duration must be positive, got {}",
                self.duration
            )));
        }
        if self.mem_chunk == 0 {
            return Err(SonitraceError::Configuration(
                "mem_chunk must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

/// The traced multi-channel signal, one channel per receiver in insertion
/// order.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceOutput {
    channels: Vec<Vec<f32>>,
    sample_rate: u32,
}

impl TraceOutput {
    pub fn channels(&self) -> &[Vec<f32>] {
        &self.channels
    }

    pub fn into_channels(self) -> Vec<Vec<f32>> {
        self.channels
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Writes the channels as a 32-bit float PCM WAV file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        output::write_wav(path, &self.channels, self.sample_rate)
    }
}

/// All ray directions of the grid, polar index outer, azimuth inner.
fn direction_grid(rays_azimuth: usize, rays_polar: usize) -> Vec<Vec3> {
    let mut directions = Vec::with_capacity(rays_azimuth * rays_polar);
    for polar_index in 0..rays_polar {
        let polar = polar_index as f32 * std::f32::consts::PI / rays_polar as f32;
        for azimuth_index in 0..rays_azimuth {
            let azimuth = azimuth_index as f32 * std::f32::consts::TAU / rays_azimuth as f32;
            directions.push(math::spherical_direction(polar, azimuth));
        }
    }
    directions
}

/// Rays per chunk so that `chunk_size * num_samples * 4 <= mem_chunk`,
/// clamped to at least one ray and at most the whole grid.
fn chunk_size(mem_chunk: u64, num_samples: usize, total_rays: usize) -> usize {
    let bytes_per_ray = 4 * num_samples.max(1) as u64;
    (mem_chunk / bytes_per_ray).clamp(1, total_rays.max(1) as u64) as usize
}

pub(crate) fn run(scene: &Scene, config: &TraceConfig) -> Result<TraceOutput> {
    config.validate()?;

    let sample_rate = scene.sample_rate();
    let num_samples = (sample_rate as f64 * config.duration).round() as usize;

    // Without sources there is nothing to hear; hand back zero-filled
    // channels of the requested shape instead of burning rays.
    if scene.sources().is_empty() || num_samples == 0 {
        return Ok(TraceOutput {
            channels: vec![vec![0.0; num_samples]; scene.receivers().len()],
            sample_rate,
        });
    }

    let directions = direction_grid(config.rays_azimuth, config.rays_polar);
    let total_rays = directions.len();
    let chunk_len = chunk_size(config.mem_chunk, num_samples, total_rays);
    let num_chunks = total_rays.div_ceil(chunk_len);

    let mut channels = Vec::with_capacity(scene.receivers().len());
    for (channel, receiver) in scene.receivers().iter().enumerate() {
        log::info!(
            "tracing channel {} ('{}'): {} rays x {} samples in {} chunk(s)",
            channel,
            receiver.name(),
            total_rays,
            num_samples,
            num_chunks
        );

        let origin = receiver.location();
        let mut accumulator = vec![0.0f32; num_samples];
        for (chunk_index, chunk) in directions.chunks(chunk_len).enumerate() {
            let (tx, rx) = crossbeam_channel::bounded::<Vec<f32>>(chunk.len());
            rayon::scope(|scope| {
                scope.spawn(|_| {
                    chunk.par_iter().for_each_with(tx, |tx, &direction| {
                        let ray_data = tracer::trace_ray(
                            scene,
                            origin,
                            direction,
                            num_samples,
                            config.surface_mode,
                        );
                        // The driver only stops receiving on teardown.
                        let _ = tx.send(ray_data);
                    });
                });
                for ray_data in rx.iter() {
                    for (slot, sample) in accumulator.iter_mut().zip(&ray_data) {
                        *slot += sample;
                    }
                }
            });
            log::debug!(
                "channel {}: chunk {}/{} ({} rays) accumulated",
                channel,
                chunk_index + 1,
                num_chunks,
                chunk.len()
            );
        }

        normalize_peak(&mut accumulator);
        channels.push(accumulator);
        log::info!("finished channel {}", channel);
    }

    Ok(TraceOutput {
        channels,
        sample_rate,
    })
}

/// Scales to a peak absolute value of 1.0. All-zero buffers stay zero.
fn normalize_peak(samples: &mut [f32]) {
    let peak = samples.iter().fold(0.0f32, |acc, s| acc.max(s.abs()));
    if peak > 0.0 {
        for sample in samples {
            *sample /= peak;
        }
    }
}
