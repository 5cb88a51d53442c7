//! Scene ownership: surfaces, sources, receivers.

use crate::error::Result;
use crate::geometry::Triangle;
use crate::receiver::Receiver;
use crate::source::Source;
use crate::trace::{self, TraceConfig, TraceOutput};

/// A traceable scene.
///
/// Owns the triangle geometry, the sources, and the receivers. Triangles
/// are typically added once; sources and receivers can be swapped out via
/// [`Scene::clear`] so the same geometry serves successive traces.
///
/// The scene's sample rate is the maximum rate over all added sources and
/// is maintained incrementally. Mixing sources with different rates is not
/// resampled here: output buffers are sized by the maximum rate while each
/// source's delay is quantized at its own rate, so mismatched sources
/// produce misaligned contributions. Resample up front (see
/// [`crate::audio_data`]) when that matters.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    triangles: Vec<Triangle>,
    sources: Vec<Source>,
    receivers: Vec<Receiver>,
    sample_rate: u32,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_surface(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    pub fn add_surfaces(&mut self, triangles: impl IntoIterator<Item = Triangle>) {
        self.triangles.extend(triangles);
    }

    pub fn add_source(&mut self, source: Source) {
        if self.sample_rate != 0 && source.sample_rate() != self.sample_rate {
            log::warn!(
                "source '{}' rate {} Hz differs from scene rate {} Hz; contributions will be misaligned",
                source.name(),
                source.sample_rate(),
                self.sample_rate
            );
        }
        self.sample_rate = self.sample_rate.max(source.sample_rate());
        self.sources.push(source);
    }

    pub fn add_sources(&mut self, sources: impl IntoIterator<Item = Source>) {
        for source in sources {
            self.add_source(source);
        }
    }

    pub fn add_receiver(&mut self, receiver: Receiver) {
        self.receivers.push(receiver);
    }

    pub fn add_receivers(&mut self, receivers: impl IntoIterator<Item = Receiver>) {
        self.receivers.extend(receivers);
    }

    /// Removes sources and receivers, keeping the triangle geometry.
    ///
    /// The sample rate established by previously added sources is left in
    /// place, matching the incremental-maximum contract.
    pub fn clear(&mut self) {
        self.sources.clear();
        self.receivers.clear();
    }

    /// Maximum sample rate over all sources added so far, in Hz.
    ///
    /// Zero until the first source is added.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    pub fn receivers(&self) -> &[Receiver] {
        &self.receivers
    }

    /// Traces the scene, producing one channel per receiver.
    ///
    /// See [`TraceConfig`] for the resolution, duration, and memory knobs.
    /// The scene must not be mutated while a trace is running (the borrow
    /// checker enforces this).
    pub fn trace(&self, config: &TraceConfig) -> Result<TraceOutput> {
        trace::run(self, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec3;

    fn source(rate: u32, name: &str) -> Source {
        Source::from_samples(vec![1.0], rate, Vec3::ZERO, name).unwrap()
    }

    #[test]
    fn sample_rate_tracks_maximum() {
        let mut scene = Scene::new();
        assert_eq!(scene.sample_rate(), 0);
        scene.add_source(source(8000, "low"));
        assert_eq!(scene.sample_rate(), 8000);
        scene.add_source(source(16000, "high"));
        assert_eq!(scene.sample_rate(), 16000);
        scene.add_source(source(8000, "low2"));
        assert_eq!(scene.sample_rate(), 16000);
    }

    #[test]
    fn clear_keeps_triangles_and_rate() {
        let mut scene = Scene::new();
        scene.add_surface(Triangle::new(Vec3::ZERO, Vec3::X, Vec3::Y));
        scene.add_source(source(8000, "s"));
        scene.add_receiver(Receiver::new(Vec3::ZERO, "r"));
        scene.clear();
        assert_eq!(scene.triangles().len(), 1);
        assert!(scene.sources().is_empty());
        assert!(scene.receivers().is_empty());
        assert_eq!(scene.sample_rate(), 8000);
    }
}
