//! # Sonitrace
//!
//! Room-acoustic signal synthesis by geometric ray tracing.
//!
//! Given a triangulated scene, point sound sources carrying monaural
//! waveforms, and point receivers, sonitrace produces a per-receiver
//! time-domain signal containing the direct path and specular
//! reflections, with distance-dependent atmospheric attenuation,
//! reflection loss, and propagation delay. The multi-channel result can
//! be written out as a float PCM WAV file.
//!
//! ## Quick Start
//!
//! ```no_run
//! use sonitrace::{Receiver, RectRoom, Source, TraceConfig, Vec3};
//!
//! // A 3 x 4 x 3 meter closed room.
//! let mut scene = RectRoom::new(3.0, 4.0, 3.0).scene();
//!
//! // A click in the middle of the room, heard from a meter away.
//! let click = Source::from_samples(vec![1.0], 16000, Vec3::new(1.5, 2.0, 1.5), "click")?;
//! scene.add_source(click);
//! scene.add_receiver(Receiver::new(Vec3::new(1.0, 1.0, 1.5), "mic"));
//!
//! let config = TraceConfig::new()
//!     .rays_azimuth(256)
//!     .rays_polar(128)
//!     .duration(1.0);
//! let output = scene.trace(&config)?;
//! output.save("room.wav")?;
//! # Ok::<(), sonitrace::SonitraceError>(())
//! ```
//!
//! ## Key Components
//!
//! - **[`Scene`]**: owns triangles, sources, and receivers; entry point
//!   for tracing
//! - **[`Source`] / [`Receiver`]**: point emitters and sensors
//! - **[`TraceConfig`]**: direction-grid resolution, duration, and the
//!   per-chunk memory bound
//! - **[`TraceOutput`]**: the traced channels plus WAV saving
//! - **[`RectRoom`]**: closed rectangular-room scene builder
//! - **[`audio_data`]**: file decoding and explicit resampling for
//!   building sources from recordings
//!
//! ## How a trace runs
//!
//! For every receiver, a spherical grid of ray directions is traced in
//! parallel. Each ray walks its reflection chain, accumulating delayed
//! and attenuated copies of every source signal it passes into a private
//! buffer; the driver sums the buffers into one channel per receiver and
//! peak-normalizes it. Rays are dispatched in chunks so the combined
//! working set of private buffers stays under a configurable byte bound.

pub mod audio_data;
pub mod error;
pub mod geometry;
pub mod math;
pub mod output;
pub mod receiver;
pub mod room;
pub mod scene;
pub mod source;
pub mod trace;

pub use error::{Result, SonitraceError};
pub use geometry::{Ray, Sphere, SurfaceHit, SurfaceMode, Triangle};
pub use math::Vec3;
pub use receiver::Receiver;
pub use room::RectRoom;
pub use scene::Scene;
pub use source::{SOURCE_RADIUS, Source};
pub use trace::{ATM_ATTEN, MAX_PATH_LEN, PROP_SPEED, REFL_COEFF, TraceConfig, TraceOutput};
