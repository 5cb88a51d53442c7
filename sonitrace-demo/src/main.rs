//! Command-line demos for the sonitrace tracer.
//!
//! Usage:
//!
//! ```text
//! sonitrace-demo [ears|array] [OUTPUT.wav] [CLICK_FILE]
//! ```
//!
//! `ears` (the default) traces the two-ear listening room and writes a
//! stereo file; `array` places an 8-microphone line array and a random
//! talker inside a small rectangular room. When `CLICK_FILE` is given its
//! first channel is used as the source signal, otherwise a unit impulse
//! stands in. The `MEMCHUNK` environment variable overrides the per-chunk
//! working-set bound in bytes.

mod scenes;

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use sonitrace::audio_data::{AudioData, LoadOptions, MonoConversion};
use sonitrace::{RectRoom, Source, TraceConfig, Vec3};
use std::time::Instant;

const DEFAULT_MEM_CHUNK: u64 = 5_000_000_000;
const CLICK_SAMPLE_RATE: u32 = 16000;

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let mode = args.get(1).map(String::as_str).unwrap_or("ears");
    let output_path = args.get(2).map(String::as_str).unwrap_or("output.wav");
    let click_path = args.get(3).map(String::as_str);

    let mem_chunk = match std::env::var("MEMCHUNK") {
        Ok(value) => value
            .parse::<u64>()
            .with_context(|| format!("invalid MEMCHUNK value '{}'", value))?,
        Err(_) => DEFAULT_MEM_CHUNK,
    };

    let (click, sample_rate) = load_click(click_path)?;

    match mode {
        "ears" => run_ears(&click, sample_rate, output_path, mem_chunk),
        "array" => run_array(&click, sample_rate, output_path, mem_chunk),
        other => anyhow::bail!("unknown mode '{}' (expected 'ears' or 'array')", other),
    }
}

/// The source signal: the first channel of the given file, or a unit
/// impulse when no file is provided.
fn load_click(path: Option<&str>) -> Result<(Vec<f32>, u32)> {
    match path {
        Some(path) => {
            log::info!("loading click from '{}'", path);
            let options = LoadOptions::new().mono(MonoConversion::Channel(0));
            let audio = AudioData::from_path_with_options(path, &options)
                .with_context(|| format!("failed to load '{}'", path))?;
            let sample_rate = audio.sample_rate();
            Ok((audio.samples().to_vec(), sample_rate))
        }
        None => Ok((vec![1.0], CLICK_SAMPLE_RATE)),
    }
}

fn run_ears(click: &[f32], sample_rate: u32, output_path: &str, mem_chunk: u64) -> Result<()> {
    let scene = scenes::two_ear_room(click, sample_rate)?;
    log::info!(
        "two-ear room: {} sources, {} receivers, {} triangles",
        scene.sources().len(),
        scene.receivers().len(),
        scene.triangles().len()
    );

    let config = TraceConfig::new()
        .rays_azimuth(152)
        .rays_polar(152)
        .duration(5.0)
        .mem_chunk(mem_chunk);

    trace_and_save(&scene, &config, output_path)
}

fn run_array(click: &[f32], sample_rate: u32, output_path: &str, mem_chunk: u64) -> Result<()> {
    let room = RectRoom::new(3.0, 4.0, 3.0);
    let mut scene = room.scene();

    let mut rng = StdRng::from_entropy();
    let spacing = 0.0186;
    let mic_count = 8;
    let positions = room.random_positions(1, 0.25, &mut rng);
    let talker = positions[0];
    let mic_origin = room.random_positions(1, mic_count as f32 * spacing * 0.5, &mut rng)[0];
    let steering = talker - mic_origin;

    scene.add_source(Source::from_samples(
        click.to_vec(),
        sample_rate,
        talker,
        "talker",
    )?);
    scene.add_receivers(scenes::line_array(steering, mic_origin, mic_count, spacing));
    log::info!(
        "array room: talker at {:?}, array centered at {:?}",
        talker,
        mic_origin
    );

    let config = TraceConfig::new()
        .rays_azimuth(256)
        .rays_polar(128)
        .duration(2.0)
        .mem_chunk(mem_chunk);

    trace_and_save(&scene, &config, output_path)
}

fn trace_and_save(
    scene: &sonitrace::Scene,
    config: &TraceConfig,
    output_path: &str,
) -> Result<()> {
    let started = Instant::now();
    let output = scene.trace(config)?;
    log::info!(
        "traced {} channel(s) x {} samples in {:.1?}",
        output.channels().len(),
        output.channels().first().map_or(0, Vec::len),
        started.elapsed()
    );

    output.save(output_path)?;
    log::info!("wrote '{}'", output_path);
    Ok(())
}
