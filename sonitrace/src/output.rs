//! PCM output writing.

use crate::error::{Result, SonitraceError};
use std::path::Path;

/// Writes `channels` as a 32-bit float PCM WAV file.
///
/// Samples are interleaved frame by frame; channel order in the file
/// matches the slice order. All channels must have the same length.
pub fn write_wav(path: impl AsRef<Path>, channels: &[Vec<f32>], sample_rate: u32) -> Result<()> {
    let path = path.as_ref();
    if channels.is_empty() {
        return Err(SonitraceError::Output(
            "no channels to write".to_string(),
        ));
    }
    let num_samples = channels[0].len();
    if channels.iter().any(|channel| channel.len() != num_samples) {
        return Err(SonitraceError::Output(
            "all channels must have the same length".to_string(),
        ));
    }

    let spec = hound::WavSpec {
        channels: channels.len() as u16,
        sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut writer = hound::WavWriter::create(path, spec)
        .map_err(|e| SonitraceError::Output(format!("failed to create '{}': {}", path.display(), e)))?;

    for frame in 0..num_samples {
        for channel in channels {
            writer
                .write_sample(channel[frame])
                .map_err(|e| SonitraceError::Output(format!("write failed: {}", e)))?;
        }
    }

    writer
        .finalize()
        .map_err(|e| SonitraceError::Output(format!("finalize failed: {}", e)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_and_ragged_input() {
        let path = std::env::temp_dir().join("sonitrace_invalid.wav");
        assert!(write_wav(&path, &[], 8000).is_err());
        assert!(write_wav(&path, &[vec![0.0; 4], vec![0.0; 5]], 8000).is_err());
    }

    #[test]
    fn round_trips_interleaved_float_samples() {
        let path = std::env::temp_dir().join("sonitrace_roundtrip.wav");
        let left = vec![0.0f32, 0.5, -0.5, 1.0];
        let right = vec![1.0f32, -1.0, 0.25, 0.0];
        write_wav(&path, &[left.clone(), right.clone()], 16000).unwrap();

        let mut reader = hound::WavReader::open(&path).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 2);
        assert_eq!(spec.sample_rate, 16000);
        assert_eq!(spec.sample_format, hound::SampleFormat::Float);

        let samples: Vec<f32> = reader.samples::<f32>().map(|s| s.unwrap()).collect();
        assert_eq!(samples, vec![0.0, 1.0, 0.5, -1.0, -0.5, 0.25, 1.0, 0.0]);
        std::fs::remove_file(&path).ok();
    }
}
