use crate::error::{Result, SonitraceError};
use rubato::{FftFixedIn, Resampler};

/// Batch FFT resampler for decoded audio.
///
/// Resampling is always an explicit step; the tracer never changes a
/// source's rate behind the caller's back.
pub struct AudioResampler {
    source_sample_rate: u32,
    target_sample_rate: u32,
    channels: u16,
    chunk_size: usize,
}

impl AudioResampler {
    pub fn new(
        source_sample_rate: u32,
        target_sample_rate: u32,
        channels: u16,
        chunk_size: Option<usize>,
    ) -> Result<Self> {
        if source_sample_rate == 0 || target_sample_rate == 0 {
            return Err(SonitraceError::AudioFormat(
                "sample rates must be greater than 0".to_string(),
            ));
        }
        if channels == 0 {
            return Err(SonitraceError::AudioFormat(
                "channel count must be greater than 0".to_string(),
            ));
        }
        Ok(Self {
            source_sample_rate,
            target_sample_rate,
            channels,
            chunk_size: chunk_size.unwrap_or(1024),
        })
    }

    /// Resamples one planar channel.
    ///
    /// The input is processed in fixed-size chunks with the final chunk
    /// zero-padded, then the output is trimmed to the expected length so
    /// the padding does not leak trailing silence.
    pub fn resample_channel(&self, channel_samples: &[f32]) -> Result<Vec<f32>> {
        if self.source_sample_rate == self.target_sample_rate {
            return Ok(channel_samples.to_vec());
        }

        let mut resampler = FftFixedIn::<f32>::new(
            self.source_sample_rate as usize,
            self.target_sample_rate as usize,
            self.chunk_size,
            2, // sub chunks
            1, // one channel at a time
        )
        .map_err(|e| SonitraceError::AudioLoading(format!("failed to create resampler: {}", e)))?;

        let mut output = Vec::new();
        for chunk in channel_samples.chunks(self.chunk_size) {
            let mut input = vec![0.0f32; self.chunk_size];
            input[..chunk.len()].copy_from_slice(chunk);

            let waves_out = resampler
                .process(&[input], None)
                .map_err(|e| SonitraceError::AudioLoading(format!("resampling error: {}", e)))?;

            if let Some(resampled) = waves_out.into_iter().next() {
                output.extend_from_slice(&resampled);
            }
        }

        let expected =
            (channel_samples.len() as f64 * self.resample_ratio()).round() as usize;
        output.truncate(expected);
        Ok(output)
    }

    /// Resamples interleaved samples channel by channel, reinterleaving
    /// the result.
    pub fn resample_interleaved(&self, interleaved: &[f32]) -> Result<Vec<f32>> {
        if self.source_sample_rate == self.target_sample_rate {
            return Ok(interleaved.to_vec());
        }

        let channels = self.channels as usize;
        let mut resampled_channels = Vec::with_capacity(channels);
        for ch in 0..channels {
            let planar: Vec<f32> = interleaved
                .chunks(channels)
                .map(|frame| frame.get(ch).copied().unwrap_or(0.0))
                .collect();
            resampled_channels.push(self.resample_channel(&planar)?);
        }

        let frames = resampled_channels
            .iter()
            .map(|c| c.len())
            .min()
            .unwrap_or(0);
        let mut interleaved_out = Vec::with_capacity(frames * channels);
        for frame in 0..frames {
            for channel in &resampled_channels {
                interleaved_out.push(channel[frame]);
            }
        }
        Ok(interleaved_out)
    }

    pub fn source_sample_rate(&self) -> u32 {
        self.source_sample_rate
    }

    pub fn target_sample_rate(&self) -> u32 {
        self.target_sample_rate
    }

    pub fn resample_ratio(&self) -> f64 {
        self.target_sample_rate as f64 / self.source_sample_rate as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_rates_and_channels() {
        assert!(AudioResampler::new(0, 16000, 1, None).is_err());
        assert!(AudioResampler::new(16000, 0, 1, None).is_err());
        assert!(AudioResampler::new(16000, 8000, 0, None).is_err());
    }

    #[test]
    fn same_rate_is_identity() {
        let resampler = AudioResampler::new(16000, 16000, 1, None).unwrap();
        let input = vec![0.1f32, 0.2, 0.3];
        assert_eq!(resampler.resample_channel(&input).unwrap(), input);
    }

    #[test]
    fn halving_the_rate_halves_the_length() {
        let resampler = AudioResampler::new(16000, 8000, 1, None).unwrap();
        let input = vec![0.5f32; 4096];
        let output = resampler.resample_channel(&input).unwrap();
        assert_eq!(output.len(), 2048);
    }

    #[test]
    fn interleaved_resampling_keeps_channel_count() {
        let resampler = AudioResampler::new(16000, 8000, 2, None).unwrap();
        let input = vec![0.5f32; 8192];
        let output = resampler.resample_interleaved(&input).unwrap();
        assert_eq!(output.len() % 2, 0);
        assert_eq!(output.len(), 4096);
    }
}
