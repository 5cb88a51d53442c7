use crate::audio_data::{AudioData, LoadOptions, MonoConversion};
use crate::error::{Result, SonitraceError};
use std::fs::File;
use std::path::Path;
use symphonia::{
    core::{
        audio::SampleBuffer, codecs::DecoderOptions, errors::Error, formats::FormatOptions,
        io::MediaSourceStream, meta::MetadataOptions, probe::Hint,
    },
    default::{get_codecs, get_probe},
};

/// Decodes an audio file into interleaved f32 samples.
pub(crate) fn load_audio_file(path: &Path, options: &LoadOptions) -> Result<AudioData> {
    let file = File::open(path)?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| {
            SonitraceError::AudioLoading(format!("failed to probe audio format: {:?}", e))
        })?;

    let mut format = probed.format;

    let track = format
        .default_track()
        .ok_or_else(|| SonitraceError::AudioLoading("no default audio track".to_string()))?;

    let sample_rate = track
        .codec_params
        .sample_rate
        .ok_or_else(|| SonitraceError::AudioLoading("sample rate not found".to_string()))?;

    let channels = track
        .codec_params
        .channels
        .ok_or_else(|| SonitraceError::AudioLoading("channel count not found".to_string()))?
        .count() as u16;

    if let MonoConversion::Channel(ch) = options.mono {
        if ch >= channels as usize {
            return Err(SonitraceError::AudioFormat(format!(
                "channel {} out of range (file has {})",
                ch, channels
            )));
        }
    }

    let mut decoder = get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| SonitraceError::AudioLoading(format!("failed to create decoder: {:?}", e)))?;

    let max_frames = options
        .max_duration
        .map(|d| (d.as_secs_f64() * sample_rate as f64) as usize)
        .unwrap_or(usize::MAX);

    let mut samples: Vec<f32> = Vec::new();
    let mut frames_decoded = 0usize;

    while frames_decoded < max_frames {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(Error::IoError(_)) => break, // end of file
            Err(e) => {
                return Err(SonitraceError::AudioLoading(format!(
                    "error reading packet: {:?}",
                    e
                )));
            }
        };

        let decoded = match decoder.decode(&packet) {
            Ok(decoded) => decoded,
            Err(Error::IoError(_)) => break,
            Err(Error::DecodeError(_)) => continue, // recoverable corruption
            Err(e) => {
                return Err(SonitraceError::AudioLoading(format!(
                    "error decoding packet: {:?}",
                    e
                )));
            }
        };

        let spec = *decoded.spec();
        let capacity = decoded.capacity();
        let mut buffer = SampleBuffer::<f32>::new(capacity as u64, spec);
        buffer.copy_interleaved_ref(decoded);

        match options.mono {
            MonoConversion::Channel(ch) => {
                samples.extend(
                    buffer
                        .samples()
                        .chunks(channels as usize)
                        .map(|frame| frame[ch]),
                );
            }
            MonoConversion::Downmix => {
                samples.extend(buffer.samples().chunks(channels as usize).map(|frame| {
                    frame.iter().sum::<f32>() / channels as f32
                }));
            }
            MonoConversion::None => samples.extend_from_slice(buffer.samples()),
        }

        frames_decoded += capacity / channels as usize;
    }

    let out_channels = match options.mono {
        MonoConversion::None => channels,
        _ => 1,
    };

    let mut audio = AudioData::new(samples, sample_rate, out_channels)?;

    if let Some(target_rate) = options.target_sample_rate {
        if target_rate != sample_rate {
            audio = audio.resample(target_rate)?;
        }
    }

    Ok(audio)
}
