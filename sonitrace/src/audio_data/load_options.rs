use std::time::Duration;

/// How to reduce a multi-channel file to the mono signal a source carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonoConversion {
    /// Keep all channels as decoded.
    #[default]
    None,
    /// Average all channels frame by frame.
    Downmix,
    /// Keep a single channel (0-based).
    Channel(usize),
}

/// Options for decoding an audio file.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Resample to this rate after decoding (None keeps the file's rate).
    pub target_sample_rate: Option<u32>,
    /// Mono reduction applied during/after decoding.
    pub mono: MonoConversion,
    /// Stop decoding after this much audio (None loads the whole file).
    pub max_duration: Option<Duration>,
}

impl LoadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target_sample_rate(mut self, rate: u32) -> Self {
        self.target_sample_rate = Some(rate);
        self
    }

    pub fn mono(mut self, mono: MonoConversion) -> Self {
        self.mono = mono;
        self
    }

    pub fn max_duration(mut self, duration: Duration) -> Self {
        self.max_duration = Some(duration);
        self
    }
}
