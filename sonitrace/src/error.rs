//! Error types for sonitrace

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SonitraceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Audio loading error: {0}")]
    AudioLoading(String),

    #[error("Audio format error: {0}")]
    AudioFormat(String),

    #[error("Empty signal: {0}")]
    EmptySignal(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Output error: {0}")]
    Output(String),
}

pub type Result<T> = std::result::Result<T, SonitraceError>;
