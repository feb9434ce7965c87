/*!
 * Error types for the phrasecut application.
 *
 * Every error in this crate is fatal: nothing is retried and no partial
 * result is ever emitted. The enums below only exist so the binary can
 * print a precise diagnostic and so tests can tell the failure kinds apart.
 */

use thiserror::Error;

/// Coarse classification of a failed run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or invalid command line input
    Input,
    /// The generation endpoint could not be reached
    Transport,
    /// The generation endpoint answered with a non-200 status
    UpstreamStatus,
    /// A response body or the segmentation payload could not be decoded
    Decode,
}

/// Errors that can occur when talking to the generation endpoint
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Connection refused, DNS failure, timeout or a broken body stream
    #[error("Failed to reach generation endpoint: {0}")]
    Transport(String),

    /// The endpoint answered, but not with 200 OK
    #[error("Generation endpoint responded with status {status_code}: {message}")]
    UpstreamStatus {
        /// HTTP status code
        status_code: u16,
        /// Body returned alongside the status, truncated
        message: String,
    },

    /// The response envelope is not valid JSON
    #[error("Failed to parse generation response: {0}")]
    Decode(String),
}

impl ProviderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport(_) => ErrorKind::Transport,
            Self::UpstreamStatus { .. } => ErrorKind::UpstreamStatus,
            Self::Decode(_) => ErrorKind::Decode,
        }
    }
}

/// Errors that can occur while segmenting and translating a text
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Error from the generation endpoint
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// The segmentation answer is not a JSON array of strings
    #[error("Failed to parse segmentation response as a JSON array of strings: {0}")]
    SegmentDecode(String),

    /// The result list could not be rendered
    #[error("Failed to serialize results: {0}")]
    Output(String),
}

impl PipelineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Provider(e) => e.kind(),
            Self::SegmentDecode(_) | Self::Output(_) => ErrorKind::Decode,
        }
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Invalid input or configuration
    #[error("Input error: {0}")]
    Input(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from the segmentation/translation pipeline
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl AppError {
    /// Classify the error, `None` for errors outside the known kinds
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Input(_) => Some(ErrorKind::Input),
            Self::Provider(e) => Some(e.kind()),
            Self::Pipeline(e) => Some(e.kind()),
            Self::Unknown(_) => None,
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}
