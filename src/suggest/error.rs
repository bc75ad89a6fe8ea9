//! Failure taxonomy for the suggestion pipeline.
//!
//! Neither error escapes `SuggestionEngine::generate`; both collapse into the
//! sentinel suggestion there.

use thiserror::Error;

/// The generation service could not produce reply text.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("no API key configured (set GEMINI_API_KEY)")]
    MissingApiKey,

    #[error("request timed out")]
    Timeout,

    #[error("could not connect to the generation service: {0}")]
    Connect(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("service returned an undecodable envelope: {0}")]
    InvalidEnvelope(String),

    #[error("service returned an empty reply")]
    EmptyReply,
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            UpstreamError::Timeout
        } else if err.is_connect() {
            UpstreamError::Connect(err.to_string())
        } else {
            UpstreamError::Transport(err.to_string())
        }
    }
}

/// The reply text did not contain a usable JSON array.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedResponse {
    #[error("no JSON array found in response")]
    NoArray,

    #[error("JSON array could not be parsed: {0}")]
    InvalidJson(String),

    #[error("parsed JSON is not an array")]
    NotAnArray,
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error(transparent)]
    Malformed(#[from] MalformedResponse),
}
