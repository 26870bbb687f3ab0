use std::fmt::{Display, Formatter};

use crate::pcm::PcmError;

/// Error type for generation service calls.
#[derive(Debug)]
pub enum ServiceError {
    MissingApiKey,
    Http(String),
    Api { status: u16, message: String },
    EmptyResponse(&'static str),
    Parse(String),
    Audio(PcmError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingApiKey => write!(f, "no api key configured (set GEMINI_API_KEY)"),
            Self::Http(err) => write!(f, "http error: {}", err),
            Self::Api { status, message } => write!(f, "service error {}: {}", status, message),
            Self::EmptyResponse(what) => write!(f, "service returned no {}", what),
            Self::Parse(err) => write!(f, "invalid service response: {}", err),
            Self::Audio(err) => write!(f, "audio decode error: {}", err),
        }
    }
}

impl std::error::Error for ServiceError {}

impl From<reqwest::Error> for ServiceError {
    fn from(value: reqwest::Error) -> Self {
        Self::Http(value.to_string())
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value.to_string())
    }
}

impl From<PcmError> for ServiceError {
    fn from(value: PcmError) -> Self {
        Self::Audio(value)
    }
}
