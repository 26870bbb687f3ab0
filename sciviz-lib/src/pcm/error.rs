use std::fmt::{Display, Formatter};

use crate::asset::AssetError;

/// Error type for decoding speech payloads into audio assets.
#[derive(Debug)]
pub enum PcmError {
    Base64(base64::DecodeError),
    Misaligned(usize),
    Asset(AssetError),
}

impl Display for PcmError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Base64(err) => write!(f, "invalid base64 payload: {}", err),
            Self::Misaligned(len) => {
                write!(f, "pcm payload of {} bytes is not 16-bit aligned", len)
            }
            Self::Asset(err) => write!(f, "invalid audio: {}", err),
        }
    }
}

impl std::error::Error for PcmError {}

impl From<base64::DecodeError> for PcmError {
    fn from(value: base64::DecodeError) -> Self {
        Self::Base64(value)
    }
}

impl From<AssetError> for PcmError {
    fn from(value: AssetError) -> Self {
        Self::Asset(value)
    }
}
