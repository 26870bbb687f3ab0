//! Decoding of the fixed-format speech payload.
//!
//! The generation service returns narrated audio as base64 text wrapping
//! signed 16-bit little-endian PCM. Nothing else is decoded here.

mod error;

pub use error::PcmError;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::asset::AudioAsset;
use crate::constants::{SPEECH_CHANNELS, SPEECH_SAMPLE_RATE};

/// Decode a base64 speech payload in the service's contractual format
/// (24 kHz mono).
pub fn decode_speech(payload: &str) -> Result<AudioAsset, PcmError> {
    decode_base64_pcm(payload, SPEECH_SAMPLE_RATE, SPEECH_CHANNELS)
}

/// Decode base64 text into an asset of the given format.
///
/// Whitespace inside the payload (line-wrapped base64) is ignored.
pub fn decode_base64_pcm(
    payload: &str,
    sample_rate: u32,
    channels: u16,
) -> Result<AudioAsset, PcmError> {
    let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = STANDARD.decode(compact.as_bytes())?;
    decode_pcm_s16le(&bytes, sample_rate, channels)
}

/// Convert raw signed 16-bit little-endian bytes into an asset.
pub fn decode_pcm_s16le(
    bytes: &[u8],
    sample_rate: u32,
    channels: u16,
) -> Result<AudioAsset, PcmError> {
    if bytes.len() % 2 != 0 {
        return Err(PcmError::Misaligned(bytes.len()));
    }

    let samples = bytes
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]) as f32 / 32768.0)
        .collect::<Vec<f32>>();

    Ok(AudioAsset::from_interleaved(samples, sample_rate, channels)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::AssetError;

    fn encode(samples: &[i16]) -> String {
        let bytes: Vec<u8> = samples.iter().flat_map(|s| s.to_le_bytes()).collect();
        STANDARD.encode(bytes)
    }

    #[test]
    fn scales_full_range_samples() {
        let asset = decode_base64_pcm(&encode(&[0, i16::MIN, 16384, -16384]), 24_000, 1).unwrap();
        assert_eq!(asset.samples(), &[0.0, -1.0, 0.5, -0.5]);
    }

    #[test]
    fn speech_payload_uses_contract_format() {
        let asset = decode_speech(&encode(&vec![0; 12_000])).unwrap();
        assert_eq!(asset.sample_rate(), 24_000);
        assert_eq!(asset.channels(), 1);
        assert!((asset.duration() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn tolerates_wrapped_base64() {
        let encoded = encode(&[1, 2, 3, 4, 5, 6, 7, 8]);
        let (head, tail) = encoded.split_at(8);
        let wrapped = format!("{}\n  {}\r\n", head, tail);
        let asset = decode_base64_pcm(&wrapped, 8_000, 1).unwrap();
        assert_eq!(asset.frames(), 8);
    }

    #[test]
    fn rejects_odd_byte_counts() {
        let payload = STANDARD.encode([0u8, 1, 2]);
        assert!(matches!(
            decode_base64_pcm(&payload, 24_000, 1),
            Err(PcmError::Misaligned(3))
        ));
    }

    #[test]
    fn rejects_empty_and_garbage_payloads() {
        assert!(matches!(
            decode_speech(""),
            Err(PcmError::Asset(AssetError::Empty))
        ));
        assert!(matches!(decode_speech("not*base64"), Err(PcmError::Base64(_))));
    }
}
