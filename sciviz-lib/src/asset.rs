//! Immutable decoded audio buffers.

use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Error returned when an asset cannot be built from raw parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetError {
    ZeroSampleRate,
    ZeroChannels,
    Empty,
}

impl Display for AssetError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroSampleRate => write!(f, "sample rate must be non-zero"),
            Self::ZeroChannels => write!(f, "channel count must be non-zero"),
            Self::Empty => write!(f, "audio asset contains no frames"),
        }
    }
}

impl std::error::Error for AssetError {}

/// Decoded, immutable audio with a known duration.
///
/// Samples are interleaved `f32` in `[-1.0, 1.0]`. Cloning an asset is cheap;
/// clones share the same sample storage.
#[derive(Debug, Clone)]
pub struct AudioAsset {
    samples: Arc<[f32]>,
    sample_rate: u32,
    channels: u16,
}

impl AudioAsset {
    /// Build an asset from interleaved samples.
    ///
    /// A trailing partial frame is dropped.
    pub fn from_interleaved(
        mut samples: Vec<f32>,
        sample_rate: u32,
        channels: u16,
    ) -> Result<Self, AssetError> {
        if sample_rate == 0 {
            return Err(AssetError::ZeroSampleRate);
        }
        if channels == 0 {
            return Err(AssetError::ZeroChannels);
        }
        let whole = samples.len() - samples.len() % channels as usize;
        samples.truncate(whole);
        if samples.is_empty() {
            return Err(AssetError::Empty);
        }

        Ok(Self {
            samples: samples.into(),
            sample_rate,
            channels,
        })
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// Number of frames (samples per channel).
    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels as usize
    }

    /// Total duration in seconds.
    pub fn duration(&self) -> f64 {
        self.frames() as f64 / self.sample_rate as f64
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Interleaved samples starting at `offset` seconds.
    ///
    /// Offsets are clamped into the asset; an offset at or past the end
    /// yields an empty slice.
    pub fn samples_from(&self, offset: f64) -> &[f32] {
        let frame = if offset.is_finite() && offset > 0.0 {
            ((offset * self.sample_rate as f64).floor() as usize).min(self.frames())
        } else {
            0
        };
        &self.samples[frame * self.channels as usize..]
    }
}
