//! Shared constants for speech decoding and playback defaults.

/// Sample rate of the speech payloads returned by the service (Hz).
pub const SPEECH_SAMPLE_RATE: u32 = 24_000;

/// Channel count of the speech payloads returned by the service.
pub const SPEECH_CHANNELS: u16 = 1;

/// Delay between releasing a stream and claiming a new one on restart.
///
/// Some backends silently drop a stream that is opened while the previous
/// one is still being torn down.
pub const RESTART_DELAY_MS: u64 = 100;

/// Tolerance (seconds) used to recognise a session that played to the end.
pub const COMPLETION_EPSILON_SECONDS: f64 = 0.1;

/// Attempts made when opening the default output stream.
pub const OUTPUT_STREAM_OPEN_RETRIES: usize = 20;

/// Pause between output stream open attempts (ms).
pub const OUTPUT_STREAM_OPEN_RETRY_MS: u64 = 100;
