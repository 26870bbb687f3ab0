//! Playback of narrated explanations.
//!
//! - [`tracker`] owns the transport state machine.
//! - [`clock`] holds the position arithmetic shared by the tracker.
//! - [`device`] defines the output primitive and its implementations.

pub mod clock;
pub mod device;
pub mod tracker;

pub use clock::PlaybackClock;
pub use device::{DeviceError, OutputDevice, RodioDevice, SessionId, VirtualDevice};
pub use tracker::{PlaybackTracker, TrackerSettings, TrackerState};
