//! Output device abstraction.
//!
//! An output device hands out single-use streams: a stream starts at some
//! offset into an asset, plays until it is stopped or drains, and can never
//! be restarted. Every stream ending, whether stopped or drained, produces
//! exactly one completion notification carrying the stream's session id.

mod rodio_device;
mod virtual_device;

pub use rodio_device::RodioDevice;
pub use virtual_device::{StartRecord, VirtualDevice};

use std::fmt::{Display, Formatter};
use std::sync::Arc;

use crate::asset::AudioAsset;

/// Unique identity of one playback session. Never reused.
pub type SessionId = u64;

/// Errors raised by output devices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceError {
    Unavailable(String),
    Suspended,
    InactiveStream(SessionId),
    StartFailed(String),
}

impl Display for DeviceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(err) => write!(f, "output device unavailable: {}", err),
            Self::Suspended => write!(f, "output device is suspended"),
            Self::InactiveStream(id) => write!(f, "stream for session {} is not active", id),
            Self::StartFailed(err) => write!(f, "failed to start stream: {}", err),
        }
    }
}

impl std::error::Error for DeviceError {}

/// Capability set required by the playback tracker.
pub trait OutputDevice {
    /// Monotonic device clock in seconds.
    fn now(&self) -> f64;

    /// True when the device must be resumed before streams can start.
    fn is_suspended(&self) -> bool;

    /// Wake a suspended device.
    fn resume(&mut self) -> Result<(), DeviceError>;

    /// Start a stream for `session` playing `asset` from `offset` seconds.
    fn start(
        &mut self,
        session: SessionId,
        asset: &Arc<AudioAsset>,
        offset: f64,
    ) -> Result<(), DeviceError>;

    /// Stop the stream for `session`.
    ///
    /// A completion notification for the session is still delivered.
    fn stop(&mut self, session: SessionId) -> Result<(), DeviceError>;

    /// Drain pending completion notifications, oldest first.
    fn take_ended(&mut self) -> Vec<SessionId>;

    /// Stop everything and release the underlying resource.
    fn close(&mut self);
}
