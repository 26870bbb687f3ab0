//! Pause/resume/restart over single-use output streams.
//!
//! The output device can only start a stream at an offset and stop it; a
//! stopped stream is gone for good. `PlaybackTracker` keeps the position
//! between streams so each `play` opens a fresh session where the last one
//! left off.

mod controls;
mod events;
mod settings;

pub use settings::TrackerSettings;

use std::sync::Arc;

use crate::asset::AudioAsset;
use crate::playback::clock::PlaybackClock;
use crate::playback::device::{OutputDevice, SessionId};

/// Observable transport state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerState {
    /// No asset loaded.
    Idle,
    /// Asset loaded, nothing playing.
    Ready,
    /// A session is streaming.
    Playing,
}

/// Transport controller for one displayed explanation at a time.
///
/// Session ids come from a generation counter; completion notifications for
/// anything but the current session are dropped.
pub struct PlaybackTracker<D: OutputDevice> {
    device: D,
    asset: Option<Arc<AudioAsset>>,
    clock: PlaybackClock,
    session: Option<SessionId>,
    next_session_id: SessionId,
    pending_restart_at: Option<f64>,
    settings: TrackerSettings,
    closed: bool,
}

impl<D: OutputDevice> PlaybackTracker<D> {
    /// Take ownership of `device` until the tracker is closed or dropped.
    pub fn new(device: D) -> Self {
        Self::with_settings(device, TrackerSettings::default())
    }

    pub fn with_settings(device: D, settings: TrackerSettings) -> Self {
        Self {
            device,
            asset: None,
            clock: PlaybackClock::new(),
            session: None,
            next_session_id: 1,
            pending_restart_at: None,
            settings,
            closed: false,
        }
    }

    pub fn state(&self) -> TrackerState {
        if self.session.is_some() {
            TrackerState::Playing
        } else if self.asset.is_some() {
            TrackerState::Ready
        } else {
            TrackerState::Idle
        }
    }

    pub fn is_playing(&self) -> bool {
        self.session.is_some()
    }

    /// True while a restart is waiting for the device to release its stream.
    pub fn is_restart_pending(&self) -> bool {
        self.pending_restart_at.is_some()
    }

    /// Current position in seconds.
    pub fn position(&self) -> f64 {
        match (&self.asset, self.session) {
            (Some(asset), Some(_)) => self
                .clock
                .elapsed(self.device.now())
                .clamp(0.0, asset.duration()),
            _ => self.clock.paused_offset(),
        }
    }

    /// Offset the next `play` resumes from, before wraparound.
    pub fn paused_offset(&self) -> f64 {
        self.clock.paused_offset()
    }

    /// Duration of the loaded asset, or `0.0` when idle.
    pub fn duration(&self) -> f64 {
        self.asset.as_ref().map(|asset| asset.duration()).unwrap_or(0.0)
    }

    pub fn asset(&self) -> Option<&Arc<AudioAsset>> {
        self.asset.as_ref()
    }

    /// Id of the active session, if any.
    pub fn session(&self) -> Option<SessionId> {
        self.session
    }

    pub fn settings(&self) -> &TrackerSettings {
        &self.settings
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl<D: OutputDevice> Drop for PlaybackTracker<D> {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::playback::device::VirtualDevice;

    fn asset(seconds: usize) -> AudioAsset {
        AudioAsset::from_interleaved(vec![0.0; seconds * 100], 100, 1).unwrap()
    }

    fn tracker() -> (PlaybackTracker<VirtualDevice>, VirtualDevice) {
        let device = VirtualDevice::new();
        let tracker = PlaybackTracker::new(device.clone());
        (tracker, device)
    }

    #[test]
    fn starts_idle_and_ignores_controls() {
        let (mut tracker, device) = tracker();
        assert_eq!(tracker.state(), TrackerState::Idle);
        tracker.play();
        tracker.pause();
        tracker.restart();
        tracker.tick();
        assert_eq!(tracker.state(), TrackerState::Idle);
        assert!(device.starts().is_empty());
        assert!(!tracker.is_restart_pending());
    }

    #[test]
    fn play_wraps_drifted_offset() {
        let (mut tracker, device) = tracker();
        tracker.load_asset(asset(10));
        tracker.clock.set_paused_offset(23.0);
        tracker.play();
        let start = device.last_start().unwrap();
        assert!((start.offset - 3.0).abs() < 1e-9);
        assert!((tracker.position() - 3.0).abs() < 1e-9);

        tracker.pause();
        tracker.clock.set_paused_offset(10.0);
        tracker.play();
        assert_eq!(device.last_start().unwrap().offset, 0.0);
    }

    #[test]
    fn play_while_playing_keeps_session() {
        let (mut tracker, device) = tracker();
        tracker.load_asset(asset(10));
        tracker.play();
        let session = tracker.session();
        device.advance(1.0);
        tracker.play();
        assert_eq!(tracker.session(), session);
        assert_eq!(device.starts().len(), 1);
    }

    #[test]
    fn play_resumes_suspended_device() {
        let (mut tracker, device) = tracker();
        tracker.load_asset(asset(10));
        device.suspend();
        tracker.play();
        assert_eq!(device.resume_count(), 1);
        assert!(tracker.is_playing());
    }

    #[test]
    fn failed_start_leaves_tracker_ready() {
        let (mut tracker, device) = tracker();
        tracker.load_asset(asset(10));
        device.fail_next_start();
        tracker.play();
        assert_eq!(tracker.state(), TrackerState::Ready);
        tracker.play();
        assert!(tracker.is_playing());
    }

    #[test]
    fn early_end_of_active_session_keeps_position() {
        let (mut tracker, device) = tracker();
        tracker.load_asset(asset(10));
        tracker.play();
        device.advance(3.0);
        let session = tracker.session().unwrap();
        device.fire_ended(session);
        tracker.tick();
        assert_eq!(tracker.state(), TrackerState::Ready);
        assert!((tracker.paused_offset() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn zero_restart_delay_plays_immediately() {
        let device = VirtualDevice::new();
        let settings = TrackerSettings::default().restart_delay(Duration::ZERO);
        let mut tracker = PlaybackTracker::with_settings(device.clone(), settings);
        tracker.load_asset(asset(10));
        tracker.play();
        device.advance(2.0);
        tracker.restart();
        assert!(tracker.is_playing());
        assert_eq!(device.last_start().unwrap().offset, 0.0);
    }

    #[test]
    fn pause_cancels_pending_restart() {
        let (mut tracker, device) = tracker();
        tracker.load_asset(asset(10));
        tracker.restart();
        assert!(tracker.is_restart_pending());
        tracker.pause();
        device.advance(1.0);
        tracker.tick();
        assert!(!tracker.is_playing());
        assert!(device.starts().is_empty());
    }

    #[test]
    fn drop_releases_device() {
        let (mut tracker, device) = tracker();
        tracker.load_asset(asset(10));
        tracker.play();
        drop(tracker);
        assert!(device.is_closed());
        assert!(device.active_sessions().is_empty());
    }
}
