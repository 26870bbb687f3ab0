//! Transport operations for `PlaybackTracker`.
//!
//! Every operation is a no-op without a loaded asset. Device errors are
//! logged and never returned to the caller.

use std::sync::Arc;

use log::{debug, info, warn};

use crate::asset::AudioAsset;
use crate::playback::device::OutputDevice;

use super::PlaybackTracker;

impl<D: OutputDevice> PlaybackTracker<D> {
    /// Start a new session from the paused offset.
    pub fn play(&mut self) {
        if self.closed || self.session.is_some() {
            return;
        }
        let Some(asset) = self.asset.clone() else {
            return;
        };
        self.pending_restart_at = None;

        if self.device.is_suspended() {
            if let Err(err) = self.device.resume() {
                warn!("failed to resume output device: {}", err);
                return;
            }
        }

        let offset = self.clock.start_offset(asset.duration());
        let session = self.next_session_id;
        self.next_session_id += 1;

        if let Err(err) = self.device.start(session, &asset, offset) {
            warn!("failed to start playback session {}: {}", session, err);
            return;
        }

        self.clock.anchor(self.device.now(), offset);
        self.session = Some(session);
        info!("Playing session {} from {:.2}s", session, offset);
    }

    /// Stop the active session and remember where it was.
    ///
    /// Also cancels a restart that is still waiting on its delay.
    pub fn pause(&mut self) {
        self.pending_restart_at = None;
        if let Some(offset) = self.end_session() {
            info!("Paused at {:.2}s", offset);
        }
    }

    /// Pause when playing, play otherwise.
    pub fn toggle(&mut self) {
        if self.is_playing() {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Rewind to the start and play again once the restart delay elapses.
    ///
    /// The new session is opened by [`PlaybackTracker::tick`] after the
    /// delay, measured on the device clock. A zero delay plays immediately.
    pub fn restart(&mut self) {
        if self.closed || self.asset.is_none() {
            return;
        }
        self.end_session();
        self.clock.reset();

        let delay = self.settings.restart_delay.as_secs_f64();
        if delay <= 0.0 {
            self.play();
        } else {
            self.pending_restart_at = Some(self.device.now() + delay);
            debug!("Restart scheduled in {:.0}ms", delay * 1000.0);
        }
    }

    /// Adopt a freshly decoded asset. Playback does not start automatically.
    pub fn load_asset(&mut self, asset: AudioAsset) {
        self.replace_asset(Some(Arc::new(asset)));
    }

    /// Swap the current asset (or clear it with `None`).
    ///
    /// Any active session is stopped, a pending restart is dropped and the
    /// position returns to zero.
    pub fn replace_asset(&mut self, asset: Option<Arc<AudioAsset>>) {
        self.pending_restart_at = None;
        self.end_session();
        self.clock.reset();
        if let Some(asset) = asset.as_ref() {
            info!(
                "Loaded {:.2}s of audio ({} Hz, {} ch)",
                asset.duration(),
                asset.sample_rate(),
                asset.channels()
            );
        }
        self.asset = asset;
    }

    /// Stop playback and release the output device.
    ///
    /// Called automatically on drop. Further controls are no-ops.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.pending_restart_at = None;
        self.end_session();
        self.device.close();
        self.closed = true;
    }

    /// Stop and forget the active session, returning the recorded offset.
    ///
    /// A session whose stream already drained to the end, but whose
    /// completion has not been pumped by `tick` yet, rewinds to zero.
    pub(super) fn end_session(&mut self) -> Option<f64> {
        let session = self.session.take()?;
        let drained = match self.device.stop(session) {
            Ok(()) => self.clock.elapsed(self.device.now()) >= self.duration(),
            Err(err) => {
                debug!("ignoring stop for session {}: {}", session, err);
                true
            }
        };

        let now = self.device.now();
        if drained
            && self
                .clock
                .is_natural_end(now, self.duration(), self.settings.completion_epsilon)
        {
            self.clock.reset();
            info!("Session {} played to the end", session);
            return Some(0.0);
        }
        Some(self.clock.pause(now))
    }
}
