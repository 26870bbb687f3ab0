//! Completion handling and deferred work for `PlaybackTracker`.

use log::{debug, info, warn};

use crate::playback::device::{OutputDevice, SessionId};

use super::PlaybackTracker;

impl<D: OutputDevice> PlaybackTracker<D> {
    /// Pump device notifications and fire a due restart.
    ///
    /// Call this from the owning event loop.
    pub fn tick(&mut self) {
        if self.closed {
            return;
        }
        for session in self.device.take_ended() {
            self.handle_ended(session);
        }

        if let Some(due) = self.pending_restart_at {
            if self.device.now() >= due {
                self.pending_restart_at = None;
                self.play();
            }
        }
    }

    /// Process one completion notification.
    ///
    /// Only the active session counts. A completion within the epsilon of
    /// the asset's end rewinds to zero; an earlier one means the device lost
    /// the stream, so the reached position is kept.
    fn handle_ended(&mut self, session: SessionId) {
        if self.session != Some(session) {
            debug!("ignoring stale completion for session {}", session);
            return;
        }
        let duration = self.duration();
        let now = self.device.now();
        self.session = None;

        if self
            .clock
            .is_natural_end(now, duration, self.settings.completion_epsilon)
        {
            self.clock.reset();
            info!("Session {} played to the end", session);
        } else {
            let offset = self.clock.pause(now);
            warn!("session {} ended early at {:.2}s", session, offset);
        }
    }
}
