use std::time::Duration;

use crate::constants::{COMPLETION_EPSILON_SECONDS, RESTART_DELAY_MS};

use super::PlaybackTracker;
use crate::playback::device::OutputDevice;

/// Tunables for the playback tracker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackerSettings {
    /// Wait between stopping the old stream and starting the new one on
    /// restart.
    pub restart_delay: Duration,
    /// How close to the end (seconds) a completion must land to count as a
    /// natural end.
    pub completion_epsilon: f64,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            restart_delay: Duration::from_millis(RESTART_DELAY_MS),
            completion_epsilon: COMPLETION_EPSILON_SECONDS,
        }
    }
}

impl TrackerSettings {
    pub fn restart_delay(mut self, delay: Duration) -> Self {
        self.restart_delay = delay;
        self
    }

    pub fn completion_epsilon(mut self, seconds: f64) -> Self {
        self.completion_epsilon = seconds.max(0.0);
        self
    }
}

impl<D: OutputDevice> PlaybackTracker<D> {
    /// Configure the restart reacquisition delay.
    pub fn set_restart_delay(&mut self, delay: Duration) {
        self.settings.restart_delay = delay;
    }

    /// Configure the natural-completion tolerance (seconds).
    pub fn set_completion_epsilon(&mut self, seconds: f64) {
        self.settings.completion_epsilon = seconds.max(0.0);
    }
}
