//! Position bookkeeping for single-use output sessions.

/// Timing state used to derive the playback position.
///
/// While a session is active the position is `now - anchor_time`, where
/// `now` comes from the output device's monotonic clock. While paused the
/// position is `paused_offset`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlaybackClock {
    anchor_time: f64,
    paused_offset: f64,
}

impl PlaybackClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offset (seconds) a new session should start from.
    ///
    /// The paused offset is wrapped into `[0, duration)` so accumulated drift
    /// past the end never indexes outside the asset.
    pub fn start_offset(&self, duration: f64) -> f64 {
        if duration.is_nan() || duration <= 0.0 || !self.paused_offset.is_finite() {
            return 0.0;
        }
        let offset = self.paused_offset.rem_euclid(duration);
        // rem_euclid can round up to `duration` for tiny negative inputs.
        if offset >= duration {
            0.0
        } else {
            offset
        }
    }

    /// Anchor the clock for a session that started at `offset` at time `now`.
    pub fn anchor(&mut self, now: f64, offset: f64) {
        self.anchor_time = now - offset;
    }

    /// Seconds into the asset for the active session.
    pub fn elapsed(&self, now: f64) -> f64 {
        now - self.anchor_time
    }

    /// Record the position of a session being stopped at `now`.
    pub fn pause(&mut self, now: f64) -> f64 {
        self.paused_offset = self.elapsed(now).max(0.0);
        self.paused_offset
    }

    /// True when a session ending at `now` reached the end of the asset.
    pub fn is_natural_end(&self, now: f64, duration: f64, epsilon: f64) -> bool {
        self.elapsed(now) >= duration - epsilon
    }

    pub fn reset(&mut self) {
        self.anchor_time = 0.0;
        self.paused_offset = 0.0;
    }

    pub fn anchor_time(&self) -> f64 {
        self.anchor_time
    }

    pub fn paused_offset(&self) -> f64 {
        self.paused_offset
    }

    #[cfg(test)]
    pub(crate) fn set_paused_offset(&mut self, offset: f64) {
        self.paused_offset = offset;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pause_records_elapsed_since_anchor() {
        let mut clock = PlaybackClock::new();
        clock.anchor(12.0, 3.0);
        assert_eq!(clock.anchor_time(), 9.0);
        assert_eq!(clock.pause(14.5), 5.5);
        assert_eq!(clock.paused_offset(), 5.5);
    }

    #[test]
    fn start_offset_wraps_past_duration() {
        let mut clock = PlaybackClock::new();
        clock.set_paused_offset(10.0);
        assert_eq!(clock.start_offset(10.0), 0.0);
        clock.set_paused_offset(13.5);
        assert!((clock.start_offset(10.0) - 3.5).abs() < 1e-9);
        clock.set_paused_offset(4.0);
        assert_eq!(clock.start_offset(10.0), 4.0);
    }

    #[test]
    fn start_offset_handles_degenerate_values() {
        let mut clock = PlaybackClock::new();
        clock.set_paused_offset(f64::NAN);
        assert_eq!(clock.start_offset(10.0), 0.0);
        clock.set_paused_offset(3.0);
        assert_eq!(clock.start_offset(0.0), 0.0);
        clock.set_paused_offset(-1e-18);
        let offset = clock.start_offset(10.0);
        assert!((0.0..10.0).contains(&offset));
    }

    #[test]
    fn natural_end_uses_epsilon() {
        let mut clock = PlaybackClock::new();
        clock.anchor(100.0, 0.0);
        assert!(clock.is_natural_end(109.95, 10.0, 0.1));
        assert!(clock.is_natural_end(110.2, 10.0, 0.1));
        assert!(!clock.is_natural_end(104.0, 10.0, 0.1));
    }

    #[test]
    fn pause_never_goes_negative() {
        let mut clock = PlaybackClock::new();
        clock.anchor(5.0, 0.0);
        assert_eq!(clock.pause(4.0), 0.0);
    }
}
