//! Deterministic output device with a manually advanced clock.
//!
//! `VirtualDevice` is a cheap handle; clones share the same state so a test
//! can keep one handle while a tracker owns another.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use crate::asset::AudioAsset;

use super::{DeviceError, OutputDevice, SessionId};

/// One recorded `start` call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StartRecord {
    pub session: SessionId,
    pub offset: f64,
    pub at: f64,
}

#[derive(Debug, Clone, Copy)]
struct VirtualStream {
    session: SessionId,
    ends_at: f64,
}

#[derive(Debug, Default)]
struct VirtualState {
    now: f64,
    suspended: bool,
    closed: bool,
    fail_next_start: bool,
    resumes: usize,
    streams: Vec<VirtualStream>,
    ended: Vec<SessionId>,
    starts: Vec<StartRecord>,
    stops: Vec<SessionId>,
}

#[derive(Debug, Clone, Default)]
pub struct VirtualDevice {
    state: Rc<RefCell<VirtualState>>,
}

impl VirtualDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward, completing streams that reach their end.
    pub fn advance(&self, seconds: f64) {
        let mut state = self.state.borrow_mut();
        state.now += seconds;
        let now = state.now;
        let mut finished = Vec::new();
        state.streams.retain(|stream| {
            if stream.ends_at <= now {
                finished.push(stream.session);
                false
            } else {
                true
            }
        });
        state.ended.extend(finished);
    }

    pub fn time(&self) -> f64 {
        self.state.borrow().now
    }

    /// Queue a completion notification regardless of stream state.
    pub fn fire_ended(&self, session: SessionId) {
        let mut state = self.state.borrow_mut();
        state.streams.retain(|stream| stream.session != session);
        state.ended.push(session);
    }

    pub fn suspend(&self) {
        self.state.borrow_mut().suspended = true;
    }

    /// Make the next `start` call fail.
    pub fn fail_next_start(&self) {
        self.state.borrow_mut().fail_next_start = true;
    }

    pub fn starts(&self) -> Vec<StartRecord> {
        self.state.borrow().starts.clone()
    }

    pub fn last_start(&self) -> Option<StartRecord> {
        self.state.borrow().starts.last().copied()
    }

    pub fn stops(&self) -> Vec<SessionId> {
        self.state.borrow().stops.clone()
    }

    pub fn active_sessions(&self) -> Vec<SessionId> {
        self.state
            .borrow()
            .streams
            .iter()
            .map(|stream| stream.session)
            .collect()
    }

    pub fn pending_ended(&self) -> Vec<SessionId> {
        self.state.borrow().ended.clone()
    }

    pub fn resume_count(&self) -> usize {
        self.state.borrow().resumes
    }

    pub fn is_closed(&self) -> bool {
        self.state.borrow().closed
    }
}

impl OutputDevice for VirtualDevice {
    fn now(&self) -> f64 {
        self.state.borrow().now
    }

    fn is_suspended(&self) -> bool {
        self.state.borrow().suspended
    }

    fn resume(&mut self) -> Result<(), DeviceError> {
        let mut state = self.state.borrow_mut();
        if state.closed {
            return Err(DeviceError::Unavailable("device closed".to_string()));
        }
        state.suspended = false;
        state.resumes += 1;
        Ok(())
    }

    fn start(
        &mut self,
        session: SessionId,
        asset: &Arc<AudioAsset>,
        offset: f64,
    ) -> Result<(), DeviceError> {
        let mut state = self.state.borrow_mut();
        if state.closed {
            return Err(DeviceError::Unavailable("device closed".to_string()));
        }
        if state.suspended {
            return Err(DeviceError::Suspended);
        }
        if state.fail_next_start {
            state.fail_next_start = false;
            return Err(DeviceError::StartFailed("injected failure".to_string()));
        }
        if state.streams.iter().any(|stream| stream.session == session) {
            return Err(DeviceError::StartFailed(format!(
                "session {} already started",
                session
            )));
        }

        let now = state.now;
        state.starts.push(StartRecord {
            session,
            offset,
            at: now,
        });
        state.streams.push(VirtualStream {
            session,
            ends_at: now + (asset.duration() - offset).max(0.0),
        });
        Ok(())
    }

    fn stop(&mut self, session: SessionId) -> Result<(), DeviceError> {
        let mut state = self.state.borrow_mut();
        let index = state
            .streams
            .iter()
            .position(|stream| stream.session == session)
            .ok_or(DeviceError::InactiveStream(session))?;
        state.streams.remove(index);
        state.stops.push(session);
        state.ended.push(session);
        Ok(())
    }

    fn take_ended(&mut self) -> Vec<SessionId> {
        std::mem::take(&mut self.state.borrow_mut().ended)
    }

    fn close(&mut self) {
        let mut state = self.state.borrow_mut();
        let sessions: Vec<SessionId> = state.streams.drain(..).map(|s| s.session).collect();
        state.stops.extend(sessions.iter().copied());
        state.ended.extend(sessions);
        state.closed = true;
    }
}
