//! Single interval timer
//!
//! One countdown whose minutes/seconds are editable while configuring and
//! locked from the first start until `reset`.

use tracing::debug;

use crate::state::TimerState;
use super::{clock::Clock, error::TimerError, sequence::Signals, signal::TimerSignal};

/// Largest value either component may take
pub const MAX_COMPONENT: u32 = 59;
/// Largest configurable interval (59:59)
pub const MAX_TOTAL_SECONDS: u64 = 59 * 60 + 59;

/// Events accepted by the interval state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalEvent {
    Configure { minutes: u32, seconds: u32 },
    Start,
    Pause,
    Tick,
    Reset,
}

#[derive(Debug)]
pub struct IntervalTimer<C> {
    clock: C,
    minutes: u32,
    seconds: u32,
    locked: bool,
    state: TimerState,
}

impl<C: Clock> IntervalTimer<C> {
    pub fn new(clock: C, minutes: u32, seconds: u32) -> Self {
        let mut timer = Self {
            clock,
            minutes: 0,
            seconds: 0,
            locked: false,
            state: TimerState::default(),
        };
        timer.set_components(minutes, seconds);
        timer
    }

    /// Attach a fresh duration, discarding any run in progress
    pub fn attach(&mut self, total_seconds: u64) {
        let total = total_seconds.min(MAX_TOTAL_SECONDS);
        self.locked = false;
        self.set_components((total / 60) as u32, (total % 60) as u32);
    }

    fn set_components(&mut self, minutes: u32, seconds: u32) {
        self.minutes = minutes.min(MAX_COMPONENT);
        self.seconds = seconds.min(MAX_COMPONENT);
        self.state = TimerState::idle(None, self.total_input_seconds());
    }

    /// Apply `event` as of `now_ms`. On error the state is left unchanged.
    pub fn apply_at(&mut self, event: IntervalEvent, now_ms: i64) -> Result<Signals, TimerError> {
        match event {
            IntervalEvent::Configure { minutes, seconds } => {
                if self.locked {
                    return Err(TimerError::ConfigurationLocked);
                }
                self.set_components(minutes, seconds);
                Ok(Vec::new())
            }
            IntervalEvent::Start => {
                if self.state.is_running || self.state.is_finished {
                    return Ok(Vec::new());
                }
                if self.locked {
                    let remaining = self.state.remaining_seconds;
                    self.state.run(now_ms, remaining);
                } else {
                    let total = self.total_input_seconds();
                    if total == 0 {
                        return Err(TimerError::ZeroDuration);
                    }
                    self.locked = true;
                    self.state.run(now_ms, total);
                }
                Ok(Vec::new())
            }
            IntervalEvent::Pause => {
                if self.state.is_running {
                    self.state.freeze(now_ms);
                }
                Ok(Vec::new())
            }
            IntervalEvent::Tick => {
                if !self.state.is_running || self.state.refresh(now_ms) > 0 {
                    return Ok(Vec::new());
                }
                self.state.finish();
                debug!("Interval finished");
                Ok(vec![TimerSignal::Finish])
            }
            IntervalEvent::Reset => {
                self.locked = false;
                self.state = TimerState::idle(None, self.total_input_seconds());
                Ok(Vec::new())
            }
        }
    }

    pub fn configure(&mut self, minutes: u32, seconds: u32) -> Result<(), TimerError> {
        self.apply_at(IntervalEvent::Configure { minutes, seconds }, self.clock.now_ms())
            .map(|_| ())
    }

    pub fn start(&mut self) -> Result<Signals, TimerError> {
        self.apply_at(IntervalEvent::Start, self.clock.now_ms())
    }

    pub fn pause(&mut self) {
        let _ = self.apply_at(IntervalEvent::Pause, self.clock.now_ms());
    }

    pub fn tick(&mut self) -> Signals {
        self.apply_at(IntervalEvent::Tick, self.clock.now_ms())
            .unwrap_or_default()
    }

    pub fn reset(&mut self) {
        let _ = self.apply_at(IntervalEvent::Reset, self.clock.now_ms());
    }

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    /// Minutes as last configured by the caller
    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    /// Seconds as last configured by the caller
    pub fn seconds(&self) -> u32 {
        self.seconds
    }

    pub fn total_input_seconds(&self) -> u64 {
        (u64::from(self.minutes) * 60 + u64::from(self.seconds)).min(MAX_TOTAL_SECONDS)
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.state.remaining_seconds
    }

    /// Value shown on the dial: remaining once locked, configuration otherwise
    pub fn display_seconds(&self) -> u64 {
        if self.state.is_finished {
            0
        } else if self.locked {
            self.state.remaining_seconds
        } else {
            self.total_input_seconds()
        }
    }

    pub fn display_components(&self) -> (u32, u32) {
        let shown = self.display_seconds();
        ((shown / 60) as u32, (shown % 60) as u32)
    }
}
