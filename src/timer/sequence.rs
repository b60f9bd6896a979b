//! Sequential step timer
//!
//! Walks an ordered list of timed steps, auto-advancing when a step's
//! deadline passes. Every transition goes through [`SequenceTimer::apply_at`],
//! which takes the current time explicitly and returns the signals it emits;
//! the convenience methods only read the injected clock and delegate.

use tracing::debug;

use crate::state::TimerState;
use super::{
    clock::{self, Clock},
    error::TimerError,
    signal::TimerSignal,
    step::{Step, StepSequence},
};

/// Events accepted by the sequential state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceEvent {
    Start,
    Pause,
    Tick,
    Next,
    Prev,
    JumpTo(usize),
    ResetStep,
    ResetSequence,
}

pub type Signals = Vec<TimerSignal>;

/// Multi-step countdown driven by an absolute deadline
#[derive(Debug)]
pub struct SequenceTimer<C> {
    clock: C,
    sequence: StepSequence,
    state: TimerState,
    first_run_sent: bool,
}

impl<C: Clock> SequenceTimer<C> {
    /// Create an engine with nothing attached
    pub fn new(clock: C) -> Self {
        Self::with_sequence(clock, StepSequence::default())
    }

    pub fn with_sequence(clock: C, sequence: StepSequence) -> Self {
        let state = Self::initial_state(&sequence);
        Self {
            clock,
            sequence,
            state,
            first_run_sent: false,
        }
    }

    /// Replace the attached sequence and reset all state
    pub fn attach(&mut self, sequence: StepSequence) {
        debug!("Attaching sequence {} ({} steps)", sequence.id(), sequence.len());
        self.state = Self::initial_state(&sequence);
        self.sequence = sequence;
        self.first_run_sent = false;
    }

    fn initial_state(sequence: &StepSequence) -> TimerState {
        match sequence.get(0) {
            Some(first) => TimerState::idle(Some(0), first.duration_seconds),
            None => TimerState::default(),
        }
    }

    /// Apply `event` as of `now_ms`. On error the state is left unchanged.
    pub fn apply_at(&mut self, event: SequenceEvent, now_ms: i64) -> Result<Signals, TimerError> {
        match event {
            SequenceEvent::Start => self.on_start(now_ms),
            SequenceEvent::Pause => {
                if self.state.is_running {
                    self.state.freeze(now_ms);
                }
                Ok(Vec::new())
            }
            SequenceEvent::Tick => Ok(self.on_tick(now_ms)),
            SequenceEvent::Next => {
                let target = self.state.active_index.map_or(0, |i| i + 1);
                self.enter(signed(target), now_ms)
            }
            SequenceEvent::Prev => {
                let target = self.state.active_index.map_or(-1, |i| i as isize - 1);
                self.enter(target, now_ms)
            }
            SequenceEvent::JumpTo(index) => self.enter(signed(index), now_ms),
            SequenceEvent::ResetStep => {
                let index = self.state.active_index;
                let full = index
                    .and_then(|i| self.sequence.get(i))
                    .map_or(0, |s| s.duration_seconds);
                self.state = TimerState::idle(index, full);
                Ok(Vec::new())
            }
            SequenceEvent::ResetSequence => {
                self.state = Self::initial_state(&self.sequence);
                self.first_run_sent = false;
                Ok(Vec::new())
            }
        }
    }

    fn on_start(&mut self, now_ms: i64) -> Result<Signals, TimerError> {
        if self.sequence.is_empty() {
            return Err(TimerError::EmptySequence);
        }
        if self.state.is_running || self.state.is_finished {
            return Ok(Vec::new());
        }

        let index = self.state.active_index.unwrap_or(0);
        let step = self.sequence.get(index).cloned().ok_or(TimerError::IndexOutOfRange {
            index: signed(index),
            len: self.sequence.len(),
        })?;

        let mut signals = Vec::new();
        if !self.first_run_sent {
            self.first_run_sent = true;
            signals.push(TimerSignal::SequenceFirstRun {
                sequence_id: self.sequence.id().to_string(),
            });
        }

        if self.state.resume_from_pause {
            let remaining = self.state.remaining_seconds;
            self.state.run(now_ms, remaining);
        } else {
            self.state.run(now_ms, step.duration_seconds);
            signals.push(TimerSignal::StepEnter { step });
        }
        self.state.active_index = Some(index);

        Ok(signals)
    }

    fn on_tick(&mut self, now_ms: i64) -> Signals {
        if !self.state.is_running {
            return Vec::new();
        }
        if self.state.refresh(now_ms) > 0 {
            return Vec::new();
        }

        let index = self.state.active_index.unwrap_or(0);
        match self.sequence.get(index + 1).cloned() {
            Some(step) => {
                // Chain from the expired deadline so the boundary neither loses
                // nor double counts time, even when this tick arrived late.
                let expired = self.state.deadline_epoch_ms.unwrap_or(now_ms);
                let deadline = clock::arm(expired, step.duration_seconds);
                self.state.active_index = Some(index + 1);
                self.state.deadline_epoch_ms = Some(deadline);
                self.state.remaining_seconds = clock::sample(now_ms, deadline);
                debug!("Advanced to step {} ({})", step.ordinal, step.label);
                vec![TimerSignal::StepEnter { step }]
            }
            None => {
                self.state.finish();
                debug!("Sequence {} finished", self.sequence.id());
                vec![TimerSignal::Finish]
            }
        }
    }

    fn enter(&mut self, target: isize, now_ms: i64) -> Result<Signals, TimerError> {
        let out_of_range = TimerError::IndexOutOfRange {
            index: target,
            len: self.sequence.len(),
        };
        let index = usize::try_from(target).map_err(|_| out_of_range.clone())?;
        let step = self.sequence.get(index).cloned().ok_or(out_of_range)?;

        self.state.active_index = Some(index);
        self.state.is_finished = false;
        self.state.resume_from_pause = false;

        if self.state.is_running {
            self.state.run(now_ms, step.duration_seconds);
            Ok(vec![TimerSignal::StepEnter { step }])
        } else {
            self.state.deadline_epoch_ms = None;
            self.state.remaining_seconds = step.duration_seconds;
            Ok(Vec::new())
        }
    }

    pub fn start(&mut self) -> Result<Signals, TimerError> {
        self.apply_at(SequenceEvent::Start, self.clock.now_ms())
    }

    pub fn pause(&mut self) -> Signals {
        self.apply_at(SequenceEvent::Pause, self.clock.now_ms())
            .unwrap_or_default()
    }

    pub fn tick(&mut self) -> Signals {
        self.apply_at(SequenceEvent::Tick, self.clock.now_ms())
            .unwrap_or_default()
    }

    pub fn next(&mut self) -> Result<Signals, TimerError> {
        self.apply_at(SequenceEvent::Next, self.clock.now_ms())
    }

    pub fn prev(&mut self) -> Result<Signals, TimerError> {
        self.apply_at(SequenceEvent::Prev, self.clock.now_ms())
    }

    pub fn jump_to(&mut self, index: usize) -> Result<Signals, TimerError> {
        self.apply_at(SequenceEvent::JumpTo(index), self.clock.now_ms())
    }

    pub fn reset_step(&mut self) {
        let _ = self.apply_at(SequenceEvent::ResetStep, self.clock.now_ms());
    }

    pub fn reset_sequence(&mut self) {
        let _ = self.apply_at(SequenceEvent::ResetSequence, self.clock.now_ms());
    }

    pub fn sequence(&self) -> &StepSequence {
        &self.sequence
    }

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn current_step(&self) -> Option<&Step> {
        self.state.active_index.and_then(|i| self.sequence.get(i))
    }

    pub fn upcoming_step(&self) -> Option<&Step> {
        self.state.active_index.and_then(|i| self.sequence.get(i + 1))
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.state.remaining_seconds
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished
    }

    pub fn total_duration(&self) -> u64 {
        self.sequence.total_duration()
    }

    /// Seconds elapsed across the whole sequence, valid while running or paused
    pub fn elapsed_overall(&self) -> u64 {
        let Some(index) = self.state.active_index else {
            return 0;
        };
        let Some(step) = self.sequence.get(index) else {
            return 0;
        };
        self.sequence
            .duration_before(index)
            .saturating_add(step.duration_seconds.saturating_sub(self.state.remaining_seconds))
    }

    pub fn total_remaining(&self) -> u64 {
        self.total_duration().saturating_sub(self.elapsed_overall())
    }

    pub fn progress_percent(&self) -> f64 {
        if self.state.is_finished {
            return 100.0;
        }
        match self.total_duration() {
            0 => 0.0,
            total => self.elapsed_overall() as f64 / total as f64 * 100.0,
        }
    }
}

/// Index as reported in errors; values beyond `isize::MAX` pin to it
fn signed(index: usize) -> isize {
    isize::try_from(index).unwrap_or(isize::MAX)
}
