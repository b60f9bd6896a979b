//! Timer state entity shared by both engine variants

use serde::Serialize;

use crate::timer::clock;

/// Coarse lifecycle phase derived from a [`TimerState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Running,
    Paused,
    Finished,
}

/// Core engine state; owned exclusively by one engine instance
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerState {
    /// Active step index (sequential engine only)
    pub active_index: Option<usize>,
    /// Display value, refreshed on every tick
    pub remaining_seconds: u64,
    /// Absolute deadline; present only while running
    pub deadline_epoch_ms: Option<i64>,
    pub is_running: bool,
    pub is_finished: bool,
    /// Next deadline seeds from `remaining_seconds` rather than a full duration
    pub resume_from_pause: bool,
}

impl TimerState {
    /// Create an idle state showing `remaining_seconds`
    pub fn idle(active_index: Option<usize>, remaining_seconds: u64) -> Self {
        Self {
            active_index,
            remaining_seconds,
            ..Self::default()
        }
    }

    /// Anchor a fresh run segment of `seconds` at `now_ms`
    pub fn run(&mut self, now_ms: i64, seconds: u64) {
        self.deadline_epoch_ms = Some(clock::arm(now_ms, seconds));
        self.remaining_seconds = seconds;
        self.is_running = true;
        self.is_finished = false;
        self.resume_from_pause = false;
    }

    /// Freeze the remaining value and drop the deadline
    pub fn freeze(&mut self, now_ms: i64) {
        if let Some(deadline) = self.deadline_epoch_ms.take() {
            self.remaining_seconds = clock::sample(now_ms, deadline);
        }
        self.is_running = false;
        self.resume_from_pause = true;
    }

    /// Stop at zero in the finished state
    pub fn finish(&mut self) {
        self.deadline_epoch_ms = None;
        self.remaining_seconds = 0;
        self.is_running = false;
        self.is_finished = true;
        self.resume_from_pause = false;
    }

    /// Sample the deadline and store the result as the display value
    pub fn refresh(&mut self, now_ms: i64) -> u64 {
        if let Some(deadline) = self.deadline_epoch_ms {
            self.remaining_seconds = clock::sample(now_ms, deadline);
        }
        self.remaining_seconds
    }

    /// Whether the engine is parked in the paused state
    pub fn is_paused(&self) -> bool {
        !self.is_running && self.resume_from_pause
    }

    pub fn phase(&self) -> Phase {
        if self.is_running {
            Phase::Running
        } else if self.is_finished {
            Phase::Finished
        } else if self.is_paused() {
            Phase::Paused
        } else {
            Phase::Idle
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_then_freeze_keeps_sampled_remaining() {
        let mut state = TimerState::idle(Some(0), 10);
        state.run(0, 10);
        assert_eq!(state.deadline_epoch_ms, Some(10_000));
        assert!(state.is_running);

        state.freeze(4_000);
        assert_eq!(state.remaining_seconds, 6);
        assert_eq!(state.deadline_epoch_ms, None);
        assert!(state.is_paused());
        assert_eq!(state.phase(), Phase::Paused);
    }

    #[test]
    fn finish_clears_running() {
        let mut state = TimerState::idle(None, 3);
        state.run(0, 3);
        state.finish();
        assert!(state.is_finished);
        assert!(!state.is_running);
        assert_eq!(state.remaining_seconds, 0);
        assert_eq!(state.deadline_epoch_ms, None);
        assert_eq!(state.phase(), Phase::Finished);
    }
}
