//! Read-only status projections of the timer engines

use serde::Serialize;

use crate::{
    timer::{Clock, IntervalTimer, SequenceTimer, Step},
    utils::format_clock,
};
use super::timer_state::Phase;

/// Snapshot of the recipe brew timer
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrewStatus {
    pub recipe_id: Option<String>,
    pub phase: Phase,
    pub step: Option<Step>,
    pub upcoming_step: Option<Step>,
    pub step_count: usize,
    pub active_index: Option<usize>,
    pub remaining_seconds: u64,
    pub remaining_display: String,
    pub elapsed_seconds: u64,
    pub total_seconds: u64,
    pub total_remaining_seconds: u64,
    pub progress_percent: f64,
    pub running: bool,
    pub finished: bool,
}

impl BrewStatus {
    pub fn from_timer<C: Clock>(timer: &SequenceTimer<C>) -> Self {
        let state = timer.state();
        let id = timer.sequence().id();

        Self {
            recipe_id: (!id.is_empty()).then(|| id.to_string()),
            phase: state.phase(),
            step: timer.current_step().cloned(),
            upcoming_step: timer.upcoming_step().cloned(),
            step_count: timer.sequence().len(),
            active_index: state.active_index,
            remaining_seconds: state.remaining_seconds,
            remaining_display: format_clock(state.remaining_seconds),
            elapsed_seconds: timer.elapsed_overall(),
            total_seconds: timer.total_duration(),
            total_remaining_seconds: timer.total_remaining(),
            progress_percent: timer.progress_percent(),
            running: state.is_running,
            finished: state.is_finished,
        }
    }
}

/// Snapshot of the single interval timer
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KnobStatus {
    pub phase: Phase,
    /// Configuration is read-only from the first start until reset
    pub locked: bool,
    pub minutes: u32,
    pub seconds: u32,
    pub display_minutes: u32,
    pub display_seconds: u32,
    pub remaining_seconds: u64,
    pub remaining_display: String,
    pub total_input_seconds: u64,
    pub running: bool,
    pub finished: bool,
}

impl KnobStatus {
    pub fn from_timer<C: Clock>(timer: &IntervalTimer<C>) -> Self {
        let state = timer.state();
        let (display_minutes, display_seconds) = timer.display_components();

        Self {
            phase: state.phase(),
            locked: timer.is_locked(),
            minutes: timer.minutes(),
            seconds: timer.seconds(),
            display_minutes,
            display_seconds,
            remaining_seconds: state.remaining_seconds,
            remaining_display: format_clock(timer.display_seconds()),
            total_input_seconds: timer.total_input_seconds(),
            running: state.is_running,
            finished: state.is_finished,
        }
    }
}
