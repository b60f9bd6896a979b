//! Side-effect signals emitted by the timer engines

use serde::Serialize;

use super::step::Step;

/// Signal emitted by a transition for the feedback layer to render
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum TimerSignal {
    /// A step became the active step (notify-tick)
    StepEnter { step: Step },
    /// The final step or the sole interval reached zero (notify-finish)
    Finish,
    /// First run of a freshly attached sequence; used to stamp last-used time
    #[serde(rename = "first-run")]
    SequenceFirstRun { sequence_id: String },
}

impl TimerSignal {
    /// Short kebab-case name used in logs and notifier environments
    pub fn name(&self) -> &'static str {
        match self {
            Self::StepEnter { .. } => "step-enter",
            Self::Finish => "finish",
            Self::SequenceFirstRun { .. } => "first-run",
        }
    }
}
