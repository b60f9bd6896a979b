//! Timer engine errors
//!
//! Every error is non-fatal: the operation that produced it left the engine
//! state untouched.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimerError {
    /// Start attempted with zero steps attached.
    #[error("sequence has no steps")]
    EmptySequence,

    /// Interval start attempted with a non-positive total.
    #[error("interval duration must be greater than zero")]
    ZeroDuration,

    /// Navigation target outside the sequence.
    #[error("step index {index} out of range for {len} steps")]
    IndexOutOfRange { index: isize, len: usize },

    /// Interval configuration edited after the timer was started.
    #[error("interval configuration is locked until reset")]
    ConfigurationLocked,
}
