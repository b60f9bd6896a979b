//! Timer engine
//!
//! Deadline-based countdown engines: a sequential step timer for recipes and
//! a single interval timer. Both are plain state machines with an injected
//! [`Clock`]; nothing in here sleeps, spawns or performs I/O.

pub mod clock;
pub mod error;
pub mod interval;
pub mod sequence;
pub mod signal;
pub mod step;

pub use clock::{Clock, ManualClock, SharedClock, SystemClock};
pub use error::TimerError;
pub use interval::{IntervalEvent, IntervalTimer};
pub use sequence::{SequenceEvent, SequenceTimer, Signals};
pub use signal::TimerSignal;
pub use step::{Step, StepSequence};
