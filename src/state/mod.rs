//! State management module
//! 
//! This module contains the timer state entity, the application state that
//! owns both engines, and their read-only status projections.

pub mod app_state;
pub mod status;
pub mod timer_state;

// Re-export main types
pub use app_state::{AppError, AppState, EngineKind, SignalEvent};
pub use status::{BrewStatus, KnobStatus};
pub use timer_state::{Phase, TimerState};
