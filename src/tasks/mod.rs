//! Background tasks module
//! 
//! This module contains background tasks that run alongside the HTTP server.

pub mod feedback;
pub mod tick_sampler;

// Re-export main functions
pub use feedback::feedback_task;
pub use tick_sampler::{tick_sampler_task, DEFAULT_TICK_PERIOD};
