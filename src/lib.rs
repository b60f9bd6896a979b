//! Brewlab - A drift-resistant brew timer service
//! 
//! This library provides the deadline-based timer engines that walk through
//! step-by-step coffee recipes, a standalone interval timer, and the HTTP host
//! that drives them with a periodic tick sampler.

pub mod config;
pub mod state;
pub mod api;
pub mod recipes;
pub mod services;
pub mod tasks;
pub mod timer;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::{AppState, EngineKind};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
