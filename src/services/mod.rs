//! External feedback services module
//! 
//! This module contains the side-effect channels that render timer signals
//! to the user.

pub mod notifier;

// Re-export main types
pub use notifier::{run_notify_command, signal_env, Notifier};
