//! Feedback background task

use std::sync::Arc;
use chrono::{DateTime, Utc};
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};

use crate::{
    recipes::write_snapshot,
    services::Notifier,
    state::AppState,
    timer::TimerSignal,
    utils::format_clock,
};

/// Background task that turns emitted timer signals into user feedback and
/// stamps a recipe's last-used time on its first run
pub async fn feedback_task(state: Arc<AppState>, notifier: Notifier) {
    info!("Starting feedback task (notifier {})", if notifier.is_enabled() { "enabled" } else { "disabled" });

    let mut signal_rx = state.subscribe_signals();

    loop {
        match signal_rx.recv().await {
            Ok(event) => {
                match &event.signal {
                    TimerSignal::StepEnter { step } => {
                        info!("Step {}: {} ({})", step.ordinal, step.label, format_clock(step.duration_seconds));
                    }
                    TimerSignal::Finish => {
                        info!("{} timer finished", event.engine.as_str());
                    }
                    TimerSignal::SequenceFirstRun { sequence_id } => {
                        stamp_last_used(&state, sequence_id, event.timestamp).await;
                    }
                }
                notifier.notify(&event);
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!("Feedback task lagged, {} signals dropped", skipped);
            }
            Err(RecvError::Closed) => {
                info!("Signal channel closed, stopping feedback task");
                return;
            }
        }
    }
}

async fn stamp_last_used(state: &AppState, recipe_id: &str, at: DateTime<Utc>) {
    match state.stamp_last_used(recipe_id, at) {
        Ok(Some((path, json))) => {
            if let Err(e) = write_snapshot(&path, json).await {
                warn!("Failed to persist last-used time for {}: {}", recipe_id, e);
            } else {
                info!("Recipe {} marked as used", recipe_id);
            }
        }
        Ok(None) => {}
        Err(e) => warn!("Failed to stamp last-used time for {}: {}", recipe_id, e),
    }
}
