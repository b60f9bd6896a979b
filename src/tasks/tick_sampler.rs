//! Tick sampler background task

use std::{sync::Arc, time::Duration};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::state::{AppState, EngineKind};

/// Recommended sampling period
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_millis(200);

/// Background task that samples one engine while, and only while, it runs.
///
/// The task parks on the engine's running flag. Entering the running state
/// creates a fresh interval; leaving it drops the interval, so at most one
/// sampler is ever active per engine. Ticks are only a trigger: the engine
/// derives remaining time from its deadline, so late or skipped ticks are
/// harmless.
pub async fn tick_sampler_task(state: Arc<AppState>, engine: EngineKind, period: Duration) {
    info!("Starting {} tick sampler ({}ms)", engine.as_str(), period.as_millis());

    let mut running_rx = state.subscribe_running(engine);

    loop {
        // Wait for the engine to start running
        if !*running_rx.borrow_and_update() {
            if running_rx.changed().await.is_err() {
                debug!("Running flag closed, stopping {} sampler", engine.as_str());
                return;
            }
            continue;
        }

        debug!("{} sampler active", engine.as_str());
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    match state.tick(engine) {
                        Ok(true) => {}
                        Ok(false) => break,
                        // The engine is unusable; re-arming would spin on the same error
                        Err(e) => {
                            error!("Failed to tick {} timer, stopping sampler: {}", engine.as_str(), e);
                            return;
                        }
                    }
                }

                // A user action stopped the engine between ticks
                changed = running_rx.changed() => {
                    if changed.is_err() {
                        return;
                    }
                    if !*running_rx.borrow_and_update() {
                        break;
                    }
                }
            }
        }

        debug!("{} sampler idle", engine.as_str());
    }
}
