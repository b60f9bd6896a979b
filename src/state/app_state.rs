//! Main application state management

use std::{
    path::PathBuf,
    sync::Mutex,
    time::Instant,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, trace, warn};

use crate::{
    recipes::{RecipeBook, RecipeError},
    timer::{IntervalTimer, SequenceTimer, SharedClock, Signals, TimerError, TimerSignal},
};
use super::{BrewStatus, KnobStatus};

/// Default knob configuration, 00:30
const DEFAULT_KNOB_SECONDS: u32 = 30;

/// Which engine an operation or signal belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    Brew,
    Knob,
}

impl EngineKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Brew => "brew",
            Self::Knob => "knob",
        }
    }
}

/// A signal tagged with its engine and emission time
#[derive(Debug, Clone, Serialize)]
pub struct SignalEvent {
    pub engine: EngineKind,
    pub signal: TimerSignal,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Timer(#[from] TimerError),

    #[error("recipe not found: {0}")]
    RecipeNotFound(String),

    #[error("no recipe attached to the brew timer")]
    NoRecipeAttached,

    #[error("{0}")]
    Lock(String),

    #[error(transparent)]
    Recipe(#[from] RecipeError),
}

type Brew = SequenceTimer<SharedClock>;
type Knob = IntervalTimer<SharedClock>;

fn attached(brew: &mut Brew) -> Result<&mut Brew, AppError> {
    if brew.sequence().id().is_empty() {
        return Err(AppError::NoRecipeAttached);
    }
    Ok(brew)
}

/// Main application state that owns both timer engines and the recipe book
#[derive(Debug)]
pub struct AppState {
    /// Recipe brew timer
    pub brew: Mutex<Brew>,
    /// Standalone knob timer
    pub knob: Mutex<Knob>,
    pub recipes: Mutex<RecipeBook>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Mutex<Option<String>>,
    pub last_action_time: Mutex<Option<DateTime<Utc>>>,
    /// Emitted timer signals for the feedback layer
    pub signal_tx: broadcast::Sender<SignalEvent>,
    /// Running flags that drive the tick samplers
    brew_running_tx: watch::Sender<bool>,
    knob_running_tx: watch::Sender<bool>,
}

impl AppState {
    pub fn new(port: u16, host: String, clock: SharedClock, recipes: RecipeBook) -> Self {
        let (signal_tx, _) = broadcast::channel(100);
        let (brew_running_tx, _) = watch::channel(false);
        let (knob_running_tx, _) = watch::channel(false);

        Self {
            brew: Mutex::new(SequenceTimer::new(clock.clone())),
            knob: Mutex::new(IntervalTimer::new(clock, 0, DEFAULT_KNOB_SECONDS)),
            recipes: Mutex::new(recipes),
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
            signal_tx,
            brew_running_tx,
            knob_running_tx,
        }
    }

    fn lock_brew(&self) -> Result<std::sync::MutexGuard<'_, Brew>, AppError> {
        self.brew.lock()
            .map_err(|e| AppError::Lock(format!("Failed to lock brew timer: {}", e)))
    }

    fn lock_knob(&self) -> Result<std::sync::MutexGuard<'_, Knob>, AppError> {
        self.knob.lock()
            .map_err(|e| AppError::Lock(format!("Failed to lock knob timer: {}", e)))
    }

    fn lock_recipes(&self) -> Result<std::sync::MutexGuard<'_, RecipeBook>, AppError> {
        self.recipes.lock()
            .map_err(|e| AppError::Lock(format!("Failed to lock recipe book: {}", e)))
    }

    /// Apply an operation to the brew timer and publish its effects
    pub fn update_brew<F>(&self, action: &str, op: F) -> Result<BrewStatus, AppError>
    where
        F: FnOnce(&mut Brew) -> Result<Signals, AppError>,
    {
        let mut brew = self.lock_brew()?;
        let signals = op(&mut *brew)?;
        let status = BrewStatus::from_timer(&*brew);
        // Published under the engine lock so flags and signals follow transition order
        self.publish_running(EngineKind::Brew, status.running);
        self.emit(EngineKind::Brew, signals);
        drop(brew);

        debug!("Brew {}: phase={:?} remaining={}s", action, status.phase, status.remaining_seconds);
        self.record_action(action);
        Ok(status)
    }

    /// Apply an operation to the knob timer and publish its effects
    pub fn update_knob<F>(&self, action: &str, op: F) -> Result<KnobStatus, AppError>
    where
        F: FnOnce(&mut Knob) -> Result<Signals, AppError>,
    {
        let mut knob = self.lock_knob()?;
        let signals = op(&mut *knob)?;
        let status = KnobStatus::from_timer(&*knob);
        self.publish_running(EngineKind::Knob, status.running);
        self.emit(EngineKind::Knob, signals);
        drop(knob);

        debug!("Knob {}: phase={:?} remaining={}s", action, status.phase, status.remaining_seconds);
        self.record_action(action);
        Ok(status)
    }

    /// Attach a recipe to the brew timer. Re-attaching the same recipe keeps
    /// the timer state; a different recipe resets it.
    pub fn attach_recipe(&self, recipe_id: &str) -> Result<BrewStatus, AppError> {
        let sequence = {
            let recipes = self.lock_recipes()?;
            recipes.get(recipe_id)
                .map(|r| r.to_sequence())
                .ok_or_else(|| AppError::RecipeNotFound(recipe_id.to_string()))?
        };

        self.update_brew("attach", |brew| {
            if brew.sequence().id() == sequence.id() {
                info!("Recipe {} already attached, keeping timer state", recipe_id);
            } else {
                info!("Attaching recipe {} ({} steps)", recipe_id, sequence.len());
                brew.attach(sequence);
            }
            Ok(Vec::new())
        })
    }

    pub fn brew_start(&self) -> Result<BrewStatus, AppError> {
        self.update_brew("start", |brew| Ok(attached(brew)?.start()?))
    }

    pub fn brew_pause(&self) -> Result<BrewStatus, AppError> {
        self.update_brew("pause", |brew| Ok(attached(brew)?.pause()))
    }

    pub fn brew_next(&self) -> Result<BrewStatus, AppError> {
        self.update_brew("next", |brew| Ok(attached(brew)?.next()?))
    }

    pub fn brew_prev(&self) -> Result<BrewStatus, AppError> {
        self.update_brew("prev", |brew| Ok(attached(brew)?.prev()?))
    }

    pub fn brew_jump(&self, index: usize) -> Result<BrewStatus, AppError> {
        self.update_brew("jump", |brew| Ok(attached(brew)?.jump_to(index)?))
    }

    pub fn brew_reset_step(&self) -> Result<BrewStatus, AppError> {
        self.update_brew("reset-step", |brew| {
            attached(brew)?.reset_step();
            Ok(Vec::new())
        })
    }

    pub fn brew_reset(&self) -> Result<BrewStatus, AppError> {
        self.update_brew("reset", |brew| {
            attached(brew)?.reset_sequence();
            Ok(Vec::new())
        })
    }

    pub fn brew_status(&self) -> Result<BrewStatus, AppError> {
        Ok(BrewStatus::from_timer(&*self.lock_brew()?))
    }

    pub fn knob_configure(&self, minutes: u32, seconds: u32) -> Result<KnobStatus, AppError> {
        self.update_knob("configure", |knob| {
            knob.configure(minutes, seconds)?;
            Ok(Vec::new())
        })
    }

    pub fn knob_start(&self) -> Result<KnobStatus, AppError> {
        self.update_knob("knob-start", |knob| Ok(knob.start()?))
    }

    pub fn knob_pause(&self) -> Result<KnobStatus, AppError> {
        self.update_knob("knob-pause", |knob| {
            knob.pause();
            Ok(Vec::new())
        })
    }

    pub fn knob_reset(&self) -> Result<KnobStatus, AppError> {
        self.update_knob("knob-reset", |knob| {
            knob.reset();
            Ok(Vec::new())
        })
    }

    pub fn knob_status(&self) -> Result<KnobStatus, AppError> {
        Ok(KnobStatus::from_timer(&*self.lock_knob()?))
    }

    /// Sample one engine against the clock; returns whether it is still running
    pub fn tick(&self, engine: EngineKind) -> Result<bool, AppError> {
        let (running, remaining) = match engine {
            EngineKind::Brew => {
                let mut brew = self.lock_brew()?;
                let signals = brew.tick();
                let running = brew.is_running();
                self.publish_running(engine, running);
                self.emit(engine, signals);
                (running, brew.remaining_seconds())
            }
            EngineKind::Knob => {
                let mut knob = self.lock_knob()?;
                let signals = knob.tick();
                let running = knob.is_running();
                self.publish_running(engine, running);
                self.emit(engine, signals);
                (running, knob.remaining_seconds())
            }
        };

        trace!("{} tick: remaining={}s running={}", engine.as_str(), remaining, running);
        Ok(running)
    }

    /// Watch the running flag of one engine
    pub fn subscribe_running(&self, engine: EngineKind) -> watch::Receiver<bool> {
        match engine {
            EngineKind::Brew => self.brew_running_tx.subscribe(),
            EngineKind::Knob => self.knob_running_tx.subscribe(),
        }
    }

    pub fn subscribe_signals(&self) -> broadcast::Receiver<SignalEvent> {
        self.signal_tx.subscribe()
    }

    fn publish_running(&self, engine: EngineKind, running: bool) {
        let tx = match engine {
            EngineKind::Brew => &self.brew_running_tx,
            EngineKind::Knob => &self.knob_running_tx,
        };
        tx.send_if_modified(|current| {
            if *current == running {
                false
            } else {
                *current = running;
                true
            }
        });
    }

    fn emit(&self, engine: EngineKind, signals: Signals) {
        for signal in signals {
            debug!("{} signal: {}", engine.as_str(), signal.name());
            let event = SignalEvent {
                engine,
                signal,
                timestamp: Utc::now(),
            };
            // No subscribers just means nobody renders feedback
            if self.signal_tx.send(event).is_err() {
                trace!("No signal subscribers");
            }
        }
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Stamp a recipe's last-used time and return a snapshot to persist, if
    /// the book is file-backed
    pub fn stamp_last_used(&self, recipe_id: &str, at: DateTime<Utc>) -> Result<Option<(PathBuf, String)>, AppError> {
        let mut recipes = self.lock_recipes()?;
        if !recipes.touch(recipe_id, at) {
            warn!("Cannot stamp unknown recipe {}", recipe_id);
            return Ok(None);
        }

        match recipes.path() {
            Some(path) => Ok(Some((path.to_path_buf(), recipes.export()?))),
            None => Ok(None),
        }
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
