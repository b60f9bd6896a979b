//! Device feedback through an external notify command

use tokio::process::Command;
use tracing::{debug, warn};

use crate::{state::SignalEvent, timer::TimerSignal};

/// Fire-and-forget feedback sink. Failures are logged and never reach the
/// timer engines.
#[derive(Debug, Clone, Default)]
pub struct Notifier {
    command: Option<String>,
}

impl Notifier {
    pub fn new(command: Option<String>) -> Self {
        Self {
            command: command.filter(|c| !c.trim().is_empty()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.command.is_some()
    }

    /// Spawn the notify command for a signal without waiting for it
    pub fn notify(&self, event: &SignalEvent) {
        let Some(command) = self.command.clone() else {
            return;
        };
        // Bookkeeping only, nothing for the user to hear or feel
        if matches!(event.signal, TimerSignal::SequenceFirstRun { .. }) {
            return;
        }

        let env = signal_env(event);
        tokio::spawn(async move {
            if let Err(e) = run_notify_command(&command, &env).await {
                warn!("{}", e);
            }
        });
    }
}

/// Environment handed to the notify command
pub fn signal_env(event: &SignalEvent) -> Vec<(&'static str, String)> {
    let mut env = vec![
        ("BREWLAB_SIGNAL", event.signal.name().to_string()),
        ("BREWLAB_ENGINE", event.engine.as_str().to_string()),
    ];
    if let TimerSignal::StepEnter { step } = &event.signal {
        env.push(("BREWLAB_STEP_LABEL", step.label.clone()));
        env.push(("BREWLAB_STEP", step.ordinal.to_string()));
    }
    env
}

/// Run `command` through `sh -c` with the given environment
pub async fn run_notify_command(command: &str, env: &[(&'static str, String)]) -> Result<(), String> {
    debug!("Running notify command: {}", command);

    let output = Command::new("sh")
        .arg("-c")
        .arg(command)
        .envs(env.iter().map(|(k, v)| (*k, v.as_str())))
        .output()
        .await
        .map_err(|e| format!("Failed to execute notify command: {}", e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!("Notify command failed ({}): {}", output.status, stderr.trim()));
    }

    Ok(())
}
