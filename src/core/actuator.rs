//! # Shutdown actuator: grace delay, then one external command.
//!
//! [`ShutdownActuator`] owns the single piece of mutable state in the
//! watcher: whether shutdown has already been triggered. The state flips
//! `NotTriggered → Triggered` exactly once, *before* the grace sleep, so a
//! second qualifying event can never re-invoke the command — no matter how
//! many terminal events the supervisor still delivers.
//!
//! The command itself is fire-and-forget: the actuator waits for nothing
//! beyond spawn success. Its stdio is nulled because the watcher's own
//! stdout is the protocol channel and must never receive subprocess output.

use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::info;

use crate::error::ActuatorError;

/// Whether the shutdown sequence has been started.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ActuatorState {
    NotTriggered,
    Triggered,
}

/// Issues the external shutdown command at most once per process lifetime.
pub struct ShutdownActuator {
    state: ActuatorState,
    grace: Duration,
    command: Vec<String>,
}

impl ShutdownActuator {
    /// Creates an actuator in the `NotTriggered` state.
    pub fn new(grace: Duration, command: Vec<String>) -> Self {
        Self {
            state: ActuatorState::NotTriggered,
            grace,
            command,
        }
    }

    /// Returns `true` once the shutdown sequence has started.
    pub fn is_triggered(&self) -> bool {
        self.state == ActuatorState::Triggered
    }

    /// Starts the shutdown sequence: mark triggered, sleep the grace
    /// period, spawn the command.
    ///
    /// Calling this again after the first trigger is a no-op returning
    /// `Ok(())`. A spawn failure is reported but leaves the actuator
    /// triggered — there is no retry.
    pub async fn trigger(&mut self) -> Result<(), ActuatorError> {
        if self.is_triggered() {
            return Ok(());
        }
        self.state = ActuatorState::Triggered;

        info!(
            grace_secs = self.grace.as_secs(),
            "terminal event accepted; waiting before shutting down the supervisor"
        );
        tokio::time::sleep(self.grace).await;

        info!(command = ?self.command, "issuing supervisor shutdown");
        self.spawn()
    }

    fn spawn(&self) -> Result<(), ActuatorError> {
        let (program, args) = self
            .command
            .split_first()
            .ok_or(ActuatorError::EmptyCommand)?;

        Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .spawn()
            .map(drop)
            .map_err(|source| ActuatorError::Spawn {
                command: self.command.join(" "),
                source,
            })
    }
}
