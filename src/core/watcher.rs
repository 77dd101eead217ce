//! # The watcher event loop.
//!
//! [`Watcher`] drives the single synchronous cycle this whole crate exists
//! for:
//!
//! ```text
//! loop {
//!   ├─► READY
//!   ├─► read one frame            ─ clean EOF? exit 0
//!   ├─► dry-run? ──────────────────► OK, next frame
//!   ├─► classify (kind, processname)
//!   ├─► qualifying? ───► actuator.trigger()   (grace sleep + command,
//!   │                                          spawn failure only logged)
//!   └─► OK                        ─ any fault? FAIL, then Err out
//! }
//! ```
//!
//! One frame in flight at a time; every frame consumed gets exactly one
//! reply before the next `READY`. The grace sleep blocks the loop — no
//! frames are read or acknowledged during it, which is fine because the
//! goal at that point is total teardown, not continued service.
//!
//! Input and output are injected, so the loop runs identically against the
//! real stdin/stdout pair and against in-memory streams in tests.

use tokio::io::{AsyncBufRead, AsyncWrite};
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::core::actuator::ShutdownActuator;
use crate::error::{ProtocolError, WatchdogError};
use crate::events::{EventFrame, ProcessEvent};
use crate::protocol::{AckWriter, FrameReader};
use crate::watch::{is_shutdown_qualifying, WatchSet};

/// The event loop: reads frames, decides, actuates, acknowledges.
pub struct Watcher<R, W> {
    reader: FrameReader<R>,
    ack: AckWriter<W>,
    actuator: ShutdownActuator,
    watch: WatchSet,
    dry_run: bool,
}

impl<R, W> Watcher<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Builds a watcher over the given event channel endpoints.
    pub fn new(cfg: Config, input: R, output: W) -> Self {
        Self {
            reader: FrameReader::new(input),
            ack: AckWriter::new(output),
            actuator: ShutdownActuator::new(cfg.grace, cfg.shutdown_command),
            watch: cfg.watch,
            dry_run: cfg.dry_run,
        }
    }

    /// Returns `true` once the shutdown sequence has been started.
    pub fn is_shutdown_triggered(&self) -> bool {
        self.actuator.is_triggered()
    }

    /// Runs the loop until the channel closes or a fault occurs.
    ///
    /// Returns:
    /// - `Ok(())` — the supervisor closed the event channel cleanly
    /// - `Err(_)` — a protocol or acknowledgement fault; the frame being
    ///   processed got a best-effort `FAIL` reply, and the caller should
    ///   exit non-zero
    pub async fn run(&mut self) -> Result<(), WatchdogError> {
        info!(watch = ?self.watch, dry_run = self.dry_run, "listening for events");
        loop {
            self.ack.ready().await.map_err(WatchdogError::Ack)?;

            let frame = match self.reader.next_frame().await {
                Ok(Some(frame)) => frame,
                Ok(None) => {
                    info!("event channel closed; watcher done");
                    return Ok(());
                }
                Err(err) => {
                    error!(fault = err.as_label(), "failed to read event frame: {err}");
                    let _ = self.ack.fail().await;
                    return Err(err.into());
                }
            };

            if self.dry_run {
                debug!(
                    eventname = frame.header.get("eventname").map(String::as_str),
                    "dry-run: frame consumed without classification"
                );
                self.ack.ok().await.map_err(WatchdogError::Ack)?;
                continue;
            }

            match self.handle(&frame).await {
                Ok(()) => self.ack.ok().await.map_err(WatchdogError::Ack)?,
                Err(err) => {
                    error!(fault = err.as_label(), "failed to process event frame: {err}");
                    let _ = self.ack.fail().await;
                    return Err(err.into());
                }
            }
        }
    }

    /// Classifies one frame and, when it qualifies, drives the actuator.
    async fn handle(&mut self, frame: &EventFrame) -> Result<(), ProtocolError> {
        let event = ProcessEvent::classify(frame)?;
        let Some(process) = event.process.as_deref() else {
            return Ok(());
        };

        if !is_shutdown_qualifying(event.kind, process, &self.watch) {
            debug!(
                kind = ?event.kind,
                process,
                "terminal event for unwatched process; ignoring"
            );
            return Ok(());
        }

        // Spawn failure is logged, not escalated: the watcher's job ends
        // either way once the trigger fired.
        if let Err(err) = self.actuator.trigger().await {
            warn!(fault = err.as_label(), "shutdown command failed: {err}");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::time::Duration;

    use super::*;

    /// Encodes one protocol frame: header line with declared length, then
    /// the body bytes with no trailing separator.
    fn encode_frame(eventname: &str, body: &str) -> String {
        format!(
            "ver:3.0 server:supervisor serial:1 pool:watchvisor poolserial:1 \
             eventname:{} len:{}\n{}",
            eventname,
            body.len(),
            body
        )
    }

    fn test_config(watch: WatchSet) -> Config {
        Config {
            watch,
            grace: Duration::from_secs(10),
            dry_run: false,
            shutdown_command: vec!["true".to_string()],
        }
    }

    async fn run_watcher(cfg: Config, input: String) -> (Result<(), WatchdogError>, String, bool) {
        let mut out = Cursor::new(Vec::new());
        let mut watcher = Watcher::new(cfg, input.as_bytes(), &mut out);
        let result = watcher.run().await;
        let triggered = watcher.is_shutdown_triggered();
        (result, String::from_utf8(out.into_inner()).unwrap(), triggered)
    }

    #[tokio::test(start_paused = true)]
    async fn test_exited_watched_process_triggers_shutdown() {
        let input = encode_frame(
            "PROCESS_STATE_EXITED",
            "processname:game groupname:game from_state:RUNNING expected:0",
        );
        let (result, output, triggered) = run_watcher(test_config(WatchSet::default()), input).await;

        result.unwrap();
        assert!(triggered, "shutdown should have been triggered");
        // One READY per wait cycle, one OK for the frame, then the READY
        // on which the channel closed.
        assert_eq!(output, "READY\nRESULT 2\nOKREADY\n");
    }

    #[tokio::test(start_paused = true)]
    async fn test_running_event_is_acknowledged_without_shutdown() {
        let input = encode_frame(
            "PROCESS_STATE_RUNNING",
            "processname:game groupname:game from_state:STARTING pid:123",
        );
        let (result, output, triggered) = run_watcher(test_config(WatchSet::default()), input).await;

        result.unwrap();
        assert!(!triggered);
        assert_eq!(output, "READY\nRESULT 2\nOKREADY\n");
    }

    #[tokio::test(start_paused = true)]
    async fn test_unwatched_process_exit_is_ignored() {
        let input = encode_frame(
            "PROCESS_STATE_EXITED",
            "processname:sidecar groupname:sidecar from_state:RUNNING expected:0",
        );
        let (result, _, triggered) = run_watcher(test_config(WatchSet::new(["game"])), input).await;

        result.unwrap();
        assert!(!triggered);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fatal_event_for_watched_process_triggers_shutdown() {
        let input = encode_frame(
            "PROCESS_STATE_FATAL",
            "processname:game groupname:game from_state:BACKOFF",
        );
        let (result, _, triggered) = run_watcher(test_config(WatchSet::new(["game"])), input).await;

        result.unwrap();
        assert!(triggered);
    }

    #[tokio::test(start_paused = true)]
    async fn test_malformed_body_fails_frame_and_terminates() {
        let input = encode_frame("PROCESS_STATE_EXITED", "badtoken");
        let (result, output, triggered) = run_watcher(test_config(WatchSet::default()), input).await;

        let err = result.unwrap_err();
        assert!(
            matches!(
                err,
                WatchdogError::Protocol(ProtocolError::MalformedBody { .. })
            ),
            "unexpected error: {err:?}"
        );
        assert!(!triggered, "a malformed frame must never trigger shutdown");
        assert_eq!(output, "READY\nRESULT 4\nFAIL");
    }

    #[tokio::test(start_paused = true)]
    async fn test_repeated_terminal_events_trigger_once() {
        let mut input = encode_frame(
            "PROCESS_STATE_EXITED",
            "processname:game groupname:game expected:0",
        );
        input.push_str(&encode_frame(
            "PROCESS_STATE_FATAL",
            "processname:game groupname:game",
        ));
        let (result, output, triggered) = run_watcher(test_config(WatchSet::default()), input).await;

        result.unwrap();
        assert!(triggered);
        // Both frames acknowledged; the actuator's state machine keeps the
        // second trigger from re-running the command.
        assert_eq!(output, "READY\nRESULT 2\nOKREADY\nRESULT 2\nOKREADY\n");
    }

    #[tokio::test(start_paused = true)]
    async fn test_dry_run_acknowledges_every_frame() {
        // Divergence from older watchdogs that stayed silent in debug
        // mode: silence stalls the supervisor, so dry-run replies OK.
        let mut cfg = test_config(WatchSet::default());
        cfg.dry_run = true;

        let input = encode_frame(
            "PROCESS_STATE_EXITED",
            "processname:game groupname:game expected:0",
        );
        let (result, output, triggered) = run_watcher(cfg, input).await;

        result.unwrap();
        assert!(!triggered, "dry-run must never act");
        assert_eq!(output, "READY\nRESULT 2\nOKREADY\n");
    }

    #[tokio::test(start_paused = true)]
    async fn test_actuator_spawn_failure_still_acknowledges_ok() {
        let mut cfg = test_config(WatchSet::default());
        cfg.shutdown_command = vec!["/nonexistent/watchvisor-test-binary".to_string()];

        let input = encode_frame(
            "PROCESS_STATE_EXITED",
            "processname:game groupname:game expected:0",
        );
        let (result, output, triggered) = run_watcher(cfg, input).await;

        result.unwrap();
        assert!(triggered);
        assert_eq!(output, "READY\nRESULT 2\nOKREADY\n");
    }
}
