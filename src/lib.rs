//! # watchvisor
//!
//! **Watchvisor** is a watchdog for supervisor-managed process groups.
//!
//! It runs as an event-listener child of a process supervisor, consumes
//! lifecycle event frames from the supervisor's notification channel, and
//! when a watched process reaches a terminal state (`PROCESS_STATE_FATAL`
//! or `PROCESS_STATE_EXITED`), waits a grace period and then tells the
//! supervisor itself to shut down. The point is to tear the whole managed
//! environment down when its critical workload dies, instead of leaving a
//! half-alive container or host behind.
//!
//! ## Architecture
//! ```text
//!  supervisor ──(stdin: header line + body)──► FrameReader
//!                                                  │
//!                                                  ▼
//!                                            EventFrame ──► ProcessEvent
//!                                                  │       (classify kind,
//!                                                  │        processname)
//!                                                  ▼
//!                                     is_shutdown_qualifying(kind,
//!                                         processname, WatchSet)
//!                                                  │
//!                                     true         │        false
//!                        ┌─────────────────────────┴───────────┐
//!                        ▼                                     ▼
//!               ShutdownActuator                          (no action)
//!               NotTriggered → Triggered                       │
//!               sleep(grace), spawn                            │
//!               shutdown command once                          │
//!                        └─────────────────┬───────────────────┘
//!                                          ▼
//!  supervisor ◄──(stdout: READY / RESULT n\nOK|FAIL)── AckWriter
//! ```
//!
//! The loop is strictly synchronous: one frame is read, classified, acted
//! upon, and acknowledged before the next frame is read. Every frame gets
//! exactly one reply; an unacknowledged frame would stall the supervisor's
//! event channel.
//!
//! ## Protocol
//! The listener side of the supervisor event-notification protocol:
//! - write `READY\n`, then block on a header line of space-separated
//!   `key:value` tokens (`eventname`, `len`, ...);
//! - read exactly `len` body bytes;
//! - reply `RESULT 2\nOK` or `RESULT 4\nFAIL`.
//!
//! A protocol fault (malformed frame, missing key, truncated body) is
//! answered with `FAIL` and ends the watcher with a non-zero exit so the
//! supervisor can restart or flag it. A clean close of the channel ends the
//! watcher with exit 0.
//!
//! ## Example
//! ```no_run
//! use std::time::Duration;
//! use watchvisor::{Config, WatchSet, Watcher};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), watchvisor::WatchdogError> {
//!     let cfg = Config {
//!         watch: WatchSet::new(["game"]),
//!         grace: Duration::from_secs(10),
//!         ..Config::default()
//!     };
//!
//!     let stdin = tokio::io::BufReader::new(tokio::io::stdin());
//!     let mut watcher = Watcher::new(cfg, stdin, tokio::io::stdout());
//!     watcher.run().await
//! }
//! ```

mod config;
mod core;
mod error;
mod events;
mod protocol;
mod watch;

pub use config::Config;
pub use self::core::{ShutdownActuator, Watcher};
pub use error::{ActuatorError, ProtocolError, WatchdogError};
pub use events::{EventFrame, EventKind, ProcessEvent};
pub use protocol::{AckWriter, FrameReader};
pub use watch::{is_shutdown_qualifying, WatchSet};
