//! # Event classification.
//!
//! [`EventKind`] sorts the supervisor's `eventname` identifiers into the
//! two terminal process states this watcher cares about plus a catch-all;
//! [`ProcessEvent`] is the classified record the decision engine consumes.
//!
//! Classification only touches the frame body for terminal kinds. Every
//! other event — state transitions, ticks, log chunks — is acknowledged and
//! dropped without validating its body, which may not even have the
//! `key:value` shape.
//!
//! ## Example
//! ```rust
//! use watchvisor::EventKind;
//!
//! assert_eq!(
//!     EventKind::from_name("PROCESS_STATE_EXITED"),
//!     EventKind::ProcessStateExited
//! );
//! assert_eq!(EventKind::from_name("TICK_5"), EventKind::Other);
//!
//! assert!(EventKind::ProcessStateFatal.is_terminal());
//! assert!(!EventKind::from_name("PROCESS_STATE_RUNNING").is_terminal());
//! ```

use crate::error::ProtocolError;
use crate::events::EventFrame;

/// Classification of a supervisor event's `eventname`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
    /// The process entered the FATAL state (gave up restarting it).
    ProcessStateFatal,

    /// The process exited (expectedly or not).
    ProcessStateExited,

    /// Any other supervisor event type. Still acknowledged, never acted on.
    Other,
}

impl EventKind {
    /// Classifies a raw `eventname` identifier.
    pub fn from_name(name: &str) -> Self {
        match name {
            "PROCESS_STATE_FATAL" => EventKind::ProcessStateFatal,
            "PROCESS_STATE_EXITED" => EventKind::ProcessStateExited,
            _ => EventKind::Other,
        }
    }

    /// Returns `true` for the terminal process states that can qualify for
    /// shutdown.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            EventKind::ProcessStateFatal | EventKind::ProcessStateExited
        )
    }
}

/// Classified view of one event frame.
#[derive(Clone, Debug)]
pub struct ProcessEvent {
    /// Event classification.
    pub kind: EventKind,

    /// The `processname` body field. Present exactly when `kind` is
    /// terminal; bodies of other kinds are never parsed.
    pub process: Option<String>,
}

impl ProcessEvent {
    /// Classifies a raw frame.
    ///
    /// For terminal kinds the body is parsed and must contain
    /// `processname`; a missing name or a malformed body token is a
    /// protocol fault. For all other kinds the body is left untouched.
    pub fn classify(frame: &EventFrame) -> Result<Self, ProtocolError> {
        let kind = EventKind::from_name(frame.eventname()?);
        if !kind.is_terminal() {
            return Ok(Self {
                kind,
                process: None,
            });
        }

        let fields = frame.body_fields()?;
        let process = fields
            .get("processname")
            .cloned()
            .ok_or(ProtocolError::MissingKey {
                key: "processname",
                section: "body",
            })?;
        Ok(Self {
            kind,
            process: Some(process),
        })
    }
}
