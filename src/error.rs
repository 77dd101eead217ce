//! Error types used by the watchvisor loop and its collaborators.
//!
//! This module defines three error enums:
//!
//! - [`ProtocolError`] — a frame could not be read or decoded per the
//!   supervisor event-notification protocol.
//! - [`ActuatorError`] — the external shutdown command could not be issued.
//! - [`WatchdogError`] — top-level faults that end the watcher with a
//!   non-zero exit status.
//!
//! All types provide an `as_label` helper returning a short stable
//! snake_case tag for log fields.

use thiserror::Error;

/// # Faults in the supervisor event-notification protocol.
///
/// Raised while reading or decoding a single frame. Per protocol rules the
/// faulty frame is still acknowledged (with `FAIL`), after which the watcher
/// terminates: a desynchronized event channel cannot be recovered.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// A header token did not contain the `:` separator.
    #[error("malformed header token {token:?}: missing `:` separator")]
    MalformedHeader {
        /// The offending token, verbatim.
        token: String,
    },

    /// A body token did not contain the `:` separator.
    #[error("malformed body token {token:?}: missing `:` separator")]
    MalformedBody {
        /// The offending token, verbatim.
        token: String,
    },

    /// A key the protocol requires was absent.
    #[error("missing required {section} key {key:?}")]
    MissingKey {
        /// The absent key.
        key: &'static str,
        /// Which frame section was searched (`"header"` or `"body"`).
        section: &'static str,
    },

    /// The header's `len` field was not a valid byte count.
    #[error("header declares invalid body length {value:?}")]
    InvalidLength {
        /// The raw `len` value, verbatim.
        value: String,
    },

    /// The body bytes were not valid UTF-8.
    #[error("event body is not valid utf-8: {0}")]
    BodyNotUtf8(#[from] std::string::FromUtf8Error),

    /// The event channel failed mid-frame (includes truncated bodies).
    #[error("i/o failure on event channel: {0}")]
    Io(#[from] std::io::Error),
}

impl ProtocolError {
    /// Returns a short stable label (snake_case) for use in log fields.
    pub fn as_label(&self) -> &'static str {
        match self {
            ProtocolError::MalformedHeader { .. } => "malformed_header",
            ProtocolError::MalformedBody { .. } => "malformed_body",
            ProtocolError::MissingKey { .. } => "missing_key",
            ProtocolError::InvalidLength { .. } => "invalid_length",
            ProtocolError::BodyNotUtf8(_) => "body_not_utf8",
            ProtocolError::Io(_) => "channel_io",
        }
    }
}

/// # Faults while issuing the external shutdown command.
///
/// These are logged but never escalated: once the actuator fires, the
/// watcher's purpose is fulfilled and the event channel is expected to
/// close imminently either way.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ActuatorError {
    /// The configured shutdown command had no tokens.
    #[error("shutdown command is empty")]
    EmptyCommand,

    /// The shutdown command could not be spawned.
    #[error("failed to spawn shutdown command {command:?}: {source}")]
    Spawn {
        /// The command line that failed to spawn.
        command: String,
        /// The underlying spawn error.
        #[source]
        source: std::io::Error,
    },
}

impl ActuatorError {
    /// Returns a short stable label (snake_case) for use in log fields.
    pub fn as_label(&self) -> &'static str {
        match self {
            ActuatorError::EmptyCommand => "actuator_empty_command",
            ActuatorError::Spawn { .. } => "actuator_spawn",
        }
    }
}

/// # Terminal faults of the watcher loop.
///
/// Any of these ends the process with a non-zero exit status, after a
/// best-effort `FAIL` reply for the frame being processed. A clean close of
/// the event channel is *not* an error; the loop returns `Ok(())` for it.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum WatchdogError {
    /// A frame could not be read or decoded.
    #[error("protocol fault: {0}")]
    Protocol(#[from] ProtocolError),

    /// The acknowledgement channel itself failed; no reply could be sent.
    #[error("i/o failure on acknowledgement channel: {0}")]
    Ack(#[source] std::io::Error),
}

impl WatchdogError {
    /// Returns a short stable label (snake_case) for use in log fields.
    pub fn as_label(&self) -> &'static str {
        match self {
            WatchdogError::Protocol(e) => e.as_label(),
            WatchdogError::Ack(_) => "ack_channel",
        }
    }
}
