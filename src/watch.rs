//! # Watch-list and the shutdown decision.
//!
//! [`WatchSet`] is the immutable process-name filter supplied at startup;
//! [`is_shutdown_qualifying`] is the pure decision function combining an
//! event's kind and process name with the filter. No I/O, no side effects —
//! the decision is testable in complete isolation from the protocol loop.
//!
//! ## Example
//! ```rust
//! use watchvisor::{is_shutdown_qualifying, EventKind, WatchSet};
//!
//! let watch = WatchSet::new(["game"]);
//! assert!(is_shutdown_qualifying(EventKind::ProcessStateExited, "game", &watch));
//! assert!(!is_shutdown_qualifying(EventKind::ProcessStateExited, "sidecar", &watch));
//!
//! // An empty set watches everything.
//! let all = WatchSet::default();
//! assert!(is_shutdown_qualifying(EventKind::ProcessStateFatal, "anything", &all));
//! assert!(!is_shutdown_qualifying(EventKind::Other, "anything", &all));
//! ```

use std::collections::HashSet;

use crate::events::EventKind;

/// Immutable set of watched process names.
///
/// The empty set is the "watch everything" wildcard: with no names
/// configured, every process name matches.
#[derive(Clone, Debug, Default)]
pub struct WatchSet {
    names: HashSet<String>,
}

impl WatchSet {
    /// Builds a watch set from the given process names.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns `true` if no names are configured (wildcard mode).
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Returns `true` if `process` passes the filter.
    ///
    /// An empty set matches any name; otherwise the name must be present.
    pub fn matches(&self, process: &str) -> bool {
        self.names.is_empty() || self.names.contains(process)
    }
}

/// Decides whether an event warrants shutting the supervisor down.
///
/// Returns `true` iff `kind` is a terminal process state
/// ([`EventKind::ProcessStateFatal`] or [`EventKind::ProcessStateExited`])
/// *and* `process` passes the watch filter. Everything else — recognized
/// but irrelevant kinds, terminal events for unwatched processes — returns
/// `false`.
pub fn is_shutdown_qualifying(kind: EventKind, process: &str, watch: &WatchSet) -> bool {
    kind.is_terminal() && watch.matches(process)
}
