//! # Watcher configuration.
//!
//! Provides [`Config`], the settings the watcher is constructed from.
//!
//! Everything is explicit here — including dry-run mode, which is a plain
//! field rather than an ambient environment toggle, so the loop's behavior
//! is fully determined by the value passed to `Watcher::new`.

use std::time::Duration;

use crate::watch::WatchSet;

/// Configuration for a [`Watcher`](crate::Watcher).
///
/// ## Field semantics
/// - `watch`: process names whose terminal events trigger shutdown
///   (empty set = every process qualifies)
/// - `grace`: delay between a qualifying event and the shutdown command
/// - `dry_run`: consume and acknowledge frames without classifying or
///   acting on them
/// - `shutdown_command`: argv of the external shutdown command; the first
///   token is the program to spawn
#[derive(Clone, Debug)]
pub struct Config {
    /// Watch-list filter applied to `processname` in event bodies.
    pub watch: WatchSet,

    /// Delay between a qualifying terminal event and the shutdown command,
    /// allowing in-flight work to settle.
    pub grace: Duration,

    /// When set, frames are read and acknowledged `OK` but never acted on.
    pub dry_run: bool,

    /// External shutdown command, as argv tokens.
    pub shutdown_command: Vec<String>,
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `watch` = empty (every process qualifies)
    /// - `grace` = 10s
    /// - `dry_run` = false
    /// - `shutdown_command` = `supervisorctl shutdown`
    fn default() -> Self {
        Self {
            watch: WatchSet::default(),
            grace: Duration::from_secs(10),
            dry_run: false,
            shutdown_command: vec!["supervisorctl".to_string(), "shutdown".to_string()],
        }
    }
}
