use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use watchvisor::{Config, WatchSet, Watcher};

/// Supervisor event-listener watchdog.
///
/// Listens for process lifecycle events on stdin and shuts the supervisor
/// down (after a grace period) when a watched process exits or goes FATAL.
/// With no process names given, every process is watched.
#[derive(Parser, Debug)]
#[command(name = "watchvisor", version)]
struct Cli {
    /// Process names to watch; empty means every process qualifies.
    processes: Vec<String>,

    /// Seconds to wait between a terminal event and the shutdown command.
    #[arg(long, default_value_t = 10)]
    grace_secs: u64,

    /// Consume and acknowledge frames without ever acting on them.
    #[arg(long)]
    dry_run: bool,

    /// Shutdown command; the first token is the program to spawn.
    #[arg(long, default_value = "supervisorctl shutdown")]
    shutdown_command: String,
}

impl Cli {
    fn into_config(self) -> Config {
        Config {
            watch: WatchSet::new(self.processes),
            grace: Duration::from_secs(self.grace_secs),
            dry_run: self.dry_run,
            shutdown_command: self
                .shutdown_command
                .split_whitespace()
                .map(str::to_string)
                .collect(),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Diagnostics go to stderr only: stdout is the protocol channel.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cfg = Cli::parse().into_config();

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut watcher = Watcher::new(cfg, stdin, tokio::io::stdout());
    if let Err(err) = watcher.run().await {
        tracing::error!(fault = err.as_label(), "watcher terminated: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert()
    }

    #[test]
    fn test_shutdown_command_is_split_on_whitespace() {
        let cli = Cli::parse_from(["watchvisor", "--shutdown-command", "supervisorctl shutdown"]);
        let cfg = cli.into_config();
        assert_eq!(cfg.shutdown_command, vec!["supervisorctl", "shutdown"]);
    }

    #[test]
    fn test_positional_processes_become_the_watch_set() {
        let cli = Cli::parse_from(["watchvisor", "game", "worker"]);
        let cfg = cli.into_config();
        assert!(cfg.watch.matches("game"));
        assert!(cfg.watch.matches("worker"));
        assert!(!cfg.watch.matches("sidecar"));
    }

    #[test]
    fn test_no_processes_means_watch_everything() {
        let cfg = Cli::parse_from(["watchvisor"]).into_config();
        assert!(cfg.watch.is_empty());
        assert!(cfg.watch.matches("anything"));
    }
}
