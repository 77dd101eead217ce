//! Watcher core: the event loop and the shutdown actuator.
//!
//! Internal modules:
//! - [`watcher`]: the read → classify → decide → act → acknowledge cycle;
//! - [`actuator`]: one-shot grace delay + external shutdown command.

mod actuator;
mod watcher;

pub use actuator::ShutdownActuator;
pub use watcher::Watcher;
