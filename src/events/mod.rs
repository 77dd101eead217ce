//! Event model: raw frames and their classification.
//!
//! ## Contents
//! - [`EventFrame`] — raw header map + body string, one per protocol read
//! - [`EventKind`], [`ProcessEvent`] — classified view used by the
//!   shutdown decision
//!
//! Frames are ephemeral: the reader produces one, the watcher classifies
//! it, decides, acknowledges, and drops it before the next read.

mod event;
mod frame;

pub use event::{EventKind, ProcessEvent};
pub use frame::EventFrame;
