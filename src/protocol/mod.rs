//! Listener side of the supervisor event-notification protocol.
//!
//! ## Contents
//! - [`FrameReader`] — blocks for one complete frame per call
//! - [`AckWriter`] — writes the mandated `READY` / `RESULT` replies
//!
//! ## Wire format
//! ```text
//! listener ──► READY\n
//! supervisor ──► ver:3.0 ... eventname:PROCESS_STATE_EXITED len:54\n
//! supervisor ──► processname:game groupname:game ... (exactly 54 bytes)
//! listener ──► RESULT 2\nOK          (or RESULT 4\nFAIL)
//! ```
//!
//! The exchange is strictly one frame in flight: a frame is fully read and
//! fully replied to before the next `READY` goes out.

mod ack;
mod reader;

pub use ack::AckWriter;
pub use reader::FrameReader;
