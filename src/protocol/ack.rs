//! # Acknowledgement writer for the event channel.
//!
//! [`AckWriter`] emits the listener-side protocol tokens: `READY` before a
//! frame is awaited, `RESULT n\n<payload>` after a frame is processed.
//! Every write is flushed immediately — the supervisor blocks on these
//! tokens, and a reply sitting in a buffer is a reply never sent.

use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Writes protocol acknowledgements to the supervisor.
///
/// Generic over any async writer so tests can capture the reply bytes
/// instead of using the real stdout.
pub struct AckWriter<W> {
    output: W,
}

impl<W: AsyncWrite + Unpin> AckWriter<W> {
    /// Wraps the given output stream.
    pub fn new(output: W) -> Self {
        Self { output }
    }

    /// Signals readiness to receive the next frame.
    pub async fn ready(&mut self) -> std::io::Result<()> {
        self.output.write_all(b"READY\n").await?;
        self.output.flush().await
    }

    /// Acknowledges the current frame as successfully processed.
    pub async fn ok(&mut self) -> std::io::Result<()> {
        self.result("OK").await
    }

    /// Rejects the current frame after an internal fault.
    pub async fn fail(&mut self) -> std::io::Result<()> {
        self.result("FAIL").await
    }

    async fn result(&mut self, payload: &str) -> std::io::Result<()> {
        let reply = format!("RESULT {}\n{}", payload.len(), payload);
        self.output.write_all(reply.as_bytes()).await?;
        self.output.flush().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ready_token() {
        let mut out = std::io::Cursor::new(Vec::new());
        AckWriter::new(&mut out).ready().await.unwrap();
        assert_eq!(out.into_inner(), b"READY\n");
    }

    #[tokio::test]
    async fn test_ok_and_fail_results() {
        let mut out = std::io::Cursor::new(Vec::new());
        let mut ack = AckWriter::new(&mut out);
        ack.ok().await.unwrap();
        ack.fail().await.unwrap();
        assert_eq!(out.into_inner(), b"RESULT 2\nOKRESULT 4\nFAIL");
    }
}
