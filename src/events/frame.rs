//! # Raw event frames.
//!
//! [`EventFrame`] is the unit the supervisor pushes over the notification
//! channel: a header mapping plus a body whose length the header declares.
//!
//! Both the header line and (for process-state events) the body are
//! space-separated `key:value` token lists. A token without the `:`
//! separator is a protocol fault. Body tokens are only ever parsed on
//! demand — most event kinds carry bodies this watcher never looks at, and
//! those may legally not conform to the `key:value` shape.

use std::collections::HashMap;

use crate::error::ProtocolError;

/// Splits `raw` into whitespace-separated `key:value` tokens.
///
/// Later duplicates overwrite earlier ones. `on_bad` builds the error for
/// a token with no `:` separator.
fn parse_pairs(
    raw: &str,
    on_bad: impl Fn(String) -> ProtocolError,
) -> Result<HashMap<String, String>, ProtocolError> {
    let mut map = HashMap::new();
    for token in raw.split_whitespace() {
        let (key, value) = token
            .split_once(':')
            .ok_or_else(|| on_bad(token.to_string()))?;
        map.insert(key.to_string(), value.to_string());
    }
    Ok(map)
}

/// One raw event notification, as read from the channel.
///
/// The header is fully parsed up front (the reader needs `len` from it);
/// the body stays raw until [`EventFrame::body_fields`] is called for a
/// kind that actually requires body fields.
#[derive(Clone, Debug)]
pub struct EventFrame {
    /// Parsed header tokens. No particular key set is assumed beyond
    /// `eventname` (classification) and `len` (consumed by the reader).
    pub header: HashMap<String, String>,

    /// Raw body, exactly `len` bytes as declared by the header.
    pub body: String,
}

impl EventFrame {
    /// Parses a header line into its token map.
    ///
    /// Fails with [`ProtocolError::MalformedHeader`] on a token without a
    /// `:` separator.
    pub fn parse_header(line: &str) -> Result<HashMap<String, String>, ProtocolError> {
        parse_pairs(line, |token| ProtocolError::MalformedHeader { token })
    }

    /// Returns the event kind identifier from the header.
    pub fn eventname(&self) -> Result<&str, ProtocolError> {
        self.header
            .get("eventname")
            .map(String::as_str)
            .ok_or(ProtocolError::MissingKey {
                key: "eventname",
                section: "header",
            })
    }

    /// Parses the body into its `key:value` token map.
    ///
    /// Fails with [`ProtocolError::MalformedBody`] on a token without a
    /// `:` separator. Only call this for event kinds whose bodies are
    /// documented to have this shape (process-state events).
    pub fn body_fields(&self) -> Result<HashMap<String, String>, ProtocolError> {
        parse_pairs(&self.body, |token| ProtocolError::MalformedBody { token })
    }
}
