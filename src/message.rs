//! Chat message type and its in-progress builder.
//!
//! A [`Message`] is immutable once parsed. While the parser is still reading
//! body lines it owns a [`MessageBuilder`], which is turned into a `Message`
//! exactly once by [`MessageBuilder::finish`].
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use qqtable::message::{BodyJoin, MessageBuilder};
//!
//! let ts = NaiveDate::from_ymd_opt(2023, 1, 5)
//!     .unwrap()
//!     .and_hms_opt(9, 30, 0)
//!     .unwrap();
//!
//! let mut builder = MessageBuilder::new(ts, "Alice");
//! builder.push_line("hello", BodyJoin::Newline);
//! builder.push_line("world", BodyJoin::Newline);
//!
//! let msg = builder.finish();
//! assert_eq!(msg.sender(), "Alice");
//! assert_eq!(msg.content(), "hello\nworld");
//! ```

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// How consecutive body lines are joined into message content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BodyJoin {
    /// Keep line boundaries: lines are separated by `\n`.
    #[default]
    Newline,
    /// Concatenate lines with no separator.
    Concat,
}

impl BodyJoin {
    /// Maps the `MultiLines` configuration flag onto a join mode.
    pub fn from_multi_lines(multi_lines: bool) -> Self {
        if multi_lines {
            BodyJoin::Newline
        } else {
            BodyJoin::Concat
        }
    }
}

/// A single parsed chat message.
///
/// # Fields
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `timestamp` | `NaiveDateTime` | Local time from the header line |
/// | `sender` | `String` | Rest of the header line after the timestamp |
/// | `content` | `String` | Body text, never ending in `\r` or `\n` |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// When the message was sent, as written in the export (no time zone).
    pub timestamp: NaiveDateTime,

    /// Display name of the sender.
    pub sender: String,

    /// Message body. May contain interior newlines in multi-line mode.
    pub content: String,
}

impl Message {
    /// Creates a message, trimming trailing line terminators from `content`.
    pub fn new(
        timestamp: NaiveDateTime,
        sender: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        let mut content = content.into();
        trim_line_terminators(&mut content);
        Self {
            timestamp,
            sender: sender.into(),
            content,
        }
    }

    /// Returns the timestamp.
    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Returns the sender name.
    pub fn sender(&self) -> &str {
        &self.sender
    }

    /// Returns the message content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns `true` if the content is not the empty string.
    ///
    /// Whitespace-only content still counts as content.
    pub fn has_content(&self) -> bool {
        !self.content.is_empty()
    }
}

/// Accumulates the body of a message while its lines are being read.
#[derive(Debug, Clone)]
pub struct MessageBuilder {
    timestamp: NaiveDateTime,
    sender: String,
    body: String,
}

impl MessageBuilder {
    /// Starts a message from a parsed header line.
    pub fn new(timestamp: NaiveDateTime, sender: impl Into<String>) -> Self {
        Self {
            timestamp,
            sender: sender.into(),
            body: String::new(),
        }
    }

    /// Appends one body line.
    pub fn push_line(&mut self, line: &str, join: BodyJoin) {
        self.body.push_str(line);
        if join == BodyJoin::Newline {
            self.body.push('\n');
        }
    }

    /// Returns the sender of the message being built.
    pub fn sender(&self) -> &str {
        &self.sender
    }

    /// Finishes the message, stripping trailing `\r`/`\n` from the body.
    pub fn finish(self) -> Message {
        Message::new(self.timestamp, self.sender, self.body)
    }
}

fn trim_line_terminators(s: &mut String) {
    let len = s.trim_end_matches(['\r', '\n']).len();
    s.truncate(len);
}
