//! Record parser for QQ chat history text exports.
//!
//! The export is a flat text file. After a two-line preamble it repeats the
//! following block for every conversation:
//!
//! ```text
//! ================================================================
//! 消息分组:我的好友
//! ================================================================
//! 消息对象:Alice
//! ================================================================
//!
//! 2023-01-05 9:30:00 Alice
//! hello
//! world
//! ```
//!
//! Separator lines cycle a three-state [`Phase`]. A separator seen while
//! waiting for a block start closes the previous conversation; the next two
//! sections hold the group and subject labels; everything after the third
//! separator is message headers and body lines.
//!
//! # Example
//!
//! ```rust
//! use qqtable::parser::RecordParser;
//!
//! let export = "消息记录\n\n\
//! ================================================================\n\
//! 消息分组:Friends\n\
//! ================================================================\n\
//! 消息对象:Alice\n\
//! ================================================================\n\
//! 2023-01-05 9:30:00 Alice\n\
//! hello\n";
//!
//! let conversations = RecordParser::new().parse_str(export)?;
//! assert_eq!(conversations.len(), 1);
//! assert_eq!(conversations[0].name, "Alice");
//! assert_eq!(conversations[0].messages[0].content, "hello");
//! # Ok::<(), qqtable::QqTableError>(())
//! ```

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::mem;
use std::path::Path;
use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::conversation::Conversation;
use crate::error::{QqTableError, Result};
use crate::message::{BodyJoin, Message, MessageBuilder};

/// Block separator line: 64 `=` characters.
pub const SEPARATOR: &str = "================================================================";

/// Prefix of the group label line.
pub const GROUP_LABEL: &str = "消息分组:";

/// Prefix of the subject (contact or chat room) label line.
pub const SUBJECT_LABEL: &str = "消息对象:";

/// Number of leading lines skipped before parsing begins.
pub const PREAMBLE_LINES: usize = 2;

/// `YYYY-MM-DD H:MM:SS Sender`, hour with one or two digits.
static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<time>(?P<year>[0-9]{4})-(?P<month>[0-9]{2})-(?P<day>[0-9]{2}) (?P<hour>[0-9]{1,2}):(?P<minute>[0-9]{2}):(?P<second>[0-9]{2})) (?P<sender>.+)$",
    )
    .unwrap()
});

/// Position in the separator cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Reading message lines; the next separator opens a new block.
    #[default]
    AwaitingBlockStart,
    /// The next line should be a `消息分组:` label.
    AwaitingGroupLabel,
    /// The next line should be a `消息对象:` label.
    AwaitingSubjectLabel,
}

impl Phase {
    /// Returns the phase following a separator line.
    pub fn advance(self) -> Self {
        match self {
            Phase::AwaitingBlockStart => Phase::AwaitingGroupLabel,
            Phase::AwaitingGroupLabel => Phase::AwaitingSubjectLabel,
            Phase::AwaitingSubjectLabel => Phase::AwaitingBlockStart,
        }
    }
}

/// Which label a malformed line should have been.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabelKind {
    /// `消息分组:`
    Group,
    /// `消息对象:`
    Subject,
}

impl LabelKind {
    /// Returns the expected line prefix.
    pub fn prefix(self) -> &'static str {
        match self {
            LabelKind::Group => GROUP_LABEL,
            LabelKind::Subject => SUBJECT_LABEL,
        }
    }
}

impl fmt::Display for LabelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelKind::Group => write!(f, "group label"),
            LabelKind::Subject => write!(f, "subject label"),
        }
    }
}

/// A non-fatal problem found while parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// 1-based line number in the export, preamble included.
    pub line: usize,
    /// The label that was expected on this line.
    pub expected: LabelKind,
    /// The actual line text.
    pub text: String,
}

impl Diagnostic {
    /// Creates a diagnostic.
    pub fn new(line: usize, expected: LabelKind, text: impl Into<String>) -> Self {
        Self {
            line,
            expected,
            text: text.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}: expected {} ({}), found '{}'",
            self.line,
            self.expected,
            self.expected.prefix(),
            self.text
        )
    }
}

/// Receives diagnostics as the parser finds them.
pub trait DiagnosticSink {
    /// Reports one diagnostic. Parsing continues afterwards.
    fn report(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Sink that logs every diagnostic as a `tracing` warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        tracing::warn!(
            line = diagnostic.line,
            expected = %diagnostic.expected,
            text = %diagnostic.text,
            "malformed label line"
        );
    }
}

/// Parser for QQ text exports.
///
/// The parser itself is stateless; all parse state lives inside a single
/// call.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordParser {
    join: BodyJoin,
}

impl RecordParser {
    /// Creates a parser that keeps line breaks between body lines.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser honouring the `MultiLines` setting of `config`.
    pub fn with_config(config: &Config) -> Self {
        Self::with_body_join(config.body_join())
    }

    /// Creates a parser with an explicit body join mode.
    pub fn with_body_join(join: BodyJoin) -> Self {
        Self { join }
    }

    /// Returns the body join mode.
    pub fn body_join(&self) -> BodyJoin {
        self.join
    }

    /// Parses the export at `path`, logging diagnostics.
    pub fn parse(&self, path: &Path) -> Result<Vec<Conversation>> {
        self.parse_with(path, &mut LogSink)
    }

    /// Parses the export at `path`, sending diagnostics to `sink`.
    pub fn parse_with(
        &self,
        path: &Path,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<Vec<Conversation>> {
        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => QqTableError::input_not_found(path),
            _ => QqTableError::Io(e),
        })?;

        let mut reader = BufReader::new(file);
        skip_preamble(&mut reader)?;

        let mut state = ParseState::new(self.join);
        for (idx, line) in reader.lines().enumerate() {
            state.feed(PREAMBLE_LINES + idx + 1, &line?, sink)?;
        }
        Ok(state.finish())
    }

    /// Parses export content held in memory, logging diagnostics.
    pub fn parse_str(&self, content: &str) -> Result<Vec<Conversation>> {
        self.parse_lines(content.lines(), &mut LogSink)
    }

    /// Parses export content held in memory, sending diagnostics to `sink`.
    pub fn parse_str_with(
        &self,
        content: &str,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<Vec<Conversation>> {
        self.parse_lines(content.lines(), sink)
    }

    /// Parses a sequence of lines, the first two of which are the preamble.
    pub fn parse_lines<I, S>(
        &self,
        lines: I,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<Vec<Conversation>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut state = ParseState::new(self.join);
        for (idx, line) in lines.into_iter().enumerate().skip(PREAMBLE_LINES) {
            state.feed(idx + 1, line.as_ref(), sink)?;
        }
        Ok(state.finish())
    }
}

/// Consumes the preamble as raw bytes; its encoding is never checked.
fn skip_preamble(reader: &mut impl BufRead) -> io::Result<()> {
    let mut skipped = Vec::new();
    for _ in 0..PREAMBLE_LINES {
        skipped.clear();
        if reader.read_until(b'\n', &mut skipped)? == 0 {
            break;
        }
    }
    Ok(())
}

/// Mutable state of one parse call.
struct ParseState {
    join: BodyJoin,
    phase: Phase,
    group: String,
    name: String,
    current: Option<MessageBuilder>,
    pending: Vec<Message>,
    conversations: Vec<Conversation>,
}

impl ParseState {
    fn new(join: BodyJoin) -> Self {
        Self {
            join,
            phase: Phase::default(),
            group: String::new(),
            name: String::new(),
            current: None,
            pending: Vec::new(),
            conversations: Vec::new(),
        }
    }

    fn feed(&mut self, line_no: usize, line: &str, sink: &mut dyn DiagnosticSink) -> Result<()> {
        if line == SEPARATOR {
            if self.phase == Phase::AwaitingBlockStart {
                self.close_conversation();
            }
            self.phase = self.phase.advance();
            return Ok(());
        }

        match self.phase {
            Phase::AwaitingGroupLabel => match line.strip_prefix(GROUP_LABEL) {
                Some(group) => self.group = group.to_string(),
                None => sink.report(Diagnostic::new(line_no, LabelKind::Group, line)),
            },
            Phase::AwaitingSubjectLabel => match line.strip_prefix(SUBJECT_LABEL) {
                Some(name) => self.name = name.to_string(),
                None => sink.report(Diagnostic::new(line_no, LabelKind::Subject, line)),
            },
            Phase::AwaitingBlockStart => self.feed_body(line_no, line)?,
        }
        Ok(())
    }

    fn feed_body(&mut self, line_no: usize, line: &str) -> Result<()> {
        if let Some(caps) = HEADER_RE.captures(line) {
            let timestamp = header_timestamp(&caps, line_no)?;
            self.flush_message();
            self.current = Some(MessageBuilder::new(timestamp, &caps["sender"]));
        } else if let Some(current) = self.current.as_mut() {
            current.push_line(line, self.join);
        } else {
            tracing::trace!(line = line_no, "discarding line before first header");
        }
        Ok(())
    }

    fn flush_message(&mut self) {
        if let Some(builder) = self.current.take() {
            tracing::trace!(sender = builder.sender(), "message complete");
            self.pending.push(builder.finish());
        }
    }

    fn close_conversation(&mut self) {
        self.flush_message();
        if self.pending.is_empty() {
            return;
        }
        let messages = mem::take(&mut self.pending);
        tracing::debug!(
            group = %self.group,
            name = %self.name,
            messages = messages.len(),
            "parsed conversation"
        );
        self.conversations
            .push(Conversation::new(self.group.clone(), self.name.clone(), messages));
    }

    fn finish(mut self) -> Vec<Conversation> {
        self.close_conversation();
        self.conversations
    }
}

/// Builds the timestamp of a header match, rejecting out-of-range values.
fn header_timestamp(caps: &Captures<'_>, line_no: usize) -> Result<NaiveDateTime> {
    let invalid = || QqTableError::invalid_timestamp(line_no, &caps["time"]);
    let number = |name: &str| caps[name].parse::<u32>().map_err(|_| invalid());

    let year = caps["year"].parse::<i32>().map_err(|_| invalid())?;
    let (month, day) = (number("month")?, number("day")?);
    let (hour, minute, second) = (number("hour")?, number("minute")?, number("second")?);

    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, second))
        .ok_or_else(invalid)
}
