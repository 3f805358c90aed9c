//! Filter conversations and messages before they are written.
//!
//! This module provides [`FilterConfig`] for defining filter criteria and
//! [`apply_filters`] for filtering a parsed conversation list.
//!
//! # Filter Types
//!
//! | Filter | Method | Description |
//! |--------|--------|-------------|
//! | Recent contacts | [`with_ignore_recent`](FilterConfig::with_ignore_recent) | Drop the `最近联系人` group |
//! | Empty content | [`with_ignore_empty`](FilterConfig::with_ignore_empty) | Drop messages whose content is `""` |
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use qqtable::core::filter::{FilterConfig, apply_filters};
//! use qqtable::{Conversation, Message};
//!
//! let ts = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(8, 0, 0).unwrap();
//! let conversations = vec![
//!     Conversation::new("好友", "Alice", vec![Message::new(ts, "Alice", ""), Message::new(ts, "Alice", "hi")]),
//!     Conversation::new("最近联系人", "Alice", vec![Message::new(ts, "Alice", "hi")]),
//! ];
//!
//! let config = FilterConfig::new().with_ignore_recent(true).with_ignore_empty(true);
//! let filtered = apply_filters(conversations, &config);
//!
//! assert_eq!(filtered.len(), 1);
//! assert_eq!(filtered[0].messages.len(), 1);
//! ```
//!
//! # Behavior Notes
//!
//! - Whitespace-only content is kept; only the empty string counts as empty
//! - A conversation whose every message is empty is kept (with no messages)
//! - Message order is never changed

use crate::config::Config;
use crate::{Conversation, Message};

/// Which conversations and messages to leave out of the output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterConfig {
    /// Drop messages whose content is empty.
    pub ignore_empty: bool,

    /// Drop the "recent contacts" pseudo-group.
    pub ignore_recent: bool,
}

impl FilterConfig {
    /// Creates a filter that lets everything through.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether empty messages are dropped.
    #[must_use]
    pub fn with_ignore_empty(mut self, ignore: bool) -> Self {
        self.ignore_empty = ignore;
        self
    }

    /// Sets whether the "recent contacts" group is dropped.
    #[must_use]
    pub fn with_ignore_recent(mut self, ignore: bool) -> Self {
        self.ignore_recent = ignore;
        self
    }

    /// Returns `true` if any filter is active.
    pub fn is_active(&self) -> bool {
        self.ignore_empty || self.ignore_recent
    }

    /// Returns `true` if `conversation` should be written.
    pub fn keeps_conversation(&self, conversation: &Conversation) -> bool {
        !(self.ignore_recent && conversation.is_recent_contacts())
    }

    /// Returns `true` if `message` should be written.
    pub fn keeps_message(&self, message: &Message) -> bool {
        !self.ignore_empty || message.has_content()
    }
}

impl From<&Config> for FilterConfig {
    fn from(config: &Config) -> Self {
        Self {
            ignore_empty: config.ignore_empty,
            ignore_recent: config.ignore_recent,
        }
    }
}

/// Filters parsed conversations based on the provided configuration.
///
/// If no filters are active, returns the input unchanged.
pub fn apply_filters(conversations: Vec<Conversation>, config: &FilterConfig) -> Vec<Conversation> {
    if !config.is_active() {
        return conversations;
    }

    conversations
        .into_iter()
        .filter(|c| config.keeps_conversation(c))
        .map(|mut c| {
            c.messages.retain(|m| config.keeps_message(m));
            c
        })
        .collect()
}
