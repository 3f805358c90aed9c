//! A conversation: one contact or chat room and its messages.

use serde::{Deserialize, Serialize};

use crate::Message;

/// Reserved group label of the "recent contacts" pseudo-conversation list.
pub const RECENT_CONTACTS_GROUP: &str = "最近联系人";

/// All messages exchanged with one contact or chat room, in parse order.
///
/// The parser only produces conversations with at least one message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    /// Grouping label from the `消息分组:` line (contact category).
    pub group: String,

    /// Contact or chat room from the `消息对象:` line.
    pub name: String,

    /// Messages in the order they appear in the export.
    pub messages: Vec<Message>,
}

impl Conversation {
    /// Creates a conversation.
    pub fn new(group: impl Into<String>, name: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
            messages,
        }
    }

    /// Returns the group label.
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Returns the contact or chat room name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the messages.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Returns the number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns `true` if there are no messages.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Returns `true` if this is the "recent contacts" pseudo-group.
    pub fn is_recent_contacts(&self) -> bool {
        self.group == RECENT_CONTACTS_GROUP
    }
}
