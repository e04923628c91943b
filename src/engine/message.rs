//! Transcript data model: message ids, roles, content blocks, messages.

use chrono::{DateTime, Utc};
use std::fmt;

/// Identifier of a transcript message.
///
/// Two-part: a generation bumped on every engine reset, and a sequence
/// allocated monotonically within a generation. The sequence restarts at
/// zero on reset while the generation guarantees that ids from before a
/// reset are never reused and remain distinguishable from ids after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageId {
    generation: u32,
    seq: u64,
}

impl MessageId {
    pub(crate) fn new(generation: u32, seq: u64) -> Self {
        Self { generation, seq }
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m{}.{}", self.generation, self.seq)
    }
}

/// Who a transcript message is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Assistant,
    System,
    User,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Assistant => write!(f, "assistant"),
            Role::System => write!(f, "system"),
            Role::User => write!(f, "user"),
        }
    }
}

/// One typed content block within a message.
///
/// Immutable once created; a message's block list only grows by append.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageBlock {
    Text {
        content: String,
    },
    Thinking {
        content: String,
    },
    ToolUse {
        /// Optional text payload accompanying the tool event (usually empty);
        /// renderers display `tool_name`/`tool_input`.
        content: String,
        tool_name: String,
        tool_input: String,
    },
    Error {
        content: String,
    },
}

impl MessageBlock {
    /// The block's text payload, whatever the variant.
    pub fn content(&self) -> &str {
        match self {
            MessageBlock::Text { content }
            | MessageBlock::Thinking { content }
            | MessageBlock::ToolUse { content, .. }
            | MessageBlock::Error { content } => content,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, MessageBlock::Error { .. })
    }
}

/// One message of the transcript.
///
/// Owned by the transcript store once published; the assembler holds a
/// working copy of at most one unfinalized message at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub id: MessageId,
    pub role: Role,
    pub blocks: Vec<MessageBlock>,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub(crate) fn new(id: MessageId, role: Role) -> Self {
        Self {
            id,
            role,
            blocks: Vec::new(),
            timestamp: Utc::now(),
        }
    }
}
