//! Event types for the bridge's stream-json output.

use serde::Deserialize;

/// Discriminator of a bridge event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Session metadata (carries `session_id`).
    System,
    /// A fragment of assistant output (text, thinking, or a tool call).
    Assistant,
    /// Turn terminator, successful or not.
    Result,
    /// Anything the engine does not recognize. Ignored.
    Unknown,
}

/// One fragment of the bridge's streamed output.
///
/// No field is guaranteed present even when `kind` implies it logically
/// should be; consumers treat absent text-bearing fields as empty.
#[derive(Debug, Clone, PartialEq)]
pub struct BridgeEvent {
    pub kind: EventKind,
    pub session_id: Option<String>,
    pub text: Option<String>,
    pub thinking: Option<String>,
    pub tool_name: Option<String>,
    pub tool_input: Option<serde_json::Value>,
    pub is_error: bool,
    pub result: Option<String>,
    pub request_id: Option<String>,
}

impl BridgeEvent {
    /// An empty event of the given kind. Fields are filled in by the parser
    /// or by test/builder code.
    pub fn of_kind(kind: EventKind) -> Self {
        Self {
            kind,
            session_id: None,
            text: None,
            thinking: None,
            tool_name: None,
            tool_input: None,
            is_error: false,
            result: None,
            request_id: None,
        }
    }

    /// Synthesize an error result event from a process termination message.
    ///
    /// Used by the transport when the bridge exits nonzero, so the failure
    /// surfaces in the transcript instead of as a process error.
    pub fn process_error(message: String) -> Self {
        Self {
            is_error: true,
            result: Some(message),
            ..Self::of_kind(EventKind::Result)
        }
    }
}

/// Raw wire record. Every field optional so malformed or partial events
/// deserialize instead of erroring.
#[derive(Deserialize)]
pub(crate) struct RawEvent {
    #[serde(rename = "type")]
    pub event_type: Option<String>,
    pub session_id: Option<String>,
    pub text: Option<String>,
    pub thinking: Option<String>,
    pub tool_name: Option<String>,
    pub tool_input: Option<serde_json::Value>,
    pub is_error: Option<bool>,
    pub result: Option<String>,
    pub request_id: Option<String>,
}
