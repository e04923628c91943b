//! NDJSON line parser for the bridge's stream output.

use anyhow::Result;

use super::event::{BridgeEvent, EventKind, RawEvent};

/// Parse a single line of NDJSON into a bridge event.
///
/// Blank lines yield `Ok(None)`. Non-JSON lines propagate the parse error;
/// callers skip such lines rather than aborting the stream.
pub fn parse_line(line: &str) -> Result<Option<BridgeEvent>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let raw: RawEvent = serde_json::from_str(line)?;
    Ok(Some(from_raw(raw)))
}

fn from_raw(raw: RawEvent) -> BridgeEvent {
    let kind = match raw.event_type.as_deref() {
        Some("system") => EventKind::System,
        Some("assistant") => EventKind::Assistant,
        Some("result") => EventKind::Result,
        _ => EventKind::Unknown,
    };

    BridgeEvent {
        kind,
        session_id: raw.session_id,
        text: raw.text,
        thinking: raw.thinking,
        tool_name: raw.tool_name,
        tool_input: raw.tool_input,
        is_error: raw.is_error.unwrap_or(false),
        result: raw.result,
        request_id: raw.request_id,
    }
}
