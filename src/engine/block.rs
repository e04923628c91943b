//! Maps one event's content fields to at most one typed content block.

use crate::bridge::event::BridgeEvent;
use crate::engine::message::MessageBlock;

/// Build the content block an assistant event carries, if any.
///
/// Field precedence, first match wins: `thinking`, then `tool_name`, then
/// non-empty `text`. An event is expected to carry at most one of these,
/// but the order keeps the outcome deterministic when more than one is
/// present. Empty strings count as absent. Returns `None` for pure
/// metadata carriers.
pub fn build(event: &BridgeEvent) -> Option<MessageBlock> {
    if let Some(thinking) = non_empty(&event.thinking) {
        return Some(MessageBlock::Thinking {
            content: thinking.to_string(),
        });
    }

    if let Some(tool_name) = non_empty(&event.tool_name) {
        return Some(MessageBlock::ToolUse {
            content: event.text.clone().unwrap_or_default(),
            tool_name: tool_name.to_string(),
            tool_input: input_text(&event.tool_input),
        });
    }

    if let Some(text) = non_empty(&event.text) {
        return Some(MessageBlock::Text {
            content: text.to_string(),
        });
    }

    None
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

/// Render a tool input value as display text: strings pass through, other
/// JSON values are compact-serialized, absent input is empty.
fn input_text(input: &Option<serde_json::Value>) -> String {
    match input {
        None => String::new(),
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(value) => value.to_string(),
    }
}
