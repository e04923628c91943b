//! Events emitted by the stream thread and consumed by the TUI runtime.

use crate::engine::Snapshot;

/// Event payload rendered by the TUI.
#[derive(Debug, Clone)]
pub enum UiEvent {
    /// Fresh transcript snapshot after an engine mutation.
    Transcript(Snapshot),
    /// Session identifier announced by the bridge.
    SessionId(String),
    /// One-line status shown in the header.
    StatusLine(String),
    /// The bridge stream has ended; the view stays up until dismissed.
    StreamEnded,
}
