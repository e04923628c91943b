//! Mutable app state for the TUI renderer.

use std::sync::Arc;

use crate::engine::Snapshot;
use crate::ui::event::UiEvent;

/// Render state for the TUI.
#[derive(Debug, Clone)]
pub struct AppState {
    pub status_line: String,
    pub session_id: Option<String>,
    pub transcript: Snapshot,
    /// When `None`, the transcript auto-scrolls to the bottom.
    /// When `Some(offset)`, the user has pinned the scroll position.
    pub scroll: Option<usize>,
    /// Set once the bridge stream has ended.
    pub stream_ended: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            status_line: "Starting".to_string(),
            session_id: None,
            transcript: Arc::new(Vec::new()),
            scroll: None,
            stream_ended: false,
        }
    }
}

impl AppState {
    pub fn apply(&mut self, event: UiEvent) {
        match event {
            UiEvent::Transcript(snapshot) => {
                self.transcript = snapshot;
            }
            UiEvent::SessionId(session_id) => {
                self.session_id = Some(session_id);
            }
            UiEvent::StatusLine(line) => {
                self.status_line = line;
            }
            UiEvent::StreamEnded => {
                self.stream_ended = true;
            }
        }
    }

    /// Scroll the transcript up by `n` lines. Activates pinned scroll mode,
    /// disabling auto-scroll. When auto-scrolling, start from the given
    /// bottom offset so the first scroll-up moves up by `n` lines rather
    /// than jumping to the top.
    pub fn scroll_up(&mut self, n: usize, max_offset: usize) {
        let current = self.scroll.unwrap_or(max_offset);
        self.scroll = Some(current.saturating_sub(n));
    }

    /// Scroll the transcript down by `n` lines, capped at the bottom.
    /// Reaching the bottom resumes auto-scroll.
    pub fn scroll_down(&mut self, n: usize, max_offset: usize) {
        if let Some(offset) = self.scroll {
            let new = (offset + n).min(max_offset);
            if new >= max_offset {
                self.scroll = None;
            } else {
                self.scroll = Some(new);
            }
        }
        // If None (auto-scroll), down is a no-op — already at bottom.
    }

    /// Resume auto-scroll (follow the tail).
    pub fn scroll_to_bottom(&mut self) {
        self.scroll = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{ChatMessage, MessageId, Role};

    #[test]
    fn apply_updates_status_line() {
        let mut state = AppState::default();
        state.apply(UiEvent::StatusLine("Streaming".to_string()));
        assert_eq!(state.status_line, "Streaming");
    }

    #[test]
    fn apply_replaces_the_transcript_snapshot() {
        let mut state = AppState::default();
        let snapshot: Snapshot = Arc::new(vec![ChatMessage::new(
            MessageId::new(0, 0),
            Role::Assistant,
        )]);
        state.apply(UiEvent::Transcript(Arc::clone(&snapshot)));
        assert!(Arc::ptr_eq(&state.transcript, &snapshot));
    }

    #[test]
    fn apply_records_session_id_and_stream_end() {
        let mut state = AppState::default();
        state.apply(UiEvent::SessionId("s1".to_string()));
        state.apply(UiEvent::StreamEnded);
        assert_eq!(state.session_id.as_deref(), Some("s1"));
        assert!(state.stream_ended);
    }

    #[test]
    fn scroll_up_pins_from_auto_scroll() {
        let mut state = AppState::default();
        assert_eq!(state.scroll, None);

        state.scroll_up(5, 50);
        assert_eq!(state.scroll, Some(45));

        state.scroll_up(10, 50);
        assert_eq!(state.scroll, Some(35));

        // More than remaining saturates at the top.
        state.scroll_up(100, 50);
        assert_eq!(state.scroll, Some(0));
    }

    #[test]
    fn scroll_down_resumes_auto_scroll_at_the_bottom() {
        let mut state = AppState::default();
        state.scroll = Some(30);

        state.scroll_down(5, 40);
        assert_eq!(state.scroll, Some(35));

        state.scroll_down(5, 40);
        assert_eq!(state.scroll, None, "reaching the bottom resumes follow");

        // When already auto-scrolling, down is a no-op.
        state.scroll_down(10, 40);
        assert_eq!(state.scroll, None);
    }

    #[test]
    fn scroll_to_bottom_clears_the_pin() {
        let mut state = AppState::default();
        state.scroll = Some(12);
        state.scroll_to_bottom();
        assert_eq!(state.scroll, None);
    }
}
