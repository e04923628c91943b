//! The bridge-event aggregation engine.
//!
//! Folds the raw, fragmentary event stream into an ordered, append-only
//! transcript of structured messages. Pure in-process reducer: no I/O, no
//! panics on malformed input. Single-writer — an [`Engine`] value is owned
//! by exactly one thread and never invoked concurrently; snapshots handed
//! to other threads are immutable.

pub mod assembler;
pub mod block;
pub mod error_format;
pub mod filter;
pub mod message;
pub mod store;

use crate::bridge::event::{BridgeEvent, EventKind};

use assembler::Assembler;
pub use message::{ChatMessage, MessageBlock, MessageId, Role};
pub use store::{Snapshot, TranscriptStore};

/// One conversation's aggregation state.
///
/// Construct one per conversation (window, test, replay); instances share
/// nothing. The caller supplies the active request id before issuing a new
/// prompt and feeds every delivered event to [`Engine::handle_event`].
#[derive(Debug)]
pub struct Engine {
    assembler: Assembler,
    store: TranscriptStore,
    session_id: Option<String>,
    active_request: Option<String>,
}

impl Engine {
    pub fn new() -> Self {
        Self {
            assembler: Assembler::new(),
            store: TranscriptStore::new(),
            session_id: None,
            active_request: None,
        }
    }

    /// Set (or clear) the request id the conversation considers active.
    /// Compared against each event's `request_id` by the filter.
    pub fn set_active_request(&mut self, id: Option<String>) {
        self.active_request = id;
    }

    pub fn active_request(&self) -> Option<&str> {
        self.active_request.as_deref()
    }

    /// Session identifier most recently announced by a `system` event.
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    /// Current transcript snapshot. A new value is installed on every
    /// mutation, so `Arc::ptr_eq` detects change.
    pub fn transcript(&self) -> Snapshot {
        self.store.snapshot()
    }

    /// Monotonic store mutation counter.
    pub fn revision(&self) -> u64 {
        self.store.revision()
    }

    /// Fold one event into the transcript.
    ///
    /// Every path terminates in either a no-op or a well-defined store
    /// mutation; stale-request and unknown-type events are dropped with no
    /// observable effect.
    pub fn handle_event(&mut self, event: &BridgeEvent) {
        if !filter::accepts(event, self.active_request.as_deref()) {
            return;
        }

        match event.kind {
            EventKind::System => {
                // Side-channel only; no state-machine transition, no block.
                if let Some(session_id) = &event.session_id {
                    self.session_id = Some(session_id.clone());
                }
            }
            EventKind::Assistant => {
                let message = self.assembler.absorb(block::build(event));
                self.store.upsert(message);
            }
            EventKind::Result => {
                if event.is_error {
                    let raw = event.result.as_deref().unwrap_or_default();
                    let message = self
                        .assembler
                        .absorb_error(error_format::format_error(raw));
                    self.store.upsert(message);
                } else {
                    // A successful result is a pure turn terminator, not content.
                    self.assembler.finalize();
                }
            }
            EventKind::Unknown => {}
        }
    }

    /// Start a wholly new conversation: empty transcript, no open message,
    /// no session id, no active request. Message ids restart their sequence
    /// in a fresh generation so they never collide with pre-reset ids.
    pub fn reset(&mut self) {
        self.assembler.reset();
        self.store.reset();
        self.session_id = None;
        self.active_request = None;
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
