//! Append-only transcript store with snapshot semantics.

use std::sync::Arc;

use crate::engine::message::{ChatMessage, MessageId};

/// Immutable view of the transcript at one point in time.
///
/// The store installs a freshly-allocated vector on every mutation, so
/// consumers can detect change with `Arc::ptr_eq` (reference equality)
/// instead of diffing contents.
pub type Snapshot = Arc<Vec<ChatMessage>>;

/// The ordered sequence of finalized-or-in-progress messages.
///
/// Mutated only by the assembler's owner; read by rendering through
/// [`Snapshot`]s. The sequence is monotonically increasing in length: a
/// message is appended once and thereafter replaced in place by id.
#[derive(Debug)]
pub struct TranscriptStore {
    messages: Snapshot,
    revision: u64,
}

impl TranscriptStore {
    pub fn new() -> Self {
        Self {
            messages: Arc::new(Vec::new()),
            revision: 0,
        }
    }

    /// Replace the message with the same id, or append if absent.
    ///
    /// Always produces a new snapshot value, never mutating the previous
    /// one in place.
    pub fn upsert(&mut self, message: ChatMessage) {
        let mut next: Vec<ChatMessage> = self.messages.as_ref().clone();
        match next.iter_mut().find(|m| m.id == message.id) {
            Some(slot) => *slot = message,
            None => next.push(message),
        }
        self.messages = Arc::new(next);
        self.revision += 1;
    }

    /// Clear the sequence. The revision keeps counting so consumers still
    /// observe the clear as a change.
    pub fn reset(&mut self) {
        self.messages = Arc::new(Vec::new());
        self.revision += 1;
    }

    pub fn snapshot(&self) -> Snapshot {
        Arc::clone(&self.messages)
    }

    /// Monotonic mutation counter, incremented on every upsert and reset.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn get(&self, id: MessageId) -> Option<&ChatMessage> {
        self.messages.iter().find(|m| m.id == id)
    }
}

impl Default for TranscriptStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::message::{MessageBlock, Role};

    fn message(seq: u64) -> ChatMessage {
        ChatMessage::new(MessageId::new(0, seq), Role::Assistant)
    }

    #[test]
    fn upsert_appends_new_ids() {
        let mut store = TranscriptStore::new();
        store.upsert(message(0));
        store.upsert(message(1));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn upsert_replaces_existing_id_in_place() {
        let mut store = TranscriptStore::new();
        store.upsert(message(0));
        store.upsert(message(1));

        let mut updated = message(0);
        updated.blocks.push(MessageBlock::Text {
            content: "more".to_string(),
        });
        store.upsert(updated);

        assert_eq!(store.len(), 2, "replace must not grow the sequence");
        let snapshot = store.snapshot();
        assert_eq!(snapshot[0].blocks.len(), 1, "first slot carries the update");
        assert_eq!(snapshot[0].id, MessageId::new(0, 0), "order preserved");
    }

    #[test]
    fn every_mutation_installs_a_new_snapshot() {
        let mut store = TranscriptStore::new();
        let before = store.snapshot();
        store.upsert(message(0));
        assert!(
            !Arc::ptr_eq(&before, &store.snapshot()),
            "consumers rely on reference inequality to detect change"
        );

        let mid = store.snapshot();
        store.upsert(message(0));
        assert!(!Arc::ptr_eq(&mid, &store.snapshot()));
    }

    #[test]
    fn old_snapshots_are_unaffected_by_later_mutations() {
        let mut store = TranscriptStore::new();
        store.upsert(message(0));
        let old = store.snapshot();
        store.upsert(message(1));
        assert_eq!(old.len(), 1, "earlier snapshot must stay frozen");
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn revision_counts_every_mutation_including_reset() {
        let mut store = TranscriptStore::new();
        assert_eq!(store.revision(), 0);
        store.upsert(message(0));
        store.upsert(message(0));
        assert_eq!(store.revision(), 2);
        store.reset();
        assert_eq!(store.revision(), 3);
        assert!(store.is_empty());
    }

    #[test]
    fn get_finds_by_id() {
        let mut store = TranscriptStore::new();
        store.upsert(message(3));
        assert!(store.get(MessageId::new(0, 3)).is_some());
        assert!(store.get(MessageId::new(0, 4)).is_none());
        assert!(store.get(MessageId::new(1, 3)).is_none());
    }
}
