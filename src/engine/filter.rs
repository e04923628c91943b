//! Request correlation: decides whether an event belongs to the active request.

use crate::bridge::event::BridgeEvent;

/// Whether `event` should be folded into the transcript given the caller's
/// active request id.
///
/// - No active request: accept unconditionally (passive/replay consumption).
/// - Event carries no `request_id`: accept unconditionally. Unlabeled events
///   are trusted to belong to the caller's context; this is permissive and
///   could admit cross-request leakage if a bridge ever emits unlabeled
///   events during overlapping requests.
/// - Otherwise accept iff the ids match. Stragglers from a superseded
///   request are dropped with no observable side effect.
pub fn accepts(event: &BridgeEvent, active_request: Option<&str>) -> bool {
    let Some(active) = active_request else {
        return true;
    };
    match event.request_id.as_deref() {
        None => true,
        Some(id) => id == active,
    }
}
