//! Debounced outbound change notification.

use tracing::{debug, warn};

use crate::codec;
use crate::document::Document;

use super::DebounceTimer;

/// Turns committed user edits into at most one host notification per
/// debounce window.
///
/// Owns `last_sent`, the echo-suppression reference the sync bridge
/// compares inbound values against. `last_sent` is updated *before*
/// [`poll`](Self::poll) returns the emitted string, so any bridge
/// evaluation that follows an emission classifies the host's echo as a
/// no-op.
///
/// Programmatic mutations (the bridge's overwrite) must not call
/// [`document_mutated`](Self::document_mutated); only user edits arm the
/// timer.
#[derive(Debug)]
pub struct ChangeNotifier {
    timer: DebounceTimer,
    last_sent: String,
}

impl ChangeNotifier {
    /// Create a notifier seeded with the initial external value.
    pub fn new(initial_value: impl Into<String>, debounce_ms: u64) -> Self {
        Self {
            timer: DebounceTimer::new(debounce_ms),
            last_sent: initial_value.into(),
        }
    }

    /// The most recent Markdown this instance emitted (or the initial
    /// external value).
    pub fn last_sent(&self) -> &str {
        &self.last_sent
    }

    /// Adjust the debounce window (the host may change it between renders).
    pub const fn set_debounce(&mut self, debounce_ms: u64) {
        self.timer.set_delay(debounce_ms);
    }

    /// Record a committed user edit at `now_ms`, restarting the window.
    pub const fn document_mutated(&mut self, now_ms: u64) {
        self.timer.queue(now_ms);
    }

    /// Whether a notification is pending.
    pub const fn is_pending(&self) -> bool {
        self.timer.is_pending()
    }

    /// Cancel any pending notification (component teardown).
    pub const fn cancel(&mut self) {
        self.timer.cancel();
    }

    /// Fire the pending notification if its window has elapsed.
    ///
    /// Serializes the document as it is *now* — the state after the last
    /// mutation in the burst — updates `last_sent`, and returns the string
    /// for the caller to hand to the host. Serialization failure is logged
    /// and suppresses the emission for this cycle; the next user edit
    /// re-arms the timer and retries.
    pub fn poll(&mut self, now_ms: u64, document: &Document) -> Option<String> {
        if !self.timer.take_ready(now_ms) {
            return None;
        }
        match codec::to_markdown(document) {
            Ok(markdown) => {
                debug!(bytes = markdown.len(), "emitting value to host");
                self.last_sent.clone_from(&markdown);
                Some(markdown)
            }
            Err(err) => {
                warn!(%err, "serialization failed; suppressing notification");
                None
            }
        }
    }
}
