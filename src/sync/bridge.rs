//! The overwrite decision for inbound external values.

use tracing::debug;

/// What to do with a newly arrived external value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncDecision {
    /// Leave the live document alone.
    NoOp,
    /// Replace the live document with the external value.
    Overwrite,
}

/// Rule on an inbound external value.
///
/// - An incoming value equal to `last_sent` is the host echoing back what
///   this instance just emitted: always a no-op, so update loops
///   terminate.
/// - Otherwise the document is only overwritten when it has no text
///   content or the host explicitly set the overwrite flag; unsaved user
///   content is never clobbered silently.
pub fn decide(
    incoming: &str,
    overwrite: bool,
    last_sent: &str,
    document_empty: bool,
) -> SyncDecision {
    if incoming == last_sent {
        debug!("external value matches last sent; treating as echo");
        return SyncDecision::NoOp;
    }
    if document_empty || overwrite {
        SyncDecision::Overwrite
    } else {
        debug!(overwrite, "ignoring external value: document has unsaved content");
        SyncDecision::NoOp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_echo_is_noop_even_with_overwrite_flag() {
        assert_eq!(decide("same", true, "same", false), SyncDecision::NoOp);
        assert_eq!(decide("same", false, "same", true), SyncDecision::NoOp);
    }

    #[test]
    fn test_empty_document_accepts_new_value() {
        assert_eq!(decide("new", false, "old", true), SyncDecision::Overwrite);
    }

    #[test]
    fn test_overwrite_flag_forces_replacement() {
        assert_eq!(decide("new", true, "old", false), SyncDecision::Overwrite);
    }

    #[test]
    fn test_unsaved_content_is_protected() {
        assert_eq!(decide("new", false, "old", false), SyncDecision::NoOp);
    }

    #[test]
    fn test_empty_incoming_value_follows_same_rules() {
        // An empty incoming value can still overwrite when forced.
        assert_eq!(decide("", true, "old", false), SyncDecision::Overwrite);
        assert_eq!(decide("", false, "old", false), SyncDecision::NoOp);
    }
}
