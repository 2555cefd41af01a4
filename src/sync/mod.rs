//! The content-synchronization core.
//!
//! Two directions of traffic meet here:
//!
//! - **inbound**: the host re-renders with a new external value, and the
//!   [`decide`] function rules on whether the live document may be
//!   overwritten ([`SyncDecision`]);
//! - **outbound**: user edits arm the [`ChangeNotifier`], which collapses
//!   bursts of mutations into a single debounced host notification
//!   carrying the latest document state.
//!
//! The loop-prevention invariant: string equality between the incoming
//! value and the last value this instance emitted (`last_sent`) is the
//! sole echo signal, and programmatic overwrites never arm the notifier,
//! so host → editor → host cycles terminate after one hop.
//!
//! Timing is explicit: the [`DebounceTimer`] is driven by caller-supplied
//! `now_ms` timestamps, so tests are deterministic and teardown trivially
//! cancels pending work (the timer is owned state, not an ambient
//! callback).

mod bridge;
mod debounce;
mod notifier;

pub use bridge::{SyncDecision, decide};
pub use debounce::DebounceTimer;
pub use notifier::ChangeNotifier;
