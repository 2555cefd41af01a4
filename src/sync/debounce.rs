//! A cancellable trailing-edge debounce deadline.

/// Collapses bursts of events into a single ready signal.
///
/// Each [`queue`](Self::queue) call replaces any pending deadline, so the
/// window restarts on every event (trailing-edge debounce, not a
/// throttle) and at most one ready signal fires per window. Time is a
/// caller-supplied millisecond counter; the timer never consults a clock.
#[derive(Debug)]
pub struct DebounceTimer {
    delay_ms: u64,
    queued_at: Option<u64>,
}

impl DebounceTimer {
    /// Create a timer with the given window length.
    pub const fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            queued_at: None,
        }
    }

    /// The current window length in milliseconds.
    pub const fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    /// Change the window length. A pending deadline keeps its start time
    /// and is measured against the new length.
    pub const fn set_delay(&mut self, delay_ms: u64) {
        self.delay_ms = delay_ms;
    }

    /// Arm (or re-arm) the deadline at `now_ms`, replacing any pending one.
    pub const fn queue(&mut self, now_ms: u64) {
        self.queued_at = Some(now_ms);
    }

    /// Consume the deadline if the window has elapsed.
    pub const fn take_ready(&mut self, now_ms: u64) -> bool {
        let Some(queued_at) = self.queued_at else {
            return false;
        };
        if now_ms.saturating_sub(queued_at) >= self.delay_ms {
            self.queued_at = None;
            return true;
        }
        false
    }

    /// Drop any pending deadline without firing.
    pub const fn cancel(&mut self) {
        self.queued_at = None;
    }

    /// Whether a deadline is pending.
    pub const fn is_pending(&self) -> bool {
        self.queued_at.is_some()
    }
}
