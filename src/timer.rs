use std::sync::atomic::{AtomicU64, Ordering};

use crate::time::Instant;

/// Identifies one scheduled firing of a debounce timer.
///
/// Rescheduling hands out a fresh token, so a host timer that was armed for an
/// older token can fire harmlessly: the tracker ignores tokens it no longer
/// holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Hash)]
pub struct TimerToken(u64);

impl TimerToken {
    /// A token that does not correspond to any timer.
    pub const INVALID: TimerToken = TimerToken(0);

    /// Create a new token.
    pub fn next() -> TimerToken {
        static TIMER_COUNTER: AtomicU64 = AtomicU64::new(1);
        TimerToken(TIMER_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Create a new token from a raw value.
    pub const fn from_raw(id: u64) -> TimerToken {
        TimerToken(id)
    }

    /// Get the raw value for a token.
    pub const fn into_raw(self) -> u64 {
        self.0
    }
}

/// A pending timer: when it is due and which token it answers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    pub token: TimerToken,
    pub deadline: Instant,
}

impl Timer {
    pub(crate) fn new(deadline: Instant) -> Self {
        Self {
            token: TimerToken::next(),
            deadline,
        }
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.deadline <= now
    }
}
