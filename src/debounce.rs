//! Trailing and leading edge debouncing driven by host time.
//!
//! Nothing here sleeps or spawns. A host feeds triggers in with the current
//! [`Instant`], then either polls with a later instant or fires the
//! [`TimerToken`] it armed a native timer for. Each trigger replaces the
//! pending timer, so at most one firing is ever outstanding.

use educe::Educe;

use crate::{
    time::{Duration, Instant},
    timer::{Timer, TimerToken},
};

/// What a single trigger did to the debounce timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Triggered {
    /// The timer now pending. Any earlier timer is cancelled.
    pub timer: Timer,
    /// Leading edge mode only: the wrapped function should run right now.
    pub call_now: bool,
    /// Trailing edge mode only: the previous timer was already due but had
    /// not been polled. Its call is owed and should run before this trigger's.
    pub overdue: bool,
}

/// Debounce timer state, without the function it guards.
#[derive(Debug, Clone)]
pub struct Debounce {
    wait: Duration,
    immediate: bool,
    pending: Option<Timer>,
}

impl Debounce {
    /// Trailing edge: run once, `wait` after the last trigger of a burst.
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            immediate: false,
            pending: None,
        }
    }

    /// Leading edge: run on the first trigger of a burst and suppress the
    /// trailing call. The burst ends once `wait` passes with no trigger.
    pub fn immediate(wait: Duration) -> Self {
        Self {
            immediate: true,
            ..Self::new(wait)
        }
    }

    pub fn wait(&self) -> Duration {
        self.wait
    }

    pub fn is_immediate(&self) -> bool {
        self.immediate
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<Timer> {
        self.pending
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.map(|timer| timer.deadline)
    }

    /// Cancel the pending timer and schedule a new one `wait` after `now`.
    ///
    /// A pending timer that is already due at `now` is expired first rather
    /// than cancelled, so its burst ends even if the host never polled it.
    pub fn trigger(&mut self, now: Instant) -> Triggered {
        let overdue = self.poll(now);
        let call_now = self.immediate && self.pending.is_none();
        let timer = Timer::new(now + self.wait);
        self.pending = Some(timer);
        Triggered {
            timer,
            call_now,
            overdue,
        }
    }

    /// Expire the pending timer if it is due at `now`.
    ///
    /// Returns true when the wrapped function should run.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.pending {
            Some(timer) if timer.is_due(now) => self.expire(),
            _ => false,
        }
    }

    /// Expire the pending timer if `token` is the one it was scheduled with.
    ///
    /// Stale tokens from cancelled timers are ignored. Returns true when the
    /// wrapped function should run.
    pub fn fire(&mut self, token: TimerToken) -> bool {
        match self.pending {
            Some(timer) if timer.token == token => self.expire(),
            _ => false,
        }
    }

    /// Drop the pending timer without running anything.
    pub fn cancel(&mut self) -> Option<Timer> {
        self.pending.take()
    }

    fn expire(&mut self) -> bool {
        self.pending = None;
        !self.immediate
    }
}

/// A function wrapped in a [`Debounce`].
///
/// The result of the most recent call is kept and handed back from every
/// trigger, including triggers that only reschedule.
#[derive(Educe)]
#[educe(Debug)]
pub struct Debounced<F, R> {
    debounce: Debounce,
    #[educe(Debug(ignore))]
    func: F,
    #[educe(Debug(ignore))]
    result: Option<R>,
}

impl<F, R> Debounced<F, R>
where
    F: FnMut() -> R,
{
    pub fn new(wait: Duration, func: F) -> Self {
        Self::from_debounce(Debounce::new(wait), func)
    }

    pub fn immediate(wait: Duration, func: F) -> Self {
        Self::from_debounce(Debounce::immediate(wait), func)
    }

    pub fn from_debounce(debounce: Debounce, func: F) -> Self {
        Self {
            debounce,
            func,
            result: None,
        }
    }

    pub fn debounce(&self) -> &Debounce {
        &self.debounce
    }

    pub fn result(&self) -> Option<&R> {
        self.result.as_ref()
    }

    pub fn trigger(&mut self, now: Instant) -> Option<&R> {
        let triggered = self.debounce.trigger(now);
        if triggered.overdue || triggered.call_now {
            self.call();
        }
        self.result.as_ref()
    }

    /// Returns true if the function ran.
    pub fn poll(&mut self, now: Instant) -> bool {
        let run = self.debounce.poll(now);
        if run {
            self.call();
        }
        run
    }

    /// Returns true if the function ran.
    pub fn fire(&mut self, token: TimerToken) -> bool {
        let run = self.debounce.fire(token);
        if run {
            self.call();
        }
        run
    }

    fn call(&mut self) {
        self.result = Some((self.func)());
    }
}
