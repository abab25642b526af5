use std::{
    cell::{Cell, RefCell},
    fmt,
    rc::Rc,
};

use smallvec::SmallVec;

use crate::{
    breakpoint::{Breakpoint, Entry, Transition},
    config::{EnvSignal, TrackerConfig},
    content::{self, StyleSource},
    debounce::{Debounce, Triggered},
    time::Instant,
    timer::TimerToken,
};

struct TrackerState<S: StyleSource, C> {
    source: S,
    config: TrackerConfig,
    registry: RefCell<Vec<Rc<Entry<S::Element, C>>>>,
    debounce: RefCell<Debounce>,
    passes: Cell<u64>,
}

/// Tracks registered breakpoints against a [`StyleSource`] and runs their
/// callbacks when the active breakpoint changes.
///
/// The tracker is a cheap handle: clones share one registry and one debounce
/// timer. It is single-threaded and must be driven by the host. Forward
/// resize and orientation changes with [`resize`](Self::resize) and
/// [`orientation_change`](Self::orientation_change), then let the debounce
/// timer expire through [`poll`](Self::poll) or [`fire`](Self::fire).
///
/// ```rust
/// use std::time::{Duration, Instant};
/// use floem_breakpoints::{Breakpoint, BreakpointTracker, headless::HeadlessStyle};
///
/// let style = HeadlessStyle::new();
/// style.set_breakpoint("desktop");
/// let tracker = BreakpointTracker::new(style.clone());
/// let mobile = tracker.on(Breakpoint::new("mobile").on_matched(|_| println!("mobile")));
/// assert!(!mobile.is_matched());
///
/// let start = Instant::now();
/// style.set_breakpoint("mobile");
/// tracker.resize(start);
/// assert!(!tracker.poll(start + Duration::from_millis(100)));
/// assert!(tracker.poll(start + Duration::from_millis(200)));
/// assert!(mobile.is_matched());
/// ```
pub struct BreakpointTracker<S: StyleSource, C = ()> {
    state: Rc<TrackerState<S, C>>,
}

impl<S: StyleSource, C> Clone for BreakpointTracker<S, C> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

impl<S: StyleSource, C> fmt::Debug for BreakpointTracker<S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BreakpointTracker")
            .field("config", &self.state.config)
            .field("breakpoints", &self.state.registry.borrow().len())
            .field("pending", &self.state.debounce.borrow().pending())
            .field("passes", &self.state.passes.get())
            .finish()
    }
}

impl<S: StyleSource, C: 'static> BreakpointTracker<S, C> {
    pub fn new(source: S) -> Self {
        Self::with_config(source, TrackerConfig::default())
    }

    pub fn with_config(source: S, config: TrackerConfig) -> Self {
        let debounce = if config.leading_edge {
            Debounce::immediate(config.quiet_period)
        } else {
            Debounce::new(config.quiet_period)
        };
        Self {
            state: Rc::new(TrackerState {
                source,
                config,
                registry: RefCell::new(Vec::new()),
                debounce: RefCell::new(debounce),
                passes: Cell::new(0),
            }),
        }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.state.config
    }

    pub fn source(&self) -> &S {
        &self.state.source
    }

    /// Whether `breakpoint` matches the current computed style.
    ///
    /// This only reads style; it neither needs `breakpoint` to be registered
    /// nor touches any tracked state.
    pub fn is_matched<D>(&self, breakpoint: &Breakpoint<S::Element, D>) -> bool {
        content::evaluate(
            &self.state.source,
            breakpoint.element.as_ref(),
            &breakpoint.name,
        )
    }

    /// Register `breakpoint` and check it once right away, so a breakpoint
    /// that already matches runs `on_matched` before this returns.
    ///
    /// Registering the same name twice tracks two independent entries.
    pub fn on(&self, breakpoint: Breakpoint<S::Element, C>) -> TrackedBreakpoint<S, C> {
        let entry = Rc::new(Entry::from(breakpoint));
        let index = {
            let mut registry = self.state.registry.borrow_mut();
            registry.push(entry.clone());
            registry.len() - 1
        };
        tracing::debug!(breakpoint = %entry.name, index, "registered breakpoint");

        let tracked = TrackedBreakpoint {
            tracker: self.clone(),
            entry,
        };
        tracked.check();
        tracked
    }

    /// Check every registered breakpoint in registration order.
    ///
    /// Returns how many breakpoints crossed an edge.
    pub fn evaluate_all(&self) -> usize {
        // Callbacks may register more breakpoints while the pass runs.
        let snapshot: SmallVec<[Rc<Entry<S::Element, C>>; 8]> =
            self.state.registry.borrow().iter().cloned().collect();
        self.state.passes.set(self.state.passes.get() + 1);

        let changed = snapshot
            .iter()
            .filter(|entry| self.check_entry(entry) != Transition::Unchanged)
            .count();
        tracing::debug!(
            breakpoints = snapshot.len(),
            changed,
            pass = self.state.passes.get(),
            "evaluated breakpoints"
        );
        changed
    }

    /// Forward an environment signal from the host.
    ///
    /// Reschedules the debounce timer and returns it, so the host can arm a
    /// native timer for the token. In leading edge mode the first signal of a
    /// burst evaluates immediately. A pass that was already due but never
    /// polled runs before the timer is rescheduled. Returns `None` for signal
    /// kinds the config does not listen to.
    pub fn signal(&self, signal: EnvSignal, now: Instant) -> Option<Triggered> {
        if !self.state.config.listens_to(signal) {
            tracing::trace!(?signal, "ignoring disabled signal");
            return None;
        }
        let triggered = self.state.debounce.borrow_mut().trigger(now);
        tracing::trace!(?signal, token = ?triggered.timer.token, "signal scheduled evaluation");
        if triggered.overdue {
            tracing::debug!(?signal, "running overdue evaluation before rescheduling");
        }
        if triggered.overdue || triggered.call_now {
            self.evaluate_all();
        }
        Some(triggered)
    }

    pub fn resize(&self, now: Instant) -> Option<Triggered> {
        self.signal(EnvSignal::Resize, now)
    }

    pub fn orientation_change(&self, now: Instant) -> Option<Triggered> {
        self.signal(EnvSignal::OrientationChange, now)
    }

    /// Run the pending pass if its quiet period has elapsed by `now`.
    ///
    /// Returns true if a pass ran.
    pub fn poll(&self, now: Instant) -> bool {
        let run = self.state.debounce.borrow_mut().poll(now);
        if run {
            self.evaluate_all();
        }
        run
    }

    /// Run the pending pass if `token` is still the current timer.
    ///
    /// For hosts that arm one native timer per [`signal`](Self::signal).
    /// Returns true if a pass ran.
    pub fn fire(&self, token: TimerToken) -> bool {
        let run = self.state.debounce.borrow_mut().fire(token);
        if run {
            self.evaluate_all();
        }
        run
    }

    /// When the pending pass is due, if one is pending.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.state.debounce.borrow().next_deadline()
    }

    pub fn is_pending(&self) -> bool {
        self.state.debounce.borrow().is_pending()
    }

    /// Number of evaluation passes run so far, including leading edge passes.
    /// Checks done by [`on`](Self::on) are not passes.
    pub fn evaluation_passes(&self) -> u64 {
        self.state.passes.get()
    }

    pub fn len(&self) -> usize {
        self.state.registry.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Handles to every registered breakpoint, in registration order.
    pub fn breakpoints(&self) -> Vec<TrackedBreakpoint<S, C>> {
        self.state
            .registry
            .borrow()
            .iter()
            .map(|entry| TrackedBreakpoint {
                tracker: self.clone(),
                entry: entry.clone(),
            })
            .collect()
    }

    fn matches_entry(&self, entry: &Entry<S::Element, C>) -> bool {
        content::evaluate(&self.state.source, entry.element.as_ref(), &entry.name)
    }

    fn check_entry(&self, entry: &Entry<S::Element, C>) -> Transition {
        let matched = self.matches_entry(entry);
        entry.transition(matched)
    }
}

/// A registered breakpoint, as returned by [`BreakpointTracker::on`].
///
/// Holding a handle keeps its tracker alive. Callbacks that capture a handle
/// or tracker therefore keep the tracker alive for as long as it exists.
pub struct TrackedBreakpoint<S: StyleSource, C = ()> {
    tracker: BreakpointTracker<S, C>,
    entry: Rc<Entry<S::Element, C>>,
}

impl<S: StyleSource, C> Clone for TrackedBreakpoint<S, C> {
    fn clone(&self) -> Self {
        Self {
            tracker: self.tracker.clone(),
            entry: self.entry.clone(),
        }
    }
}

impl<S: StyleSource, C> fmt::Debug for TrackedBreakpoint<S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackedBreakpoint")
            .field("name", &self.entry.name)
            .field("is_matched", &self.entry.is_matched.get())
            .finish_non_exhaustive()
    }
}

impl<S: StyleSource, C: 'static> TrackedBreakpoint<S, C> {
    pub fn name(&self) -> &str {
        &self.entry.name
    }

    pub fn element(&self) -> Option<&S::Element> {
        self.entry.element.as_ref()
    }

    pub fn context(&self) -> &C {
        &self.entry.context
    }

    pub fn tracker(&self) -> &BreakpointTracker<S, C> {
        &self.tracker
    }

    /// The state recorded by the most recent check.
    ///
    /// The state is recorded before the edge callback runs, so `on_matched`
    /// already sees `true` here and `on_exit` already sees `false`.
    pub fn is_matched(&self) -> bool {
        self.entry.is_matched.get()
    }

    /// Run `callback` if the breakpoint does not match the current style.
    ///
    /// This reads style directly and ignores the recorded state, so it can
    /// disagree with [`is_matched`](Self::is_matched) while a pass is still
    /// pending. Returns true if the callback ran.
    pub fn not_matched(&self, callback: impl FnOnce()) -> bool {
        if self.tracker.matches_entry(&self.entry) {
            return false;
        }
        callback();
        true
    }

    pub fn is_not_matched(&self) -> bool {
        self.not_matched(|| {})
    }

    /// Check this breakpoint now, outside of any pass.
    pub fn check(&self) -> Transition {
        self.tracker.check_entry(&self.entry)
    }

    /// Whether both handles refer to the same registration.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.entry, &other.entry)
    }
}
