use std::cell::{Cell, RefCell};

use educe::Educe;

pub(crate) type Callback<C> = Box<dyn FnMut(&C)>;

fn noop<C: 'static>() -> Callback<C> {
    Box::new(|_: &C| {})
}

/// A named breakpoint and the callbacks to run when it starts or stops
/// matching.
///
/// ```rust
/// use floem_breakpoints::{Breakpoint, headless::ElementId};
///
/// let tablet = Breakpoint::<ElementId>::new("tablet")
///     .on_matched(|_| println!("tablet layout"))
///     .on_exit(|_| println!("left tablet layout"));
/// assert_eq!(tablet.name(), "tablet");
/// ```
#[derive(Educe)]
#[educe(Debug)]
pub struct Breakpoint<E, C = ()> {
    pub(crate) name: String,
    pub(crate) element: Option<E>,
    pub(crate) context: C,
    #[educe(Debug(ignore))]
    pub(crate) on_matched: Option<Callback<C>>,
    #[educe(Debug(ignore))]
    pub(crate) on_exit: Option<Callback<C>>,
}

impl<E> Breakpoint<E, ()> {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_context(name, ())
    }
}

impl<E, C> Breakpoint<E, C> {
    /// A breakpoint whose callbacks receive `context`.
    pub fn with_context(name: impl Into<String>, context: C) -> Self {
        Self {
            name: name.into(),
            element: None,
            context,
            on_matched: None,
            on_exit: None,
        }
    }

    /// Inspect `element` instead of the host's root element.
    pub fn element(mut self, element: E) -> Self {
        self.element = Some(element);
        self
    }

    pub fn on_matched(mut self, callback: impl FnMut(&C) + 'static) -> Self {
        self.on_matched = Some(Box::new(callback));
        self
    }

    pub fn on_exit(mut self, callback: impl FnMut(&C) + 'static) -> Self {
        self.on_exit = Some(Box::new(callback));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get_element(&self) -> Option<&E> {
        self.element.as_ref()
    }

    pub fn context(&self) -> &C {
        &self.context
    }
}

/// Which edge, if any, a check crossed.
///
/// The new state is stored before the matching callback is called.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Unmatched to matched; `on_matched` ran.
    Entered,
    /// Matched to unmatched; `on_exit` ran.
    Exited,
    Unchanged,
}

/// A breakpoint once it is in a tracker's registry.
pub(crate) struct Entry<E, C> {
    pub(crate) name: String,
    pub(crate) element: Option<E>,
    pub(crate) context: C,
    pub(crate) is_matched: Cell<bool>,
    pub(crate) on_matched: RefCell<Callback<C>>,
    pub(crate) on_exit: RefCell<Callback<C>>,
}

impl<E, C: 'static> From<Breakpoint<E, C>> for Entry<E, C> {
    fn from(breakpoint: Breakpoint<E, C>) -> Self {
        Self {
            name: breakpoint.name,
            element: breakpoint.element,
            context: breakpoint.context,
            is_matched: Cell::new(false),
            on_matched: RefCell::new(breakpoint.on_matched.unwrap_or_else(noop)),
            on_exit: RefCell::new(breakpoint.on_exit.unwrap_or_else(noop)),
        }
    }
}

impl<E, C> Entry<E, C> {
    /// Move to the state given by `matched`, running the edge callback if the
    /// state changes.
    ///
    /// The flag is written before the callback runs.
    pub(crate) fn transition(&self, matched: bool) -> Transition {
        let (transition, callback) = match (matched, self.is_matched.get()) {
            (true, false) => (Transition::Entered, &self.on_matched),
            (false, true) => (Transition::Exited, &self.on_exit),
            _ => return Transition::Unchanged,
        };
        self.is_matched.set(matched);
        tracing::debug!(breakpoint = %self.name, ?transition, "breakpoint transition");

        match callback.try_borrow_mut() {
            Ok(mut callback) => (*callback)(&self.context),
            Err(_) => tracing::warn!(
                breakpoint = %self.name,
                ?transition,
                "skipping breakpoint callback that is already running"
            ),
        }
        transition
    }
}
