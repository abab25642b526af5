//! Browser host built on `web_sys`.
//!
//! [`WebStyle`] reads `getComputedStyle(element, ":after").content`, and
//! [`WebBinding`] forwards the window's `resize` and `orientationchange`
//! events to a tracker, arming a `setTimeout` for each debounce timer.
//!
//! ```rust,ignore
//! use floem_breakpoints::{Breakpoint, BreakpointTracker, web::{WebBinding, WebStyle}};
//!
//! let tracker = BreakpointTracker::new(WebStyle::new()?);
//! tracker.on(Breakpoint::new("mobile").on_matched(|_| show_drawer()));
//! // Keep the binding alive for as long as the page should react.
//! let binding = WebBinding::attach(tracker)?;
//! ```

use wasm_bindgen::{JsCast, JsValue, closure::Closure};
use web_sys::{Element, Window};

use crate::{
    BreakpointTracker,
    config::EnvSignal,
    content::{CONTENT_PROPERTY, PSEUDO_ELEMENT, StyleSource},
    error::BreakpointError,
    time::Instant,
    timer::Timer,
};

fn js_message(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

/// Computed style of a browser window's document.
#[derive(Debug, Clone)]
pub struct WebStyle {
    window: Window,
}

impl WebStyle {
    /// Use the global `window`.
    pub fn new() -> Result<Self, BreakpointError> {
        web_sys::window()
            .map(Self::from_window)
            .ok_or(BreakpointError::NoWindow)
    }

    pub fn from_window(window: Window) -> Self {
        Self { window }
    }

    pub fn window(&self) -> &Window {
        &self.window
    }
}

impl StyleSource for WebStyle {
    type Element = Element;

    fn root_element(&self) -> Option<Element> {
        self.window.document()?.body().map(Element::from)
    }

    fn after_content(&self, element: &Element) -> Option<String> {
        let style = self
            .window
            .get_computed_style_with_pseudo_elt(element, PSEUDO_ELEMENT)
            .ok()??;
        style.get_property_value(CONTENT_PROPERTY).ok()
    }
}

/// Window event listeners driving a tracker.
///
/// Dropping the binding removes the listeners. Timers already armed are left
/// to fire: a stale token is ignored by the tracker, and each `setTimeout`
/// callback frees itself, with its tracker handle, once it has run.
pub struct WebBinding<C: 'static = ()> {
    tracker: BreakpointTracker<WebStyle, C>,
    listeners: Vec<(&'static str, Closure<dyn FnMut()>)>,
}

impl<C: 'static> WebBinding<C> {
    /// Listen for every signal kind the tracker's config enables.
    pub fn attach(tracker: BreakpointTracker<WebStyle, C>) -> Result<Self, BreakpointError> {
        let window = tracker.source().window().clone();
        let mut binding = Self {
            tracker: tracker.clone(),
            listeners: Vec::new(),
        };

        for signal in EnvSignal::ALL {
            if !tracker.config().listens_to(signal) {
                continue;
            }
            let event = signal.event_name();
            let handler = Closure::<dyn FnMut()>::new({
                let tracker = tracker.clone();
                move || on_signal(&tracker, signal)
            });
            window
                .add_event_listener_with_callback(event, handler.as_ref().unchecked_ref())
                .map_err(|err| BreakpointError::Listener {
                    event,
                    message: js_message(&err),
                })?;
            tracing::debug!(event, "listening for breakpoint signal");
            binding.listeners.push((event, handler));
        }
        Ok(binding)
    }

    pub fn tracker(&self) -> &BreakpointTracker<WebStyle, C> {
        &self.tracker
    }

    /// Remove the listeners, reporting the first failure.
    pub fn detach(mut self) -> Result<(), BreakpointError> {
        self.remove_listeners()
    }

    fn remove_listeners(&mut self) -> Result<(), BreakpointError> {
        let window = self.tracker.source().window();
        let mut result = Ok(());
        for (event, handler) in self.listeners.drain(..) {
            let removed =
                window.remove_event_listener_with_callback(event, handler.as_ref().unchecked_ref());
            if let Err(err) = removed {
                if result.is_ok() {
                    result = Err(BreakpointError::Listener {
                        event,
                        message: js_message(&err),
                    });
                }
            }
        }
        result
    }
}

impl<C: 'static> Drop for WebBinding<C> {
    fn drop(&mut self) {
        if let Err(err) = self.remove_listeners() {
            tracing::warn!(%err, "failed to detach breakpoint listeners");
        }
    }
}

fn on_signal<C: 'static>(tracker: &BreakpointTracker<WebStyle, C>, signal: EnvSignal) {
    let Some(triggered) = tracker.signal(signal, Instant::now()) else {
        return;
    };
    if let Err(err) = arm_timer(tracker, triggered.timer) {
        tracing::warn!(%err, ?signal, "breakpoint evaluation not scheduled");
    }
}

fn arm_timer<C: 'static>(
    tracker: &BreakpointTracker<WebStyle, C>,
    timer: Timer,
) -> Result<i32, BreakpointError> {
    let timeout = timer.deadline.saturating_duration_since(Instant::now());
    let callback = Closure::once_into_js({
        let tracker = tracker.clone();
        move || {
            tracker.fire(timer.token);
        }
    });
    tracker
        .source()
        .window()
        .set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.unchecked_ref(),
            i32::try_from(timeout.as_millis()).unwrap_or(i32::MAX),
        )
        .map_err(|err| BreakpointError::Timer {
            message: js_message(&err),
        })
}
