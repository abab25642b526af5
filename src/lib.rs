//! # Floem Breakpoints
//!
//! Run callbacks when a page's active CSS breakpoint changes.
//!
//! Style rules publish the active breakpoint as generated content:
//!
//! ```css
//! body:after { content: "mobile"; display: none; }
//! @media (min-width: 768px) { body:after { content: "tablet"; } }
//! @media (min-width: 1200px) { body:after { content: "desktop"; } }
//! ```
//!
//! A [`BreakpointTracker`] compares that content against each registered
//! [`Breakpoint`] and runs `on_matched` or `on_exit` when a breakpoint starts
//! or stops matching. Style is re-read after resize and orientation changes
//! once they have been quiet for [`TrackerConfig::quiet_period`].
//!
//! The tracker does not own an event loop. Any [`StyleSource`] can back it:
//! `web::WebStyle` in the browser (feature `web`, wasm32 only), or
//! [`headless::HeadlessStyle`] in tests and other hosts.
//!
//! ## Example
//!
//! ```rust
//! use std::{cell::Cell, rc::Rc, time::{Duration, Instant}};
//! use floem_breakpoints::{Breakpoint, BreakpointTracker, headless::HeadlessStyle};
//!
//! let style = HeadlessStyle::new();
//! style.set_breakpoint("mobile");
//!
//! let drawer_open = Rc::new(Cell::new(false));
//! let tracker = BreakpointTracker::new(style.clone());
//! let mobile = tracker.on(
//!     Breakpoint::with_context("mobile", drawer_open.clone())
//!         .on_matched(|open| open.set(true))
//!         .on_exit(|open| open.set(false)),
//! );
//! assert!(mobile.is_matched());
//! assert!(drawer_open.get());
//!
//! // The window grows; the pass runs once the resize burst settles.
//! let start = Instant::now();
//! style.set_breakpoint("desktop");
//! tracker.resize(start);
//! tracker.resize(start + Duration::from_millis(50));
//! tracker.poll(start + Duration::from_millis(250));
//! assert!(!drawer_open.get());
//! ```

pub mod breakpoint;
pub mod config;
pub mod content;
pub mod debounce;
pub mod error;
pub mod headless;
pub mod time;
pub mod timer;
pub mod tracker;
#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod web;

pub use breakpoint::{Breakpoint, Transition};
pub use config::{DEFAULT_QUIET_PERIOD, EnvSignal, SignalFlags, TrackerConfig};
pub use content::StyleSource;
pub use debounce::{Debounce, Debounced, Triggered};
pub use error::BreakpointError;
pub use timer::{Timer, TimerToken};
pub use tracker::{BreakpointTracker, TrackedBreakpoint};
