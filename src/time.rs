//! Platform-agnostic time types.
//!
//! Native targets use `std::time`; wasm32 uses `web_time`, since
//! `std::time::Instant::now` panics in the browser.

#[cfg(not(target_arch = "wasm32"))]
pub use std::time::{Duration, Instant};

#[cfg(target_arch = "wasm32")]
pub use web_time::{Duration, Instant};
