use thiserror::Error;

/// Failures wiring a tracker to a host environment.
///
/// Tracking itself never fails; only attaching to a browser window can.
#[derive(Debug, Error)]
pub enum BreakpointError {
    #[error("no global window is available")]
    NoWindow,

    #[error("failed to add or remove the '{event}' listener: {message}")]
    Listener { event: &'static str, message: String },

    #[error("failed to arm debounce timer: {message}")]
    Timer { message: String },
}
