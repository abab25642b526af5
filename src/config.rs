use bitflags::bitflags;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::time::Duration;

/// Quiet period used when none is configured.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(200);

/// A host environment change that can move the active breakpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum EnvSignal {
    Resize,
    OrientationChange,
}

impl EnvSignal {
    pub const ALL: [EnvSignal; 2] = [EnvSignal::Resize, EnvSignal::OrientationChange];

    /// DOM event name for this signal.
    pub fn event_name(self) -> &'static str {
        match self {
            EnvSignal::Resize => "resize",
            EnvSignal::OrientationChange => "orientationchange",
        }
    }

    pub fn flag(self) -> SignalFlags {
        match self {
            EnvSignal::Resize => SignalFlags::RESIZE,
            EnvSignal::OrientationChange => SignalFlags::ORIENTATION_CHANGE,
        }
    }
}

bitflags! {
    /// Which [`EnvSignal`]s schedule an evaluation pass.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct SignalFlags: u8 {
        const RESIZE = 1;
        const ORIENTATION_CHANGE = 2;
    }
}

impl Default for SignalFlags {
    fn default() -> Self {
        SignalFlags::all()
    }
}

/// Settings for a [`BreakpointTracker`](crate::BreakpointTracker).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "kebab-case"))]
pub struct TrackerConfig {
    /// How long signals must stay quiet before a pass runs.
    #[cfg_attr(feature = "serde", serde(with = "duration_ms", rename = "quiet-period-ms"))]
    pub quiet_period: Duration,
    /// Run the pass on the first signal of a burst instead of after it.
    pub leading_edge: bool,
    pub signals: SignalFlags,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            quiet_period: DEFAULT_QUIET_PERIOD,
            leading_edge: false,
            signals: SignalFlags::default(),
        }
    }
}

impl TrackerConfig {
    pub fn quiet_period(mut self, quiet_period: Duration) -> Self {
        self.quiet_period = quiet_period;
        self
    }

    pub fn leading_edge(mut self, leading_edge: bool) -> Self {
        self.leading_edge = leading_edge;
        self
    }

    pub fn signals(mut self, signals: SignalFlags) -> Self {
        self.signals = signals;
        self
    }

    pub fn listens_to(&self, signal: EnvSignal) -> bool {
        self.signals.contains(signal.flag())
    }
}

#[cfg(feature = "serde")]
mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
