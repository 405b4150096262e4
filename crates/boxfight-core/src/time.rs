use std::ops::Add;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// A point on the simulated monotonic clock, in whole microseconds since
/// session start.
///
/// Integer time keeps fire-interval and reload comparisons exact no matter
/// how many variable `dt` steps were summed to reach a given instant.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct SimInstant(u64);

impl SimInstant {
    pub const ZERO: Self = Self(0);

    pub fn from_micros(micros: u64) -> Self {
        Self(micros)
    }

    pub fn from_secs_f32(secs: f32) -> Self {
        Self(0) + dt_to_duration(secs)
    }

    pub fn as_micros(self) -> u64 {
        self.0
    }

    pub fn as_secs_f32(self) -> f32 {
        (self.0 as f64 / 1_000_000.0) as f32
    }

    /// Time elapsed from `earlier` to `self`, saturating at zero.
    pub fn duration_since(self, earlier: SimInstant) -> Duration {
        Duration::from_micros(self.0.saturating_sub(earlier.0))
    }
}

impl Add<Duration> for SimInstant {
    type Output = SimInstant;

    fn add(self, rhs: Duration) -> SimInstant {
        let micros = u64::try_from(rhs.as_micros()).unwrap_or(u64::MAX);
        SimInstant(self.0.saturating_add(micros))
    }
}

/// Convert a frame delta in seconds to a whole-microsecond duration.
/// Negative and non-finite deltas count as zero.
pub fn dt_to_duration(dt: f32) -> Duration {
    if !dt.is_finite() || dt <= 0.0 {
        return Duration::ZERO;
    }
    Duration::from_micros((f64::from(dt) * 1_000_000.0).round() as u64)
}

/// Monotonic simulated clock advanced once per tick by the frame delta.
#[derive(Debug, Clone, Default)]
pub struct SimClock {
    now: SimInstant,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> SimInstant {
        self.now
    }

    /// Advance by `dt` seconds and return the new instant.
    pub fn advance(&mut self, dt: f32) -> SimInstant {
        if !dt.is_finite() || dt < 0.0 {
            tracing::debug!(dt, "Ignoring invalid frame delta");
        }
        self.now = self.now + dt_to_duration(dt);
        self.now
    }
}
