use std::fmt;
use std::ops::{Add, AddAssign, Div, Sub};

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Duration: single-precision seconds
// ---------------------------------------------------------------------------

/// Elapsed time in seconds, stored as `f32`.
///
/// Used for step size, burn time and simulation time alike so the three never
/// get mixed up with plain `f64` physics quantities. Burn time accumulates in
/// single precision; values are widened exactly when they enter the integrator.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Duration(f32);

impl Duration {
    pub const ZERO: Duration = Duration(0.0);

    pub const fn from_secs(secs: f32) -> Self {
        Duration(secs)
    }

    pub const fn as_secs(self) -> f32 {
        self.0
    }

    /// Exact widening to double precision.
    pub fn as_secs_f64(self) -> f64 {
        f64::from(self.0)
    }

    /// Time at the start of step `index` for a fixed step size, computed in `f32`.
    pub fn at_step(index: usize, dt: Duration) -> Self {
        Duration(index as f32 * dt.0)
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0.0
    }
}

impl Add for Duration {
    type Output = Duration;

    fn add(self, rhs: Duration) -> Duration {
        Duration(self.0 + rhs.0)
    }
}

impl AddAssign for Duration {
    fn add_assign(&mut self, rhs: Duration) {
        self.0 += rhs.0;
    }
}

impl Sub for Duration {
    type Output = Duration;

    fn sub(self, rhs: Duration) -> Duration {
        Duration(self.0 - rhs.0)
    }
}

/// Ratio of two durations (dimensionless).
impl Div for Duration {
    type Output = f32;

    fn div(self, rhs: Duration) -> f32 {
        self.0 / rhs.0
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}
