use crate::error::ProfileError;
use crate::units::Duration;

// ---------------------------------------------------------------------------
// Thrust curve primitives
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThrustPoint {
    pub time: Duration,
    pub thrust: f64,          // N
}

impl ThrustPoint {
    pub fn new(time: f32, thrust: f64) -> Self {
        Self { time: Duration::from_secs(time), thrust }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThrustSegment {
    pub start: ThrustPoint,
    pub end: ThrustPoint,
}

impl ThrustSegment {
    pub fn duration(&self) -> Duration {
        self.end.time - self.start.time
    }

    /// Linear interpolation at `t`, using this segment's formula even outside it.
    pub fn thrust_at(&self, t: Duration) -> f64 {
        let factor = (t - self.start.time) / self.duration();
        lerp(self.start.thrust, self.end.thrust, factor)
    }

    /// Area under the segment, N·s.
    pub fn impulse(&self) -> f64 {
        0.5 * (self.start.thrust + self.end.thrust) * self.duration().as_secs_f64()
    }
}

/// `a * (1 - f) + b * f` with the factor complemented in single precision.
fn lerp(a: f64, b: f64, factor: f32) -> f64 {
    a * f64::from(1.0 - factor) + b * f64::from(factor)
}

// ---------------------------------------------------------------------------
// Piecewise-linear thrust profile
// ---------------------------------------------------------------------------

/// Contiguous linear segments built from waypoints that follow an implicit
/// `(0 s, 0 N)` start point.
#[derive(Debug, Clone, PartialEq)]
pub struct ThrustProfile {
    segments: Vec<ThrustSegment>,
}

impl ThrustProfile {
    /// Build the segment chain. Times must be strictly increasing (the first
    /// one after 0), thrust non-negative, and the last point must be burnout
    /// (zero thrust).
    pub fn parse(points: &[ThrustPoint]) -> Result<Self, ProfileError> {
        let last = points.last().ok_or(ProfileError::Empty)?;

        let mut start = ThrustPoint::new(0.0, 0.0);
        let mut segments = Vec::with_capacity(points.len());

        for (index, &point) in points.iter().enumerate() {
            // Negated comparisons so NaN is rejected too
            if !(point.time > start.time) {
                return Err(ProfileError::NonIncreasingTime {
                    index,
                    time: point.time.as_secs(),
                    previous: start.time.as_secs(),
                });
            }
            if !(point.thrust >= 0.0) {
                return Err(ProfileError::NegativeThrust { index, thrust: point.thrust });
            }

            segments.push(ThrustSegment { start, end: point });
            start = point;
        }

        if last.thrust != 0.0 {
            return Err(ProfileError::NoBurnout { thrust: last.thrust });
        }

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[ThrustSegment] {
        &self.segments
    }

    /// End time of the last segment.
    pub fn duration(&self) -> Duration {
        self.segments.last().map_or(Duration::ZERO, |s| s.end.time)
    }

    /// Thrust `t` seconds into the burn.
    ///
    /// The first segment ending at or after `t` is used, so a shared boundary
    /// is evaluated with the earlier segment. Past the last segment the motor
    /// is spent and thrust is zero.
    pub fn thrust_at(&self, t: Duration) -> f64 {
        self.segments
            .iter()
            .find(|segment| segment.end.time >= t)
            .map_or(0.0, |segment| segment.thrust_at(t))
    }

    pub fn peak_thrust(&self) -> f64 {
        self.segments.iter().map(|s| s.end.thrust).fold(0.0_f64, f64::max)
    }

    /// Total impulse (area under the curve), N·s.
    pub fn total_impulse(&self) -> f64 {
        self.segments.iter().map(ThrustSegment::impulse).sum()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
