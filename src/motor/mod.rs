pub mod phase;
pub mod constant;
pub mod profile;
pub mod profiled;
pub mod presets;

pub use phase::{BurnClock, BurnPhase};
pub use constant::ConstantThrustMotor;
pub use profile::{ThrustPoint, ThrustProfile, ThrustSegment};
pub use profiled::ProfileMotor;

use crate::units::Duration;

/// A source of thrust that fires once per flight.
///
/// Implementors only describe their thrust while burning and how long they
/// burn; the ready → burning → exhausted lifecycle is shared through
/// [`BurnClock`].
pub trait Motor {
    fn clock(&self) -> &BurnClock;

    fn clock_mut(&mut self) -> &mut BurnClock;

    /// Rated burn duration. The motor flips to exhausted on the first update
    /// that starts with at least this much elapsed burn time.
    fn burn_duration(&self) -> Duration;

    /// Thrust while burning, `elapsed` seconds after ignition.
    fn burning_thrust(&self, elapsed: Duration) -> f64;

    /// Highest rated thrust, N.
    fn peak_thrust(&self) -> f64;

    /// Rated total impulse, N·s.
    fn total_impulse(&self) -> f64;

    /// Human-readable name for logging/display.
    fn name(&self) -> &str {
        "motor"
    }

    fn phase(&self) -> BurnPhase {
        self.clock().phase()
    }

    fn elapsed(&self) -> Duration {
        self.clock().elapsed()
    }

    fn ready_to_ignite(&self) -> bool {
        self.phase() == BurnPhase::Ready
    }

    /// Panics unless the motor is ready to ignite.
    fn ignite(&mut self) {
        self.clock_mut().ignite();
    }

    fn update(&mut self, dt: Duration) {
        let duration = self.burn_duration();
        self.clock_mut().advance(dt, duration);
    }

    fn current_thrust(&self) -> f64 {
        match self.phase() {
            BurnPhase::Burning => self.burning_thrust(self.elapsed()),
            BurnPhase::Ready | BurnPhase::Exhausted => 0.0,
        }
    }
}
