use super::phase::BurnClock;
use super::Motor;
use crate::units::Duration;

// ---------------------------------------------------------------------------
// Constant-thrust motor
// ---------------------------------------------------------------------------

/// Delivers its rated thrust for as long as it is burning.
///
/// Thrust does not look at elapsed time: it stays at the rated value until the
/// update that flips the clock to exhausted.
#[derive(Debug, Clone)]
pub struct ConstantThrustMotor {
    burn_duration: Duration,
    thrust: f64,
    clock: BurnClock,
}

impl ConstantThrustMotor {
    pub fn new(burn_duration: Duration, thrust: f64) -> Self {
        Self { burn_duration, thrust, clock: BurnClock::new() }
    }
}

impl Motor for ConstantThrustMotor {
    fn clock(&self) -> &BurnClock {
        &self.clock
    }

    fn clock_mut(&mut self) -> &mut BurnClock {
        &mut self.clock
    }

    fn burn_duration(&self) -> Duration {
        self.burn_duration
    }

    fn burning_thrust(&self, _elapsed: Duration) -> f64 {
        self.thrust
    }

    fn peak_thrust(&self) -> f64 {
        self.thrust
    }

    fn total_impulse(&self) -> f64 {
        self.thrust * self.burn_duration.as_secs_f64()
    }

    fn name(&self) -> &str {
        "constant"
    }
}
