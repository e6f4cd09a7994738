use super::phase::BurnClock;
use super::profile::ThrustProfile;
use super::Motor;
use crate::units::Duration;

// ---------------------------------------------------------------------------
// Solid motor driven by a measured thrust curve
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ProfileMotor {
    name: String,
    profile: ThrustProfile,
    clock: BurnClock,
}

impl ProfileMotor {
    pub fn new(name: impl Into<String>, profile: ThrustProfile) -> Self {
        Self { name: name.into(), profile, clock: BurnClock::new() }
    }

    pub fn profile(&self) -> &ThrustProfile {
        &self.profile
    }
}

impl Motor for ProfileMotor {
    fn clock(&self) -> &BurnClock {
        &self.clock
    }

    fn clock_mut(&mut self) -> &mut BurnClock {
        &mut self.clock
    }

    fn burn_duration(&self) -> Duration {
        self.profile.duration()
    }

    fn burning_thrust(&self, elapsed: Duration) -> f64 {
        if elapsed > self.profile.duration() {
            return 0.0;
        }
        self.profile.thrust_at(elapsed)
    }

    fn peak_thrust(&self) -> f64 {
        self.profile.peak_thrust()
    }

    fn total_impulse(&self) -> f64 {
        self.profile.total_impulse()
    }

    fn name(&self) -> &str {
        &self.name
    }
}
