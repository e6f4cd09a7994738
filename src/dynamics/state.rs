use crate::motor::Motor;
use crate::units::Duration;

// ---------------------------------------------------------------------------
// Physical constants
// ---------------------------------------------------------------------------

pub const GRAVITY_ACCEL: f64 = -9.81; // m/s^2, up is positive
pub const DEFAULT_MASS: f64 = 1.0;    // kg

// ---------------------------------------------------------------------------
// 1-D rocket state: altitude, vertical velocity, vertical acceleration
// ---------------------------------------------------------------------------

/// Point-mass rocket flying straight up from the pad, with its motor.
///
/// The ground is an absorbing floor: altitude never goes below zero, and the
/// step that would have taken it below zero while descending raises the
/// touchdown flag.
pub struct RocketState {
    motor: Box<dyn Motor>,
    mass: f64,                  // kg, constant
    z: f64,                     // m
    dz: f64,                    // m/s
    ddz: f64,                   // m/s^2
    has_touched_down: bool,
    on_rail: bool,
}

impl RocketState {
    pub fn new(motor: Box<dyn Motor>) -> Self {
        Self {
            motor,
            mass: DEFAULT_MASS,
            z: 0.0,
            dz: 0.0,
            ddz: 0.0,
            has_touched_down: false,
            on_rail: false,
        }
    }

    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = mass;
        self
    }

    /// Keep the rocket on its launch rail until thrust exceeds weight.
    ///
    /// Without the hold a motor that ramps up from zero thrust sinks into the
    /// floor on the first steps and reads as an immediate touchdown.
    pub fn with_launch_hold(mut self) -> Self {
        self.on_rail = true;
        self
    }

    /// Advance one fixed step.
    ///
    /// The motor is lit on the first step. Position is integrated with the
    /// velocity from before the step, then velocity with the new acceleration.
    pub fn step(&mut self, dt: Duration) {
        if self.motor.ready_to_ignite() {
            self.motor.ignite();
        }
        self.motor.update(dt);

        let dt = dt.as_secs_f64();
        self.ddz = self.motor.current_thrust() / self.mass + GRAVITY_ACCEL;
        if self.on_rail {
            if self.ddz <= 0.0 {
                self.ddz = 0.0;
                return;
            }
            self.on_rail = false;
        }
        self.z += self.dz * dt;
        self.dz += dt * self.ddz;
        self.has_touched_down = self.z < 0.0 && self.dz < 0.0;
        self.z = self.z.max(0.0);
    }

    pub fn altitude(&self) -> f64 {
        self.z
    }

    pub fn velocity(&self) -> f64 {
        self.dz
    }

    pub fn acceleration(&self) -> f64 {
        self.ddz
    }

    pub fn has_touched_down(&self) -> bool {
        self.has_touched_down
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn is_on_rail(&self) -> bool {
        self.on_rail
    }

    pub fn motor(&self) -> &dyn Motor {
        self.motor.as_ref()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
