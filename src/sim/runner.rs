use log::{info, warn};

use crate::config::SimConfig;
use crate::dynamics::RocketState;
use crate::motor::Motor;
use crate::telemetry::TelemetryRecorder;
use crate::units::Duration;
use super::event::{default_detectors, EventKind, FlightSnapshot, SimEvent};

// ---------------------------------------------------------------------------
// Flight record
// ---------------------------------------------------------------------------

/// Everything a run produces: the telemetry for serialisation, a trajectory
/// of snapshots (one per telemetry row) and the detected events.
pub struct FlightRecord {
    pub motor_name: String,
    pub motor_peak_thrust: f64,   // N
    pub motor_impulse: f64,       // N·s
    pub telemetry: TelemetryRecorder,
    pub trajectory: Vec<FlightSnapshot>,
    pub events: Vec<SimEvent>,
    pub touched_down: bool,
}

impl FlightRecord {
    pub fn event(&self, kind: EventKind) -> Option<&SimEvent> {
        self.events.iter().find(|e| e.kind == kind)
    }

    /// Highest snapshot; the earliest one on ties.
    pub fn apogee(&self) -> Option<&FlightSnapshot> {
        self.trajectory
            .iter()
            .reduce(|best, s| if s.altitude > best.altitude { s } else { best })
    }
}

fn snapshot(rocket: &RocketState, time: Duration) -> FlightSnapshot {
    FlightSnapshot {
        time,
        altitude: rocket.altitude(),
        velocity: rocket.velocity(),
        acceleration: rocket.acceleration(),
        thrust: rocket.motor().current_thrust(),
        phase: rocket.motor().phase(),
    }
}

fn push_event(events: &mut Vec<SimEvent>, kind: EventKind, snapshot: FlightSnapshot) {
    info!(
        "{:<9} t={:>6.2}s   alt={:>8.1}m   vel={:>7.1}m/s",
        kind,
        snapshot.time.as_secs(),
        snapshot.altitude,
        snapshot.velocity
    );
    events.push(SimEvent { kind, snapshot });
}

// ---------------------------------------------------------------------------
// Fixed-step flight simulation
// ---------------------------------------------------------------------------

/// Fly `rocket` for at most `config.step_count()` steps, recording into
/// `telemetry`.
///
/// The initial state is recorded first with time and acceleration zero. Each
/// step's row is stamped with the step's start time `i * dt`. The loop stops
/// after recording the step on which the rocket touches down.
pub fn simulate_with(
    mut rocket: RocketState,
    config: &SimConfig,
    mut telemetry: TelemetryRecorder,
) -> FlightRecord {
    let steps = config.step_count();
    let dt = config.dt;
    let mut detectors = default_detectors();

    let mut trajectory = Vec::with_capacity(steps.saturating_add(1).min(200_000));
    let mut events = Vec::new();

    telemetry.record(&rocket, Duration::ZERO, 0.0);
    let mut prev = snapshot(&rocket, Duration::ZERO);
    trajectory.push(prev);

    let mut touched_down = false;

    for step in 0..steps {
        let t = Duration::at_step(step, dt);

        rocket.step(dt);
        telemetry.record(&rocket, t, rocket.acceleration());

        let current = snapshot(&rocket, t);
        for detector in detectors.iter_mut() {
            if let Some(kind) = detector.check(&prev, &current) {
                push_event(&mut events, kind, current);
            }
        }
        trajectory.push(current);
        prev = current;

        if rocket.has_touched_down() {
            push_event(&mut events, EventKind::Touchdown, current);
            touched_down = true;
            break;
        }
    }

    if !touched_down {
        warn!(
            "simulation stopped after {} steps at altitude {:.1} m without touchdown",
            steps,
            rocket.altitude()
        );
    }

    FlightRecord {
        motor_name: rocket.motor().name().to_string(),
        motor_peak_thrust: rocket.motor().peak_thrust(),
        motor_impulse: rocket.motor().total_impulse(),
        telemetry,
        trajectory,
        events,
        touched_down,
    }
}

/// Simulate a unit-mass rocket with the standard telemetry probes.
pub fn simulate(motor: Box<dyn Motor>, config: &SimConfig) -> FlightRecord {
    simulate_with(RocketState::new(motor), config, TelemetryRecorder::standard())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motor::{presets, BurnPhase, ConstantThrustMotor};

    fn reference_motor() -> Box<dyn Motor> {
        Box::new(ConstantThrustMotor::new(Duration::from_secs(10.0), 20.0))
    }

    #[test]
    fn reference_flight_touches_down() {
        let record = simulate(reference_motor(), &SimConfig::default());
        assert!(record.touched_down);
        // Initial row plus 350 steps; the touchdown step is the last recorded
        assert_eq!(record.telemetry.len(), 351);
        assert_eq!(record.trajectory.len(), 351);
        let last = record.trajectory.last().unwrap();
        assert_eq!(last.altitude, 0.0);
        assert!(last.velocity < 0.0);
    }

    #[test]
    fn events_in_flight_order() {
        let record = simulate(reference_motor(), &SimConfig::default());
        let kinds: Vec<EventKind> = record.events.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![EventKind::Ignition, EventKind::Burnout, EventKind::Apogee, EventKind::Touchdown]
        );
        assert_eq!(record.event(EventKind::Ignition).unwrap().time(), Duration::ZERO);
    }

    #[test]
    fn burnout_one_step_after_rated_duration() {
        let record = simulate(reference_motor(), &SimConfig::default());
        // Rows 1..=100 burn, row 101 (step index 100) is the first without thrust
        assert!(record.trajectory[1..=100].iter().all(|s| s.thrust == 20.0));
        assert_eq!(record.trajectory[101].thrust, 0.0);
        assert_eq!(record.trajectory[101].phase, BurnPhase::Exhausted);
        let burnout = record.event(EventKind::Burnout).unwrap();
        assert_eq!(burnout.time(), Duration::at_step(100, Duration::from_secs(0.1)));
    }

    #[test]
    fn apogee_is_physical() {
        let record = simulate(reference_motor(), &SimConfig::default());
        let apogee = record.apogee().unwrap();
        // 10 s at 10.19 m/s^2, then ballistic: ~509 m + ~539 m
        assert!((apogee.altitude - 1038.74).abs() < 0.01, "apogee {}", apogee.altitude);
        let detected = record.event(EventKind::Apogee).unwrap();
        assert!(detected.snapshot.velocity <= 0.0);
    }

    #[test]
    fn stops_at_step_budget_without_touchdown() {
        let config = SimConfig { duration: Duration::from_secs(5.0), dt: Duration::from_secs(0.5) };
        let record = simulate(reference_motor(), &config);
        assert!(!record.touched_down);
        assert_eq!(record.telemetry.len(), 11);
        assert!(record.event(EventKind::Touchdown).is_none());
    }

    #[test]
    fn saturated_step_count_does_not_overflow_capacity() {
        // Unvalidated budget: the ratio saturates to usize::MAX, touchdown still ends the loop
        let config = SimConfig { duration: Duration::from_secs(60.0), dt: Duration::from_secs(1e-40) };
        assert_eq!(config.step_count(), usize::MAX);
        let motor = ConstantThrustMotor::new(Duration::ZERO, 0.0);
        let record = simulate(Box::new(motor), &config);
        assert!(record.touched_down);
    }

    #[test]
    fn heavier_rocket_flies_lower() {
        let config = SimConfig::default();
        let light = simulate(reference_motor(), &config);
        let heavy = simulate_with(
            RocketState::new(reference_motor()).with_mass(1.5),
            &config,
            TelemetryRecorder::standard(),
        );
        assert!(heavy.apogee().unwrap().altitude < light.apogee().unwrap().altitude);
    }

    #[test]
    fn ramping_motor_without_hold_never_leaves_the_pad() {
        let motor = presets::f15().unwrap();
        let config = SimConfig { duration: Duration::from_secs(30.0), dt: Duration::from_secs(0.01) };
        let record = simulate(Box::new(motor), &config);
        assert!(record.touched_down);
        assert_eq!(record.telemetry.len(), 3);
    }

    #[test]
    fn profile_motor_flight() {
        let motor = presets::f15().unwrap();
        let config = SimConfig { duration: Duration::from_secs(30.0), dt: Duration::from_secs(0.01) };
        let rocket = RocketState::new(Box::new(motor)).with_launch_hold();
        let record = simulate_with(rocket, &config, TelemetryRecorder::standard());
        assert_eq!(record.motor_name, "F15");
        assert_eq!(record.motor_peak_thrust, 25.0);
        assert!(record.motor_impulse > 40.0 && record.motor_impulse < 50.0);
        assert!(record.touched_down, "F15 on 1 kg comes back well within 30 s");
        let peak = record.trajectory.iter().map(|s| s.thrust).fold(0.0_f64, f64::max);
        assert!(peak <= 25.0 && peak > 24.0, "peak thrust {}", peak);
    }
}
