use std::fmt;

use crate::motor::BurnPhase;
use crate::units::Duration;

// ---------------------------------------------------------------------------
// Flight snapshot
// ---------------------------------------------------------------------------

/// Rocket and motor values at the end of one recorded step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightSnapshot {
    pub time: Duration,
    pub altitude: f64,        // m
    pub velocity: f64,        // m/s
    pub acceleration: f64,    // m/s^2
    pub thrust: f64,          // N
    pub phase: BurnPhase,
}

// ---------------------------------------------------------------------------
// Simulation events
// ---------------------------------------------------------------------------

/// Kinds of simulation events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Ignition,
    Burnout,
    Apogee,
    Touchdown,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EventKind::Ignition => write!(f, "IGNITION"),
            EventKind::Burnout => write!(f, "BURNOUT"),
            EventKind::Apogee => write!(f, "APOGEE"),
            EventKind::Touchdown => write!(f, "TOUCHDOWN"),
        }
    }
}

/// A discrete event that occurred during simulation.
#[derive(Debug, Clone)]
pub struct SimEvent {
    pub kind: EventKind,
    pub snapshot: FlightSnapshot,
}

impl SimEvent {
    pub fn time(&self) -> Duration {
        self.snapshot.time
    }
}

/// Trait for passive event detectors.
/// Implementations inspect consecutive snapshots and report events.
pub trait EventDetector {
    fn check(&mut self, prev: &FlightSnapshot, current: &FlightSnapshot) -> Option<EventKind>;
}

/// Motor leaving the ready phase.
pub struct IgnitionDetector;

impl EventDetector for IgnitionDetector {
    fn check(&mut self, prev: &FlightSnapshot, current: &FlightSnapshot) -> Option<EventKind> {
        (prev.phase == BurnPhase::Ready && current.phase != BurnPhase::Ready)
            .then_some(EventKind::Ignition)
    }
}

/// Motor entering the exhausted phase.
pub struct BurnoutDetector;

impl EventDetector for BurnoutDetector {
    fn check(&mut self, prev: &FlightSnapshot, current: &FlightSnapshot) -> Option<EventKind> {
        (prev.phase != BurnPhase::Exhausted && current.phase == BurnPhase::Exhausted)
            .then_some(EventKind::Burnout)
    }
}

/// Vertical velocity going from positive to non-positive above the pad.
/// Fires once.
#[derive(Default)]
pub struct ApogeeDetector {
    fired: bool,
}

impl ApogeeDetector {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventDetector for ApogeeDetector {
    fn check(&mut self, prev: &FlightSnapshot, current: &FlightSnapshot) -> Option<EventKind> {
        if self.fired {
            return None;
        }
        if prev.velocity > 0.0 && current.velocity <= 0.0 && current.altitude > 0.0 {
            self.fired = true;
            Some(EventKind::Apogee)
        } else {
            None
        }
    }
}

/// The standard detector set, in reporting order.
pub fn default_detectors() -> Vec<Box<dyn EventDetector>> {
    vec![
        Box::new(IgnitionDetector),
        Box::new(BurnoutDetector),
        Box::new(ApogeeDetector::new()),
    ]
}
