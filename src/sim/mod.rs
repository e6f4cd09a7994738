pub mod runner;
pub mod event;

pub use runner::{simulate, simulate_with, FlightRecord};
pub use event::{EventDetector, EventKind, FlightSnapshot, SimEvent};
