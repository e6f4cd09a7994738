pub mod probe;
pub mod recorder;

pub use probe::{BodyProbe, DataProbe, EngineProbe};
pub use recorder::TelemetryRecorder;

/// Field separator of the telemetry text format.
pub const SEPARATOR: &str = ", ";
