use std::io::{self, Write};

use crate::dynamics::RocketState;
use crate::io::number::format_general;
use crate::units::Duration;

use super::probe::{BodyProbe, DataProbe, EngineProbe};
use super::SEPARATOR;

// ---------------------------------------------------------------------------
// Telemetry recorder
// ---------------------------------------------------------------------------

/// Per-step flight record: simulation time, every probe's values, and the
/// vertical acceleration, appended once per step and replayed in order.
pub struct TelemetryRecorder {
    probes: Vec<Box<dyn DataProbe>>,
    sim_time: Vec<Duration>,
    accel: Vec<f64>,
}

impl TelemetryRecorder {
    /// Recorder with no probes; only time and acceleration are kept.
    pub fn new() -> Self {
        Self { probes: vec![], sim_time: vec![], accel: vec![] }
    }

    /// Engine and body probes: `t, thrust, h, dh, ddh`.
    pub fn standard() -> Self {
        Self::new()
            .with_probe(Box::new(EngineProbe::new()))
            .with_probe(Box::new(BodyProbe::new()))
    }

    pub fn with_probe(mut self, probe: Box<dyn DataProbe>) -> Self {
        self.probes.push(probe);
        self
    }

    /// Sample every probe and append one row.
    pub fn record(&mut self, state: &RocketState, sim_time: Duration, accel: f64) {
        for probe in &mut self.probes {
            probe.sample(state);
        }
        self.sim_time.push(sim_time);
        self.accel.push(accel);
    }

    pub fn len(&self) -> usize {
        self.sim_time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sim_time.is_empty()
    }

    pub fn header(&self) -> String {
        let mut columns = vec!["t"];
        for probe in &self.probes {
            columns.extend_from_slice(probe.columns());
        }
        columns.push("ddh");
        columns.join(SEPARATOR)
    }

    /// Write the header and every recorded row.
    pub fn emit<W: Write>(&mut self, sink: &mut W) -> io::Result<()> {
        let sink: &mut dyn Write = sink;
        writeln!(sink, "{}", self.header())?;

        for probe in &mut self.probes {
            probe.rewind();
        }

        for (t, accel) in self.sim_time.iter().zip(&self.accel) {
            write!(sink, "{}{}", format_general(t.as_secs_f64()), SEPARATOR)?;
            for probe in &mut self.probes {
                probe.emit_row(sink)?;
                sink.write_all(SEPARATOR.as_bytes())?;
            }
            writeln!(sink, "{}", format_general(*accel))?;
        }

        Ok(())
    }
}

impl Default for TelemetryRecorder {
    fn default() -> Self {
        Self::standard()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motor::ConstantThrustMotor;

    fn rocket() -> RocketState {
        RocketState::new(Box::new(ConstantThrustMotor::new(Duration::from_secs(10.0), 20.0)))
    }

    fn emitted(recorder: &mut TelemetryRecorder) -> String {
        let mut buf = Vec::new();
        recorder.emit(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn standard_header() {
        assert_eq!(TelemetryRecorder::standard().header(), "t, thrust, h, dh, ddh");
        assert_eq!(TelemetryRecorder::new().header(), "t, ddh");
    }

    #[test]
    fn rows_follow_insertion_order() {
        let dt = Duration::from_secs(0.1);
        let mut rocket = rocket();
        let mut recorder = TelemetryRecorder::standard();
        recorder.record(&rocket, Duration::ZERO, 0.0);
        rocket.step(dt);
        recorder.record(&rocket, Duration::ZERO, rocket.acceleration());
        rocket.step(dt);
        recorder.record(&rocket, dt, rocket.acceleration());

        let output = emitted(&mut recorder);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 4); // header + 3 rows
        assert_eq!(lines[1], "0, 0, 0, 0, 0");
        assert_eq!(lines[2], "0, 20, 0, 1.019, 10.19");
        assert_eq!(lines[3], "0.1, 20, 0.1019, 2.038, 10.19");
    }

    #[test]
    fn probe_set_controls_columns() {
        let rocket = rocket();
        let mut recorder = TelemetryRecorder::new().with_probe(Box::new(BodyProbe::new()));
        recorder.record(&rocket, Duration::from_secs(1.5), -9.81);
        assert_eq!(emitted(&mut recorder), "t, h, dh, ddh\n1.5, 0, 0, -9.81\n");
    }

    #[test]
    fn emit_can_be_repeated() {
        let rocket = rocket();
        let mut recorder = TelemetryRecorder::standard();
        recorder.record(&rocket, Duration::ZERO, 0.0);
        let first = emitted(&mut recorder);
        assert_eq!(emitted(&mut recorder), first);
        assert_eq!(recorder.len(), 1);
    }

    #[test]
    fn empty_recorder_writes_header_only() {
        let mut recorder = TelemetryRecorder::standard();
        assert!(recorder.is_empty());
        assert_eq!(emitted(&mut recorder), "t, thrust, h, dh, ddh\n");
    }
}
