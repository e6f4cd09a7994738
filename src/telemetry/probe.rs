use std::io::{self, Write};

use crate::dynamics::RocketState;
use crate::io::number::format_general;

use super::SEPARATOR;

/// A telemetry channel that samples values from the rocket every step and
/// replays them one row at a time.
///
/// Rows are read back through an internal cursor: each `emit_row` call
/// writes the next sampled row. Reading past the sampled history is a bug in
/// the caller and panics.
pub trait DataProbe {
    /// Column names, in the order `emit_row` writes values.
    fn columns(&self) -> &'static [&'static str];

    fn sample(&mut self, state: &RocketState);

    fn emit_row(&mut self, sink: &mut dyn Write) -> io::Result<()>;

    /// Move the read cursor back to the first row.
    fn rewind(&mut self);

    /// Number of sampled rows.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ---------------------------------------------------------------------------
// Engine probe: motor thrust
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct EngineProbe {
    cursor: usize,
    thrust: Vec<f64>,
}

impl EngineProbe {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DataProbe for EngineProbe {
    fn columns(&self) -> &'static [&'static str] {
        &["thrust"]
    }

    fn sample(&mut self, state: &RocketState) {
        self.thrust.push(state.motor().current_thrust());
    }

    fn emit_row(&mut self, sink: &mut dyn Write) -> io::Result<()> {
        assert!(
            self.cursor < self.thrust.len(),
            "engine probe read row {} of {} sampled",
            self.cursor,
            self.thrust.len()
        );
        write!(sink, "{}", format_general(self.thrust[self.cursor]))?;
        self.cursor += 1;
        Ok(())
    }

    fn rewind(&mut self) {
        self.cursor = 0;
    }

    fn len(&self) -> usize {
        self.thrust.len()
    }
}

// ---------------------------------------------------------------------------
// Body probe: altitude and vertical velocity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct BodyProbe {
    cursor: usize,
    altitude: Vec<f64>,
    velocity: Vec<f64>,
}

impl BodyProbe {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DataProbe for BodyProbe {
    fn columns(&self) -> &'static [&'static str] {
        &["h", "dh"]
    }

    fn sample(&mut self, state: &RocketState) {
        self.altitude.push(state.altitude());
        self.velocity.push(state.velocity());
    }

    fn emit_row(&mut self, sink: &mut dyn Write) -> io::Result<()> {
        assert!(
            self.cursor < self.altitude.len(),
            "body probe read row {} of {} sampled",
            self.cursor,
            self.altitude.len()
        );
        write!(
            sink,
            "{}{}{}",
            format_general(self.altitude[self.cursor]),
            SEPARATOR,
            format_general(self.velocity[self.cursor])
        )?;
        self.cursor += 1;
        Ok(())
    }

    fn rewind(&mut self) {
        self.cursor = 0;
    }

    fn len(&self) -> usize {
        self.altitude.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motor::ConstantThrustMotor;
    use crate::units::Duration;

    fn climbing_rocket() -> RocketState {
        let mut rocket =
            RocketState::new(Box::new(ConstantThrustMotor::new(Duration::from_secs(10.0), 20.0)));
        rocket.step(Duration::from_secs(0.5));
        rocket.step(Duration::from_secs(0.5));
        rocket
    }

    fn emit_all(probe: &mut dyn DataProbe) -> Vec<String> {
        (0..probe.len())
            .map(|_| {
                let mut buf = Vec::new();
                probe.emit_row(&mut buf).unwrap();
                String::from_utf8(buf).unwrap()
            })
            .collect()
    }

    #[test]
    fn engine_probe_records_thrust() {
        let rocket = climbing_rocket();
        let mut probe = EngineProbe::new();
        probe.sample(&rocket);
        assert_eq!(probe.columns(), &["thrust"]);
        assert_eq!(emit_all(&mut probe), vec!["20"]);
    }

    #[test]
    fn body_probe_writes_two_values_per_row() {
        let rocket = climbing_rocket();
        let mut probe = BodyProbe::new();
        probe.sample(&rocket);
        let rows = emit_all(&mut probe);
        let expected = format!(
            "{}, {}",
            format_general(rocket.altitude()),
            format_general(rocket.velocity())
        );
        assert_eq!(rows, vec![expected]);
    }

    #[test]
    fn sampling_twice_gives_identical_rows() {
        let rocket = climbing_rocket();
        let mut engine = EngineProbe::new();
        let mut body = BodyProbe::new();
        for _ in 0..2 {
            engine.sample(&rocket);
            body.sample(&rocket);
        }
        let engine_rows = emit_all(&mut engine);
        let body_rows = emit_all(&mut body);
        assert_eq!(engine_rows[0], engine_rows[1]);
        assert_eq!(body_rows[0], body_rows[1]);
    }

    #[test]
    fn rewind_replays_from_the_start() {
        let rocket = climbing_rocket();
        let mut probe = EngineProbe::new();
        probe.sample(&rocket);
        let first = emit_all(&mut probe);
        probe.rewind();
        assert_eq!(emit_all(&mut probe), first);
    }

    #[test]
    #[should_panic(expected = "engine probe read row 0 of 0")]
    fn engine_probe_without_samples_panics() {
        let mut probe = EngineProbe::new();
        assert!(probe.is_empty());
        let _ = probe.emit_row(&mut Vec::new());
    }

    #[test]
    #[should_panic(expected = "body probe read row 1 of 1")]
    fn reading_past_history_panics() {
        let rocket = climbing_rocket();
        let mut probe = BodyProbe::new();
        probe.sample(&rocket);
        let mut sink = Vec::new();
        probe.emit_row(&mut sink).unwrap();
        let _ = probe.emit_row(&mut sink);
    }
}
