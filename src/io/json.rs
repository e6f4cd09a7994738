use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ProfileError;
use crate::motor::{ThrustPoint, ThrustProfile};
use crate::sim::{EventKind, FlightRecord};

// ---------------------------------------------------------------------------
// Thrust profile input
// ---------------------------------------------------------------------------

/// One waypoint as stored on disk: `{"t": 0.5, "th": 25.0}`.
///
/// Both fields are single precision on disk; thrust is widened exactly when
/// it becomes a [`ThrustPoint`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ProfileRecord {
    #[serde(alias = "time")]
    pub t: f32,
    #[serde(alias = "thrust")]
    pub th: f32,
}

impl From<ProfileRecord> for ThrustPoint {
    fn from(record: ProfileRecord) -> Self {
        ThrustPoint::new(record.t, f64::from(record.th))
    }
}

/// Parse a JSON array of waypoints into a validated profile.
pub fn read_profile<R: Read>(reader: R) -> Result<ThrustProfile, ProfileError> {
    let records: Vec<ProfileRecord> = serde_json::from_reader(reader)?;
    let points: Vec<ThrustPoint> = records.into_iter().map(ThrustPoint::from).collect();
    ThrustProfile::parse(&points)
}

pub fn read_profile_file(path: impl AsRef<Path>) -> Result<ThrustProfile, ProfileError> {
    read_profile(BufReader::new(File::open(path)?))
}

// ---------------------------------------------------------------------------
// Flight summary output
// ---------------------------------------------------------------------------

/// Summary statistics computed from a flight record.
#[derive(Debug, Clone, Serialize)]
pub struct FlightSummary {
    pub motor: String,
    pub motor_peak_thrust_n: f64,
    pub motor_impulse_ns: f64,
    pub apogee_m: f64,
    pub apogee_time_s: f64,
    pub max_velocity_ms: f64,
    pub max_accel_ms2: f64,
    pub burnout_time_s: Option<f64>,
    pub flight_time_s: f64,
    pub impact_velocity_ms: f64,
    pub touched_down: bool,
    pub rows: usize,
}

impl FlightSummary {
    pub fn from_record(record: &FlightRecord) -> Self {
        let trajectory = &record.trajectory;

        let (apogee_m, apogee_time_s) = record
            .apogee()
            .map_or((0.0, 0.0), |s| (s.altitude, s.time.as_secs_f64()));

        let max_velocity_ms = trajectory.iter().map(|s| s.velocity).fold(0.0_f64, f64::max);
        let max_accel_ms2 = trajectory.iter().map(|s| s.acceleration).fold(0.0_f64, f64::max);

        let last = trajectory.last();

        FlightSummary {
            motor: record.motor_name.clone(),
            motor_peak_thrust_n: record.motor_peak_thrust,
            motor_impulse_ns: record.motor_impulse,
            apogee_m,
            apogee_time_s,
            max_velocity_ms,
            max_accel_ms2,
            burnout_time_s: record
                .event(EventKind::Burnout)
                .map(|e| e.time().as_secs_f64()),
            flight_time_s: last.map_or(0.0, |s| s.time.as_secs_f64()),
            impact_velocity_ms: if record.touched_down {
                last.map_or(0.0, |s| s.velocity)
            } else {
                0.0
            },
            touched_down: record.touched_down,
            rows: record.telemetry.len(),
        }
    }
}

/// Write flight summary as pretty-printed JSON.
pub fn write_summary<W: Write>(writer: &mut W, summary: &FlightSummary) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, summary)?;
    writeln!(writer)
}

/// Write flight summary JSON to a file.
pub fn write_summary_file(path: impl AsRef<Path>, summary: &FlightSummary) -> io::Result<()> {
    let mut file = File::create(path)?;
    write_summary(&mut file, summary)
}
