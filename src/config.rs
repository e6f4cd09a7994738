use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::dynamics::{RocketState, DEFAULT_MASS};
use crate::error::ConfigError;
use crate::io::json::read_profile_file;
use crate::motor::{presets, ConstantThrustMotor, Motor, ProfileMotor};
use crate::units::Duration;

// ---------------------------------------------------------------------------
// Simulation config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub duration: Duration,   // total simulated time budget
    pub dt: Duration,         // fixed step
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            duration: Duration::from_secs(60.0),
            dt: Duration::from_secs(0.1),
        }
    }
}

/// Upper bound on `duration / dt` accepted by [`SimConfig::validate`].
pub const MAX_STEPS: f32 = 1.0e8;

impl SimConfig {
    /// Number of steps in the budget, truncated, computed in `f32`.
    pub fn step_count(&self) -> usize {
        (self.duration / self.dt) as usize
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.dt.is_positive() || !self.dt.as_secs().is_finite() {
            return Err(ConfigError::InvalidStep(self.dt.as_secs()));
        }
        if !self.duration.is_positive() || !self.duration.as_secs().is_finite() {
            return Err(ConfigError::InvalidDuration(self.duration.as_secs()));
        }
        let steps = self.duration / self.dt;
        if !(steps <= MAX_STEPS) {
            return Err(ConfigError::TooManySteps(steps));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Motor selection
// ---------------------------------------------------------------------------

pub const DEFAULT_BURN_DURATION: Duration = Duration::from_secs(10.0);
pub const DEFAULT_THRUST: f64 = 20.0; // N

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MotorConfig {
    Constant { burn_duration: Duration, thrust: f64 },
    Profile { path: PathBuf },
    Preset { name: String },
}

impl Default for MotorConfig {
    fn default() -> Self {
        MotorConfig::Constant { burn_duration: DEFAULT_BURN_DURATION, thrust: DEFAULT_THRUST }
    }
}

impl MotorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            MotorConfig::Constant { burn_duration, thrust } => {
                if !(burn_duration.as_secs() >= 0.0) {
                    return Err(ConfigError::InvalidMotor("burn duration must not be negative"));
                }
                if !(*thrust >= 0.0) {
                    return Err(ConfigError::InvalidMotor("thrust must not be negative"));
                }
                Ok(())
            }
            MotorConfig::Profile { .. } => Ok(()),
            MotorConfig::Preset { name } => {
                if presets::NAMES.contains(&name.to_ascii_lowercase().as_str()) {
                    Ok(())
                } else {
                    Err(ConfigError::UnknownPreset(name.clone()))
                }
            }
        }
    }

    /// Construct the motor. Profiles are read and validated here, before any
    /// simulation step runs.
    pub fn build(&self) -> Result<Box<dyn Motor>, ConfigError> {
        self.validate()?;
        let motor: Box<dyn Motor> = match self {
            MotorConfig::Constant { burn_duration, thrust } => {
                Box::new(ConstantThrustMotor::new(*burn_duration, *thrust))
            }
            MotorConfig::Profile { path } => {
                let profile = read_profile_file(path)?;
                let name = path
                    .file_stem()
                    .map_or_else(|| "profile".to_string(), |s| s.to_string_lossy().into_owned());
                Box::new(ProfileMotor::new(name, profile))
            }
            MotorConfig::Preset { name } => match presets::by_name(name) {
                Some(motor) => Box::new(motor?),
                None => return Err(ConfigError::UnknownPreset(name.clone())),
            },
        };
        Ok(motor)
    }
}

// ---------------------------------------------------------------------------
// Full run configuration
// ---------------------------------------------------------------------------

/// Everything one run needs. Each field defaults to the reference run: 10 s of
/// 20 N on 1 kg, 60 s budget at 0.1 s steps, telemetry to `sim.csv`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub sim: SimConfig,
    pub motor: MotorConfig,
    pub mass: f64,                    // kg
    pub launch_hold: bool,
    pub output: PathBuf,
    pub summary: Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            sim: SimConfig::default(),
            motor: MotorConfig::default(),
            mass: DEFAULT_MASS,
            launch_hold: false,
            output: PathBuf::from("sim.csv"),
            summary: None,
        }
    }
}

impl RunConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load a TOML config. A relative profile path is taken relative to the
    /// config file's directory.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let mut config = Self::from_toml_str(&fs::read_to_string(path)?)?;
        if let MotorConfig::Profile { path: profile } = &mut config.motor {
            if profile.is_relative() {
                if let Some(dir) = path.parent() {
                    *profile = dir.join(&*profile);
                }
            }
        }
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.sim.validate()?;
        self.motor.validate()?;
        if !(self.mass > 0.0) {
            return Err(ConfigError::InvalidMass(self.mass));
        }
        Ok(())
    }

    /// Validate and assemble the rocket on its pad.
    pub fn build_rocket(&self) -> Result<RocketState, ConfigError> {
        self.validate()?;
        let rocket = RocketState::new(self.motor.build()?).with_mass(self.mass);
        Ok(if self.launch_hold { rocket.with_launch_hold() } else { rocket })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProfileError;
    use std::io::Write;

    #[test]
    fn defaults_reproduce_reference_run() {
        let config = RunConfig::default();
        assert_eq!(config.sim.step_count(), 600);
        assert_eq!(config.output, PathBuf::from("sim.csv"));
        assert!(config.validate().is_ok());

        let rocket = config.build_rocket().unwrap();
        assert_eq!(rocket.mass(), 1.0);
        assert_eq!(rocket.motor().burn_duration(), Duration::from_secs(10.0));
        assert_eq!(rocket.motor().name(), "constant");
    }

    #[test]
    fn empty_toml_is_all_defaults() {
        assert_eq!(RunConfig::from_toml_str("").unwrap(), RunConfig::default());
    }

    #[test]
    fn parses_full_toml() {
        let text = r#"
            mass = 0.5
            launch_hold = true
            output = "out/flight.csv"
            summary = "out/summary.json"

            [sim]
            duration = 30.0
            dt = 0.01

            [motor]
            kind = "preset"
            name = "F15"
        "#;
        let config = RunConfig::from_toml_str(text).unwrap();
        assert_eq!(config.sim.dt, Duration::from_secs(0.01));
        assert_eq!(config.motor, MotorConfig::Preset { name: "F15".into() });
        assert_eq!(config.summary, Some(PathBuf::from("out/summary.json")));

        let rocket = config.build_rocket().unwrap();
        assert!(rocket.is_on_rail());
        assert_eq!(rocket.motor().name(), "F15");
    }

    #[test]
    fn partial_sim_table_keeps_other_defaults() {
        let config = RunConfig::from_toml_str("[sim]\ndt = 0.05\n").unwrap();
        assert_eq!(config.sim.duration, Duration::from_secs(60.0));
        assert_eq!(config.sim.step_count(), 1200);
    }

    #[test]
    fn rejects_bad_values() {
        let bad_step = RunConfig {
            sim: SimConfig { dt: Duration::ZERO, ..SimConfig::default() },
            ..RunConfig::default()
        };
        assert!(matches!(bad_step.validate(), Err(ConfigError::InvalidStep(_))));

        let bad_mass = RunConfig { mass: 0.0, ..RunConfig::default() };
        assert!(matches!(bad_mass.validate(), Err(ConfigError::InvalidMass(_))));

        let bad_thrust = MotorConfig::Constant { burn_duration: Duration::from_secs(1.0), thrust: -1.0 };
        assert!(matches!(bad_thrust.validate(), Err(ConfigError::InvalidMotor(_))));

        let unknown = MotorConfig::Preset { name: "j350".into() };
        assert!(matches!(unknown.build(), Err(ConfigError::UnknownPreset(_))));
    }

    #[test]
    fn rejects_unbounded_step_budget() {
        let endless = RunConfig::from_toml_str("[sim]\nduration = inf\n").unwrap();
        assert!(matches!(endless.validate(), Err(ConfigError::InvalidDuration(_))));

        let tiny_step = SimConfig { duration: Duration::from_secs(60.0), dt: Duration::from_secs(1e-40) };
        assert!(matches!(tiny_step.validate(), Err(ConfigError::TooManySteps(_))));

        let nan_step = SimConfig { dt: Duration::from_secs(f32::NAN), ..SimConfig::default() };
        assert!(matches!(nan_step.validate(), Err(ConfigError::InvalidStep(_))));

        let fine = SimConfig { duration: Duration::from_secs(1.0e3), dt: Duration::from_secs(1.0e-4) };
        assert!(fine.validate().is_ok(), "ten million steps is within budget");
    }

    #[test]
    fn unknown_motor_kind_is_a_toml_error() {
        let err = RunConfig::from_toml_str("[motor]\nkind = \"hybrid\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::TomlError(_)));
    }

    #[test]
    fn profile_path_is_relative_to_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut profile = std::fs::File::create(dir.path().join("ramp.json")).unwrap();
        write!(profile, r#"[{{"t": 2.0, "th": 10.0}}, {{"t": 5.0, "th": 0.0}}]"#).unwrap();

        let config_path = dir.path().join("flight.toml");
        std::fs::write(&config_path, "[motor]\nkind = \"profile\"\npath = \"ramp.json\"\n").unwrap();

        let config = RunConfig::from_file(&config_path).unwrap();
        let rocket = config.build_rocket().unwrap();
        assert_eq!(rocket.motor().name(), "ramp");
        assert_eq!(rocket.motor().burn_duration(), Duration::from_secs(5.0));
    }

    #[test]
    fn invalid_profile_fails_before_simulation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"[{"t": 2.0, "th": 10.0}, {"t": 1.0, "th": 0.0}]"#).unwrap();

        let motor = MotorConfig::Profile { path };
        assert!(matches!(
            motor.build(),
            Err(ConfigError::Profile(ProfileError::NonIncreasingTime { .. }))
        ));
    }
}
