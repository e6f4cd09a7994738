use std::{error::Error, fmt, io};

// ---------------------------------------------------------------------------
// Thrust profile errors
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum ProfileError {
    IoError(io::Error),
    JsonError(serde_json::Error),
    Empty,
    NonIncreasingTime { index: usize, time: f32, previous: f32 },
    NegativeThrust { index: usize, thrust: f64 },
    NoBurnout { thrust: f64 },
}

impl fmt::Display for ProfileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileError::IoError(e) => write!(f, "I/O error: {}", e),
            ProfileError::JsonError(e) => write!(f, "JSON parsing error: {}", e),
            ProfileError::Empty => write!(f, "thrust profile has no points"),
            ProfileError::NonIncreasingTime { index, time, previous } => write!(
                f,
                "point {} at t={}s does not come after t={}s",
                index, time, previous
            ),
            ProfileError::NegativeThrust { index, thrust } => {
                write!(f, "point {} has invalid thrust {}", index, thrust)
            }
            ProfileError::NoBurnout { thrust } => {
                write!(f, "last point must have zero thrust, got {}", thrust)
            }
        }
    }
}

impl Error for ProfileError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ProfileError::IoError(e) => Some(e),
            ProfileError::JsonError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ProfileError {
    fn from(err: io::Error) -> Self {
        ProfileError::IoError(err)
    }
}

impl From<serde_json::Error> for ProfileError {
    fn from(err: serde_json::Error) -> Self {
        ProfileError::JsonError(err)
    }
}

// ---------------------------------------------------------------------------
// Run configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum ConfigError {
    IoError(io::Error),
    TomlError(toml::de::Error),
    Profile(ProfileError),
    InvalidStep(f32),
    InvalidDuration(f32),
    TooManySteps(f32),
    InvalidMass(f64),
    InvalidMotor(&'static str),
    UnknownPreset(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "I/O error: {}", e),
            ConfigError::TomlError(e) => write!(f, "TOML parsing error: {}", e),
            ConfigError::Profile(e) => write!(f, "invalid thrust profile: {}", e),
            ConfigError::InvalidStep(dt) => write!(f, "step size must be positive, got {}s", dt),
            ConfigError::InvalidDuration(t) => {
                write!(f, "simulated duration must be positive, got {}s", t)
            }
            ConfigError::TooManySteps(n) => write!(
                f,
                "duration / dt gives {} steps, more than the {} allowed",
                n,
                crate::config::MAX_STEPS
            ),
            ConfigError::InvalidMass(m) => write!(f, "vehicle mass must be positive, got {} kg", m),
            ConfigError::InvalidMotor(reason) => write!(f, "invalid motor: {}", reason),
            ConfigError::UnknownPreset(name) => write!(f, "unknown motor preset '{}'", name),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ConfigError::IoError(e) => Some(e),
            ConfigError::TomlError(e) => Some(e),
            ConfigError::Profile(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(err: io::Error) -> Self {
        ConfigError::IoError(err)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::TomlError(err)
    }
}

impl From<ProfileError> for ConfigError {
    fn from(err: ProfileError) -> Self {
        ConfigError::Profile(err)
    }
}
