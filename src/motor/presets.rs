use super::profile::{ThrustPoint, ThrustProfile};
use super::profiled::ProfileMotor;
use crate::error::ProfileError;

// ---------------------------------------------------------------------------
// Preset motors
// ---------------------------------------------------------------------------

/// Names accepted by [`by_name`].
pub const NAMES: &[&str] = &["f15"];

/// Estes-style F15 hobby motor, ~3.5 s burn.
pub fn f15() -> Result<ProfileMotor, ProfileError> {
    let points = [
        ThrustPoint::new(0.25, 12.5),
        ThrustPoint::new(0.5, 25.0),
        ThrustPoint::new(0.75, 16.5),
        ThrustPoint::new(1.0, 15.25),
        ThrustPoint::new(1.25, 15.0),
        ThrustPoint::new(2.5, 14.0),
        ThrustPoint::new(3.0, 13.0),
        ThrustPoint::new(3.25, 13.0),
        ThrustPoint::new(3.5, 0.0),
    ];
    Ok(ProfileMotor::new("F15", ThrustProfile::parse(&points)?))
}

pub fn by_name(name: &str) -> Option<Result<ProfileMotor, ProfileError>> {
    match name.to_ascii_lowercase().as_str() {
        "f15" => Some(f15()),
        _ => None,
    }
}
