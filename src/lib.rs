pub mod units;
pub mod error;
pub mod motor;
pub mod dynamics;
pub mod telemetry;
pub mod sim;
pub mod io;
pub mod config;

pub use config::{MotorConfig, RunConfig, SimConfig};
pub use dynamics::RocketState;
pub use error::{ConfigError, ProfileError};
pub use motor::Motor;
pub use units::Duration;
