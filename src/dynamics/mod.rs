pub mod state;

pub use state::{RocketState, DEFAULT_MASS, GRAVITY_ACCEL};
