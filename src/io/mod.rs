pub mod number;
pub mod csv;
pub mod json;

pub use number::format_general;
pub use csv::{write_telemetry, write_telemetry_file};
pub use json::{read_profile, read_profile_file, write_summary, write_summary_file, FlightSummary};
