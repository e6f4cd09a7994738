use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::telemetry::TelemetryRecorder;

/// Write recorded telemetry in the comma-and-space text format.
///
/// Columns: t, <probe columns...>, ddh
pub fn write_telemetry<W: Write>(writer: &mut W, telemetry: &mut TelemetryRecorder) -> io::Result<()> {
    telemetry.emit(writer)
}

/// Write telemetry to a file at the given path, replacing it.
///
/// Rows are buffered and flushed before returning, so a write failure shows
/// up here rather than on drop.
pub fn write_telemetry_file(
    path: impl AsRef<Path>,
    telemetry: &mut TelemetryRecorder,
) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_telemetry(&mut writer, telemetry)?;
    writer.flush()
}
