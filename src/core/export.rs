// LogSift - core/export.rs
//
// CSV export of report records and JSON export of the port tally.
// Core layer: writes to any Write trait object.

use crate::core::model::PortTally;
use crate::core::tally;
use crate::util::constants;
use crate::util::error::ExportError;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// Write matching lines as a single-column CSV with the `Log Records` header.
///
/// Embedded commas, quotes and newlines are quoted by the CSV writer.
/// Returns the number of data rows written.
pub fn export_csv<'a, W, I>(lines: I, writer: W, export_path: &Path) -> Result<usize, ExportError>
where
    W: Write,
    I: IntoIterator<Item = &'a str>,
{
    let csv_err = |e| ExportError::Csv {
        path: export_path.to_path_buf(),
        source: e,
    };
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record([constants::REPORT_HEADER])
        .map_err(csv_err)?;

    let mut count = 0;
    for line in lines {
        csv_writer.write_record([line]).map_err(csv_err)?;
        count += 1;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    Ok(count)
}

#[derive(Serialize)]
struct PortCount<'a> {
    port: &'a str,
    count: usize,
}

/// Export the port tally as a JSON array of `{port, count}`, ascending by port.
pub fn export_tally_json<W: Write>(
    port_tally: &PortTally,
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let rows: Vec<PortCount<'_>> = tally::sorted_entries(port_tally)
        .into_iter()
        .map(|(port, count)| PortCount { port, count })
        .collect();
    serde_json::to_writer_pretty(writer, &rows).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    Ok(rows.len())
}
