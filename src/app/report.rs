// LogSift - app/report.rs
//
// Report generation: scan with a report's fixed pattern, write the matching
// lines as CSV, confirm on the console.

use crate::app::scan::{self, console};
use crate::core::export;
use crate::core::model::{PortTally, ScanOptions};
use crate::core::report::ReportSpec;
use crate::platform::fs;
use crate::util::error::{ExportError, Result};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Generate one report into `output_dir` and return the written path.
///
/// The scan is silent; the only console output is the confirmation line.
/// The output file is created only after the scan succeeds, so a failed
/// scan leaves no partial report behind.
pub fn generate_report<W: Write>(
    log_file: &Path,
    spec: &ReportSpec,
    output_dir: &Path,
    out: &mut W,
) -> Result<PathBuf> {
    let options = ScanOptions {
        case_insensitive: spec.case_insensitive,
        emit_summary: false,
        emit_records: false,
    };
    let result = scan::filter_log_by_regex(log_file, &spec.pattern, options, &mut std::io::sink())?;

    let (path, writer) = fs::create_output(output_dir, &spec.output_name)?;
    let rows = export::export_csv(result.lines(), writer, &path)?;

    tracing::info!(
        path = %path.display(),
        pattern = %spec.pattern,
        rows,
        "Report written"
    );
    console(out, &format!("Report generated: {}", path.display()));

    Ok(path)
}

/// Write the port tally as JSON to `path`.
pub fn write_tally_json(port_tally: &PortTally, path: &Path) -> std::result::Result<usize, ExportError> {
    let file = std::fs::File::create(path).map_err(|e| ExportError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let writer = std::io::BufWriter::new(file);
    let count = export::export_tally_json(port_tally, writer, path)?;
    tracing::info!(path = %path.display(), ports = count, "Port tally exported");
    Ok(count)
}
