// LogSift - app/scan.rs
//
// File-level scan operations. Each call opens the log file, reads it once
// from start to end, and releases the handle before returning.
//
// Console output (record echo, summary) goes to the caller's writer so the
// binary can pass stdout and tests can pass a buffer. Console write failures
// are logged and never abort a scan.

use crate::core::filter;
use crate::core::model::{PortTally, ScanOptions, ScanResult};
use crate::core::tally;
use crate::platform::fs;
use crate::util::error::ScanError;
use crate::util::logging;
use std::io::Write;
use std::path::Path;

/// Collect every line of `log_file` that `pattern` matches, in file order.
///
/// Fails with `InvalidPattern` before the file is touched if the pattern
/// does not compile, and with `FileNotFound` if the file cannot be opened.
/// No partial result is returned on failure.
pub fn filter_log_by_regex<W: Write>(
    log_file: &Path,
    pattern: &str,
    options: ScanOptions,
    out: &mut W,
) -> Result<ScanResult, ScanError> {
    let regex = filter::compile_pattern(pattern, options.case_insensitive)?;
    let reader = fs::open_log(log_file)?;

    tracing::debug!(
        path = %log_file.display(),
        pattern,
        case_insensitive = options.case_insensitive,
        "Scanning log file"
    );

    let records = filter::scan_lines(reader, &regex, |record| {
        tracing::trace!(line = logging::preview(&record.line), "Match");
        if options.emit_records {
            console(out, &record.line);
        }
    })
    .map_err(|e| ScanError::Io {
        path: log_file.to_path_buf(),
        source: e,
    })?;

    let result = ScanResult {
        pattern: pattern.to_string(),
        case_insensitive: options.case_insensitive,
        records,
    };

    if options.emit_summary {
        console(out, &result.summary());
    }

    tracing::info!(
        path = %log_file.display(),
        pattern,
        matches = result.len(),
        "Filter complete"
    );

    Ok(result)
}

/// Count lines per destination port (`DPT=<digits>`) across `log_file`.
pub fn tally_port_traffic(log_file: &Path) -> Result<PortTally, ScanError> {
    let reader = fs::open_log(log_file)?;
    let port_tally = tally::tally_ports(reader).map_err(|e| ScanError::Io {
        path: log_file.to_path_buf(),
        source: e,
    })?;

    tracing::info!(
        path = %log_file.display(),
        ports = port_tally.len(),
        lines = port_tally.values().sum::<usize>(),
        "Port traffic tallied"
    );
    for (port, count) in tally::sorted_entries(&port_tally) {
        tracing::debug!(port, count, "Port traffic");
    }

    Ok(port_tally)
}

/// Write one console line, logging instead of failing if the writer errors.
pub(crate) fn console<W: Write>(out: &mut W, line: &str) {
    if let Err(e) = writeln!(out, "{line}") {
        tracing::warn!(error = %e, "Failed to write console output");
    }
}
