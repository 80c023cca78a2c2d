// LogSift - core/model.rs
//
// Core data model types. Pure data definitions with no I/O and no
// platform dependencies. Shared vocabulary across all layers.

use std::collections::HashMap;

// =============================================================================
// Match Record (output of one line scan)
// =============================================================================

/// A log line that matched a scan pattern, with the pattern's capture groups.
///
/// `captures` holds groups 1..n of the first match on the line, in order.
/// A group that did not participate in the match is `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    /// The matching line with surrounding whitespace stripped.
    pub line: String,

    /// Capture groups of the first match on the line.
    pub captures: Vec<Option<String>>,
}

// =============================================================================
// Scan options
// =============================================================================

/// Flags controlling a single line scan.
///
/// Defaults: case-insensitive matching, no summary, no record echo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    /// Match without regard to letter case.
    pub case_insensitive: bool,

    /// Print a one-line count summary once the scan completes.
    pub emit_summary: bool,

    /// Print each matching line as it is found.
    pub emit_records: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            case_insensitive: true,
            emit_summary: false,
            emit_records: false,
        }
    }
}

// =============================================================================
// Scan result
// =============================================================================

/// Ordered matches of one scan, plus what is needed to describe it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanResult {
    /// Pattern text as supplied by the caller.
    pub pattern: String,

    /// Whether matching ignored case.
    pub case_insensitive: bool,

    /// Matches in file order.
    pub records: Vec<MatchRecord>,
}

impl ScanResult {
    /// Number of matching lines.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Matching lines in file order, captures dropped.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.line.as_str())
    }

    /// Human-readable one-line summary of the scan.
    pub fn summary(&self) -> String {
        format!(
            "The log file contains {} records that {}match the regex \"{}\".",
            self.records.len(),
            if self.case_insensitive {
                "case-insensitive "
            } else {
                ""
            },
            self.pattern
        )
    }
}

// =============================================================================
// Port tally
// =============================================================================

/// Destination port (as written in the log) to number of lines carrying it.
pub type PortTally = HashMap<String, usize>;
