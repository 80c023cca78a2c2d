// LogSift - core/filter.rs
//
// Regex line filter: the primitive every report is built from.
// Core layer: operates on any BufRead, never opens files itself.

use crate::core::model::MatchRecord;
use crate::util::constants;
use crate::util::error::ScanError;
use regex::{Regex, RegexBuilder};
use std::io::{self, BufRead};

/// Compile a scan pattern.
///
/// Returns `InvalidPattern` if the pattern does not compile and
/// `PatternTooLong` if it exceeds `MAX_REGEX_PATTERN_LENGTH`.
pub fn compile_pattern(pattern: &str, case_insensitive: bool) -> Result<Regex, ScanError> {
    if pattern.len() > constants::MAX_REGEX_PATTERN_LENGTH {
        return Err(ScanError::PatternTooLong {
            length: pattern.len(),
            max_length: constants::MAX_REGEX_PATTERN_LENGTH,
        });
    }
    RegexBuilder::new(pattern)
        .case_insensitive(case_insensitive)
        .build()
        .map_err(|e| ScanError::InvalidPattern {
            pattern: pattern.to_string(),
            source: e,
        })
}

/// Call `f` for every line of `reader`, in order.
///
/// `\n`, `\r\n` and a lone `\r` all end a line and are removed. Invalid
/// UTF-8 is replaced rather than aborting the read.
pub fn for_each_line<R, F>(mut reader: R, mut f: F) -> io::Result<u64>
where
    R: BufRead,
    F: FnMut(&str),
{
    let mut buf = Vec::new();
    let mut lines: u64 = 0;
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        // Strip the chunk's own terminator; any `\r` left inside it ends a line.
        let mut chunk = buf.as_slice();
        if let Some(rest) = chunk.strip_suffix(b"\n") {
            chunk = rest.strip_suffix(b"\r").unwrap_or(rest);
        } else if let Some(rest) = chunk.strip_suffix(b"\r") {
            chunk = rest;
        }
        for line in chunk.split(|&b| b == b'\r') {
            lines += 1;
            f(String::from_utf8_lossy(line).as_ref());
        }
    }
    Ok(lines)
}

/// Scan `reader` and collect one `MatchRecord` per line that `regex` matches.
///
/// The search is unanchored and only the first match on a line is kept.
/// `on_match` sees each record as soon as it is found, before the scan
/// moves on; callers use it to echo records while the file is read.
pub fn scan_lines<R, F>(reader: R, regex: &Regex, mut on_match: F) -> io::Result<Vec<MatchRecord>>
where
    R: BufRead,
    F: FnMut(&MatchRecord),
{
    let mut records = Vec::new();
    let lines = for_each_line(reader, |line| {
        if let Some(caps) = regex.captures(line) {
            let record = MatchRecord {
                line: line.trim().to_string(),
                captures: caps
                    .iter()
                    .skip(1)
                    .map(|m| m.map(|m| m.as_str().to_string()))
                    .collect(),
            };
            on_match(&record);
            records.push(record);
        }
    })?;

    tracing::debug!(
        pattern = regex.as_str(),
        lines,
        matches = records.len(),
        "Line scan complete"
    );

    Ok(records)
}
