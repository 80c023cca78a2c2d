// LogSift - core/tally.rs
//
// Destination-port traffic tally over firewall-style log lines.
// Core layer: pure counting over any BufRead.

use crate::core::filter::for_each_line;
use crate::core::model::PortTally;
use crate::util::constants;
use regex::Regex;
use std::io::{self, BufRead};
use std::sync::OnceLock;

fn dpt_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Constant pattern; covered by the tests below.
    RE.get_or_init(|| Regex::new(constants::DPT_MARKER_PATTERN).expect("dpt_regex: invalid regex"))
}

/// Count lines per destination port.
///
/// Each line contributes at most once: the port from its first `DPT=<digits>`
/// marker. Lines without the marker are ignored.
pub fn tally_ports<R: BufRead>(reader: R) -> io::Result<PortTally> {
    let re = dpt_regex();
    let mut tally = PortTally::new();
    for_each_line(reader, |line| {
        if let Some(port) = re.captures(line).and_then(|c| c.get(1)) {
            *tally.entry(port.as_str().to_string()).or_insert(0) += 1;
        }
    })?;
    Ok(tally)
}

/// Tally entries ordered by numeric port, for stable display and export.
///
/// Ports too large for `u64` sort after all others, by text.
pub fn sorted_entries(tally: &PortTally) -> Vec<(&str, usize)> {
    let mut entries: Vec<(&str, usize)> = tally.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    entries.sort_by(|(a, _), (b, _)| {
        match (a.parse::<u64>(), b.parse::<u64>()) {
            (Ok(x), Ok(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
            (Ok(_), Err(_)) => std::cmp::Ordering::Less,
            (Err(_), Ok(_)) => std::cmp::Ordering::Greater,
            (Err(_), Err(_)) => a.cmp(b),
        }
    });
    entries
}

/// Ports whose line count is at least `threshold`, ascending by port number.
pub fn ports_at_or_above(tally: &PortTally, threshold: usize) -> Vec<String> {
    sorted_entries(tally)
        .into_iter()
        .filter(|(_, count)| *count >= threshold)
        .map(|(port, _)| port.to_string())
        .collect()
}
