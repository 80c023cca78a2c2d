// LogSift - core/report.rs
//
// Report definitions. Each report is a fixed pattern, a case flag and an
// output file name; generation is the same for all of them.

use crate::util::constants;
use std::fmt;

/// A report emitter described as data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSpec {
    /// Regex applied to every line.
    pub pattern: String,

    /// Match without regard to letter case.
    pub case_insensitive: bool,

    /// File name of the CSV written to the output directory.
    pub output_name: String,
}

impl ReportSpec {
    /// Lines carrying the literal `DPT=<port>` marker.
    ///
    /// The pattern is unanchored, so `DPT=22` also matches `DPT=2222`.
    pub fn port_traffic(port: impl fmt::Display) -> Self {
        Self {
            pattern: format!("{}{port}", constants::DPT_MARKER),
            case_insensitive: false,
            output_name: format!("port_{port}_traffic_report.csv"),
        }
    }

    /// Lines mentioning an invalid user, any letter case.
    pub fn invalid_user() -> Self {
        Self {
            pattern: constants::INVALID_USER_PATTERN.to_string(),
            case_insensitive: true,
            output_name: constants::INVALID_USER_REPORT_NAME.to_string(),
        }
    }

    /// Lines containing a source IP address.
    ///
    /// With `literal` false the address is used as a regex unchanged, so each
    /// `.` matches any character. With `literal` true it is escaped first.
    pub fn source_ip(ip: &str, literal: bool) -> Self {
        let pattern = if literal {
            regex::escape(ip)
        } else {
            if has_regex_metachars(ip) {
                tracing::warn!(
                    ip,
                    "Source IP contains regex metacharacters and is matched as a pattern; \
                     set [reports] literal_source_ip = true for literal matching"
                );
            }
            ip.to_string()
        };
        Self {
            pattern,
            case_insensitive: false,
            output_name: format!("source_ip_{}.csv", ip.replace('.', "_")),
        }
    }
}

/// True if `s` contains regex metacharacters other than `.`.
///
/// `.` is expected in every dotted-quad address and is left out.
fn has_regex_metachars(s: &str) -> bool {
    s.chars().any(|c| c != '.' && regex::escape(&c.to_string()).chars().count() > 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_traffic_spec() {
        let spec = ReportSpec::port_traffic(22);
        assert_eq!(spec.pattern, "DPT=22");
        assert!(!spec.case_insensitive);
        assert_eq!(spec.output_name, "port_22_traffic_report.csv");
    }

    #[test]
    fn test_port_traffic_accepts_tally_key() {
        let spec = ReportSpec::port_traffic("443");
        assert_eq!(spec.output_name, "port_443_traffic_report.csv");
    }

    #[test]
    fn test_invalid_user_spec() {
        let spec = ReportSpec::invalid_user();
        assert_eq!(spec.pattern, "invalid user");
        assert!(spec.case_insensitive);
        assert_eq!(spec.output_name, "invalid_user_report.csv");
    }

    #[test]
    fn test_source_ip_spec_unescaped_by_default() {
        let spec = ReportSpec::source_ip("220.195.35.40", false);
        assert_eq!(spec.pattern, "220.195.35.40");
        assert!(!spec.case_insensitive);
        assert_eq!(spec.output_name, "source_ip_220_195_35_40.csv");
    }

    #[test]
    fn test_source_ip_spec_literal_escapes_dots() {
        let spec = ReportSpec::source_ip("10.0.0.1", true);
        assert_eq!(spec.pattern, r"10\.0\.0\.1");
        assert_eq!(spec.output_name, "source_ip_10_0_0_1.csv");
    }

    #[test]
    fn test_metachar_detection() {
        assert!(!has_regex_metachars("220.195.35.40"));
        assert!(has_regex_metachars("10.0.0.1|10.0.0.2"));
        assert!(has_regex_metachars("10.0.0.[12]"));
    }
}
