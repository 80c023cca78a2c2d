// LogSift - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "LogSift";

/// Application identifier used for config directories.
pub const APP_ID: &str = "LogSift";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Command line
// =============================================================================

/// Position of the log file argument, as reported in the missing-argument error.
pub const LOG_FILE_PARAM_NUMBER: usize = 1;

/// Process exit status for any fatal error.
pub const EXIT_FAILURE: i32 = 1;

// =============================================================================
// Scanning
// =============================================================================

/// Pattern used by the SSH filter run at the start of every invocation.
pub const DEFAULT_SSH_PATTERN: &str = "sshd";

/// Destination-port marker captured by the port traffic tally.
/// Group 1 is the port number.
pub const DPT_MARKER_PATTERN: &str = r"DPT=(\d+)";

/// Literal prefix of a destination-port field in firewall log lines.
pub const DPT_MARKER: &str = "DPT=";

/// Pattern used by the invalid user report.
pub const INVALID_USER_PATTERN: &str = "invalid user";

/// Maximum regex pattern length accepted from configuration or the CLI.
pub const MAX_REGEX_PATTERN_LENGTH: usize = 4_096;

/// Maximum length of a log line included in debug output.
pub const DEBUG_MAX_LINE_PREVIEW: usize = 200;

// =============================================================================
// Reports
// =============================================================================

/// Header row of every CSV report. Reports have a single column.
pub const REPORT_HEADER: &str = "Log Records";

/// Output file name of the invalid user report.
pub const INVALID_USER_REPORT_NAME: &str = "invalid_user_report.csv";

/// Ports reported on when neither config nor CLI names any.
pub const DEFAULT_REPORT_PORTS: &[u16] = &[22];

/// Source IPs logged when neither config nor CLI names any.
pub const DEFAULT_SOURCE_IPS: &[&str] = &["220.195.35.40"];

/// Default directory reports are written to.
pub const DEFAULT_OUTPUT_DIR: &str = ".";

/// Lower bound on the configurable port traffic threshold.
pub const MIN_PORT_THRESHOLD: usize = 1;

/// Upper bound on the configurable port traffic threshold.
pub const MAX_PORT_THRESHOLD: usize = 1_000_000;

// =============================================================================
// Logging
// =============================================================================

/// Default log level. Console report output is independent of this.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Log levels accepted in config.toml.
pub const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";
