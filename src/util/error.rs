// LogSift - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// Every error carries the path or pattern it concerns so the console
// message is actionable without a backtrace.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all LogSift operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum LogSiftError {
    /// Command line was underspecified.
    Cli(CliError),

    /// Line scan or tally failed.
    Scan(ScanError),

    /// Report or tally export failed.
    Export(ExportError),

    /// Configuration loading failed.
    Config(ConfigError),
}

impl fmt::Display for LogSiftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // CLI and scan messages are shown to the user verbatim.
            Self::Cli(e) => write!(f, "{e}"),
            Self::Scan(e) => write!(f, "{e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
        }
    }
}

impl std::error::Error for LogSiftError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Cli(e) => Some(e),
            Self::Scan(e) => Some(e),
            Self::Export(e) => Some(e),
            Self::Config(e) => Some(e),
        }
    }
}

// ---------------------------------------------------------------------------
// CLI errors
// ---------------------------------------------------------------------------

/// Errors raised while interpreting the command line.
#[derive(Debug)]
pub enum CliError {
    /// A required positional parameter was not supplied.
    MissingArgument { param_number: usize },
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingArgument { param_number } => {
                write!(f, "Missing command line parameter #{param_number}")
            }
        }
    }
}

impl std::error::Error for CliError {}

impl From<CliError> for LogSiftError {
    fn from(e: CliError) -> Self {
        Self::Cli(e)
    }
}

// ---------------------------------------------------------------------------
// Scan errors
// ---------------------------------------------------------------------------

/// Errors related to scanning a log file.
#[derive(Debug)]
pub enum ScanError {
    /// The log file does not exist or cannot be opened.
    FileNotFound { path: PathBuf, source: io::Error },

    /// The regex pattern does not compile.
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },

    /// The regex pattern exceeds the maximum allowed length.
    PatternTooLong { length: usize, max_length: usize },

    /// Reading failed part-way through the file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileNotFound { path, .. } => {
                write!(f, "File not found - {}", path.display())
            }
            Self::InvalidPattern { pattern, source } => {
                write!(f, "Invalid regex '{pattern}': {source}")
            }
            Self::PatternTooLong { length, max_length } => write!(
                f,
                "Regex is {length} chars, exceeds maximum of {max_length}"
            ),
            Self::Io { path, source } => {
                write!(f, "I/O error reading '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ScanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FileNotFound { source, .. } => Some(source),
            Self::InvalidPattern { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            Self::PatternTooLong { .. } => None,
        }
    }
}

impl From<ScanError> for LogSiftError {
    fn from(e: ScanError) -> Self {
        Self::Scan(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to writing report files.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error creating or writing the output file.
    Io { path: PathBuf, source: io::Error },

    /// CSV serialisation error.
    Csv { path: PathBuf, source: csv::Error },

    /// JSON serialisation error.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Export I/O error '{}': {source}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "CSV export error '{}': {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "JSON export error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

impl From<ExportError> for LogSiftError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
///
/// `ValueOutOfRange` is non-fatal: the loader collects it as a warning and
/// keeps the default for that field.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for LogSiftError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for LogSift results.
pub type Result<T> = std::result::Result<T, LogSiftError>;
