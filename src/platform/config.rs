// LogSift - platform/config.rs
//
// Platform config directory resolution and config.toml loading with
// startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for LogSift configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/logsift/ or %APPDATA%\LogSift\config\)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to the current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            tracing::debug!(config = %config_dir.display(), "Platform paths resolved");
            Self { config_dir }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
            }
        }
    }

    /// Default location of config.toml.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[scan]` section.
    pub scan: ScanSection,
    /// `[reports]` section.
    pub reports: ReportsSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[scan]` config section: the SSH filter run first.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ScanSection {
    pub ssh_pattern: Option<String>,
    pub ignore_case: Option<bool>,
    pub print_records: Option<bool>,
    pub print_summary: Option<bool>,
}

/// `[reports]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ReportsSection {
    /// Directory reports are written to.
    pub output_dir: Option<String>,
    /// Ports that always get a traffic report.
    pub ports: Option<Vec<i64>>,
    /// Ports seen on at least this many lines also get a report.
    pub port_threshold: Option<i64>,
    /// Source IPs that get a log.
    pub source_ips: Option<Vec<String>>,
    /// Escape source IPs before using them as a pattern.
    pub literal_source_ip: Option<bool>,
    /// Generate the invalid user report.
    pub invalid_user: Option<bool>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// Invalid values produce warnings and fall back to defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    // -- Scan --
    pub ssh_pattern: String,
    pub ignore_case: bool,
    pub print_records: bool,
    pub print_summary: bool,

    // -- Reports --
    pub output_dir: PathBuf,
    pub ports: Vec<u16>,
    pub port_threshold: Option<usize>,
    pub source_ips: Vec<String>,
    pub literal_source_ip: bool,
    pub invalid_user_report: bool,

    // -- Logging --
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ssh_pattern: constants::DEFAULT_SSH_PATTERN.to_string(),
            ignore_case: true,
            print_records: true,
            print_summary: true,
            output_dir: PathBuf::from(constants::DEFAULT_OUTPUT_DIR),
            ports: constants::DEFAULT_REPORT_PORTS.to_vec(),
            port_threshold: None,
            source_ips: constants::DEFAULT_SOURCE_IPS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            literal_source_ip: false,
            invalid_user_report: true,
            log_level: None,
        }
    }
}

/// Load and validate a config.toml file.
///
/// A missing file yields defaults unless `required` is set (the path came
/// from `--config`). Read and parse failures are fatal. Out-of-range values
/// are returned as warnings alongside a config that uses the default for
/// each offending field.
pub fn load_config(
    config_path: &Path,
    required: bool,
) -> Result<(AppConfig, Vec<ConfigError>), ConfigError> {
    if !required && !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return Ok((AppConfig::default(), Vec::new()));
    }

    let content = std::fs::read_to_string(config_path).map_err(|e| ConfigError::Io {
        path: config_path.to_path_buf(),
        source: e,
    })?;

    let result = parse_config(&content, config_path)?;
    tracing::info!(path = %config_path.display(), "Loaded config.toml");
    Ok(result)
}

/// Parse and validate config.toml content.
pub fn parse_config(
    content: &str,
    config_path: &Path,
) -> Result<(AppConfig, Vec<ConfigError>), ConfigError> {
    let raw: RawConfig = toml::from_str(content).map_err(|e| ConfigError::TomlParse {
        path: config_path.to_path_buf(),
        source: e,
    })?;

    let mut warnings: Vec<ConfigError> = Vec::new();
    let mut config = AppConfig::default();
    let mut out_of_range = |field: &str, value: String, expected: String| {
        warnings.push(ConfigError::ValueOutOfRange {
            field: field.to_string(),
            value,
            expected,
        });
    };

    // -- Scan --
    if let Some(pattern) = raw.scan.ssh_pattern {
        if pattern.is_empty() || pattern.len() > constants::MAX_REGEX_PATTERN_LENGTH {
            out_of_range(
                "scan.ssh_pattern",
                pattern,
                format!(
                    "a non-empty regex of at most {} chars",
                    constants::MAX_REGEX_PATTERN_LENGTH
                ),
            );
        } else {
            config.ssh_pattern = pattern;
        }
    }
    if let Some(v) = raw.scan.ignore_case {
        config.ignore_case = v;
    }
    if let Some(v) = raw.scan.print_records {
        config.print_records = v;
    }
    if let Some(v) = raw.scan.print_summary {
        config.print_summary = v;
    }

    // -- Reports --
    if let Some(dir) = raw.reports.output_dir {
        if dir.is_empty() {
            out_of_range(
                "reports.output_dir",
                dir,
                "a directory path".to_string(),
            );
        } else {
            config.output_dir = PathBuf::from(dir);
        }
    }

    if let Some(ports) = raw.reports.ports {
        let mut valid = Vec::with_capacity(ports.len());
        for port in ports {
            match u16::try_from(port) {
                Ok(p) if p > 0 => {
                    if !valid.contains(&p) {
                        valid.push(p);
                    }
                }
                _ => out_of_range(
                    "reports.ports",
                    port.to_string(),
                    "1-65535".to_string(),
                ),
            }
        }
        config.ports = valid;
    }

    if let Some(threshold) = raw.reports.port_threshold {
        match usize::try_from(threshold) {
            Ok(t) if (constants::MIN_PORT_THRESHOLD..=constants::MAX_PORT_THRESHOLD)
                .contains(&t) =>
            {
                config.port_threshold = Some(t);
            }
            _ => out_of_range(
                "reports.port_threshold",
                threshold.to_string(),
                format!(
                    "{}-{}",
                    constants::MIN_PORT_THRESHOLD,
                    constants::MAX_PORT_THRESHOLD
                ),
            ),
        }
    }

    if let Some(ips) = raw.reports.source_ips {
        config.source_ips = Vec::with_capacity(ips.len());
        for ip in ips {
            let trimmed = ip.trim();
            if trimmed.is_empty() {
                out_of_range(
                    "reports.source_ips",
                    ip.clone(),
                    "a non-empty address".to_string(),
                );
            } else if !config.source_ips.iter().any(|s| s == trimmed) {
                config.source_ips.push(trimmed.to_string());
            }
        }
    }

    if let Some(v) = raw.reports.literal_source_ip {
        config.literal_source_ip = v;
    }
    if let Some(v) = raw.reports.invalid_user {
        config.invalid_user_report = v;
    }

    // -- Logging --
    if let Some(level) = raw.logging.level {
        if constants::VALID_LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.to_lowercase());
        } else {
            out_of_range(
                "logging.level",
                level,
                constants::VALID_LOG_LEVELS.join(", "),
            );
        }
    }

    if !warnings.is_empty() {
        tracing::warn!(count = warnings.len(), "Config validation produced warnings");
    }

    Ok((config, warnings))
}
