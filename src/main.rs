// LogSift - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. config.toml loading
// 3. Logging initialisation (debug mode support)
// 4. Running the scan-and-report pipeline and mapping failures to exit codes

use clap::Parser;
use logsift::app::pipeline::{self, RunPlan};
use logsift::platform::config::{self, AppConfig, PlatformPaths};
use logsift::util::constants;
use logsift::util::error::{CliError, LogSiftError};
use logsift::util::logging;
use std::path::PathBuf;

/// LogSift - filter a system log by regex, tally port traffic, and write
/// CSV reports.
#[derive(Parser, Debug)]
#[command(name = "logsift", version, about)]
struct Cli {
    /// Log file to scan.
    #[arg(value_name = "LOG_FILE")]
    log_file: Option<PathBuf>,

    /// config.toml to use instead of the platform default.
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory reports are written to.
    #[arg(short = 'o', long = "output-dir", value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Port to generate a traffic report for (repeatable; replaces configured ports).
    #[arg(short = 'p', long = "port", value_name = "PORT",
          value_parser = clap::value_parser!(u16).range(1..))]
    ports: Vec<u16>,

    /// Source IP to generate a log for (repeatable; replaces configured IPs).
    #[arg(long = "source-ip", value_name = "IP")]
    source_ips: Vec<String>,

    /// Also export the port traffic tally as JSON.
    #[arg(long = "tally-json", value_name = "FILE")]
    tally_json: Option<PathBuf>,

    /// Do not echo each record matched by the SSH filter.
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    let log_file = match cli.log_file {
        Some(ref path) => path.clone(),
        None => fail(&LogSiftError::from(CliError::MissingArgument {
            param_number: constants::LOG_FILE_PARAM_NUMBER,
        })),
    };

    let (config_path, required) = match cli.config {
        Some(ref path) => (path.clone(), true),
        None => (PlatformPaths::resolve().config_file(), false),
    };
    let (app_config, warnings) = match config::load_config(&config_path, required) {
        Ok(loaded) => loaded,
        Err(e) => fail(&LogSiftError::from(e)),
    };

    logging::init(cli.debug, app_config.log_level.as_deref());

    tracing::debug!(
        version = constants::APP_VERSION,
        config = %config_path.display(),
        "LogSift starting"
    );
    for warning in &warnings {
        tracing::warn!(warning = %warning, "Config value ignored");
    }

    let plan = build_plan(&cli, log_file, &app_config);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = pipeline::run(&plan, &mut out) {
        fail(&e);
    }
}

/// Merge command-line overrides over the validated config.
fn build_plan(cli: &Cli, log_file: PathBuf, app_config: &AppConfig) -> RunPlan {
    let mut plan = RunPlan::from_config(log_file, app_config);
    if let Some(ref dir) = cli.output_dir {
        plan.output_dir = dir.clone();
    }
    if !cli.ports.is_empty() {
        plan.ports = cli.ports.clone();
    }
    if !cli.source_ips.is_empty() {
        plan.source_ips = cli.source_ips.clone();
    }
    if cli.quiet {
        plan.ssh_options.emit_records = false;
    }
    plan.tally_json = cli.tally_json.clone();
    plan
}

/// Report a fatal error on stdout and exit with a non-zero status.
fn fail(err: &LogSiftError) -> ! {
    tracing::debug!(error = ?err, "Fatal error");
    println!("Error: {err}");
    std::process::exit(constants::EXIT_FAILURE);
}
