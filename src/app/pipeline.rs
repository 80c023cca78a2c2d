// LogSift - app/pipeline.rs
//
// Orchestration of one run: validate the log file, run the SSH filter,
// tally port traffic, then generate every requested report in turn.
// The first fatal error stops the run.

use crate::app::report;
use crate::app::scan;
use crate::core::model::{PortTally, ScanOptions};
use crate::core::report::ReportSpec;
use crate::core::tally;
use crate::platform::config::AppConfig;
use crate::platform::fs;
use crate::util::error::Result;
use std::io::Write;
use std::path::PathBuf;

/// Everything one run needs, merged from config.toml and the command line.
#[derive(Debug, Clone)]
pub struct RunPlan {
    pub log_file: PathBuf,

    /// Pattern and console flags of the initial SSH filter.
    pub ssh_pattern: String,
    pub ssh_options: ScanOptions,

    pub output_dir: PathBuf,
    /// Ports that always get a traffic report, in the order given.
    pub ports: Vec<u16>,
    /// Ports seen on at least this many lines also get a report.
    pub port_threshold: Option<usize>,
    pub invalid_user_report: bool,
    pub source_ips: Vec<String>,
    pub literal_source_ip: bool,

    /// Where to export the port tally as JSON, if anywhere.
    pub tally_json: Option<PathBuf>,
}

impl RunPlan {
    /// Build a plan for `log_file` from validated configuration.
    pub fn from_config(log_file: PathBuf, config: &AppConfig) -> Self {
        Self {
            log_file,
            ssh_pattern: config.ssh_pattern.clone(),
            ssh_options: ScanOptions {
                case_insensitive: config.ignore_case,
                emit_summary: config.print_summary,
                emit_records: config.print_records,
            },
            output_dir: config.output_dir.clone(),
            ports: config.ports.clone(),
            port_threshold: config.port_threshold,
            invalid_user_report: config.invalid_user_report,
            source_ips: config.source_ips.clone(),
            literal_source_ip: config.literal_source_ip,
            tally_json: None,
        }
    }

    /// Every report this plan produces, in generation order.
    ///
    /// Explicit ports come first, then threshold ports not already listed,
    /// then the invalid user report, then one log per source IP.
    pub fn report_specs(&self, port_tally: &PortTally) -> Vec<ReportSpec> {
        let mut ports: Vec<String> = self.ports.iter().map(u16::to_string).collect();
        if let Some(threshold) = self.port_threshold {
            for port in tally::ports_at_or_above(port_tally, threshold) {
                if !ports.contains(&port) {
                    ports.push(port);
                }
            }
        }

        let mut specs: Vec<ReportSpec> = ports.iter().map(ReportSpec::port_traffic).collect();
        if self.invalid_user_report {
            specs.push(ReportSpec::invalid_user());
        }
        specs.extend(
            self.source_ips
                .iter()
                .map(|ip| ReportSpec::source_ip(ip, self.literal_source_ip)),
        );
        specs
    }
}

/// What a completed run produced.
#[derive(Debug)]
pub struct RunSummary {
    /// Number of lines the SSH filter matched.
    pub ssh_matches: usize,
    pub port_tally: PortTally,
    /// Report files written, in generation order.
    pub reports: Vec<PathBuf>,
}

/// Execute a run, writing console output to `out`.
pub fn run<W: Write>(plan: &RunPlan, out: &mut W) -> Result<RunSummary> {
    fs::check_log_file(&plan.log_file)?;
    tracing::info!(path = %plan.log_file.display(), "Processing log file");

    let ssh = scan::filter_log_by_regex(&plan.log_file, &plan.ssh_pattern, plan.ssh_options, out)?;

    let port_tally = scan::tally_port_traffic(&plan.log_file)?;
    if let Some(ref json_path) = plan.tally_json {
        report::write_tally_json(&port_tally, json_path)?;
        scan::console(out, &format!("Port tally exported: {}", json_path.display()));
    }

    let specs = plan.report_specs(&port_tally);
    let mut reports = Vec::with_capacity(specs.len());
    for spec in &specs {
        reports.push(report::generate_report(&plan.log_file, spec, &plan.output_dir, out)?);
    }

    tracing::info!(
        ssh_matches = ssh.len(),
        reports = reports.len(),
        "Run complete"
    );

    Ok(RunSummary {
        ssh_matches: ssh.len(),
        port_tally,
        reports,
    })
}
