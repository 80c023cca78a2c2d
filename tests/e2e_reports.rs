// LogSift - tests/e2e_reports.rs
//
// End-to-end tests for the scan and report pipeline.
//
// These tests exercise the real filesystem: log files on disk, reports
// written to temporary directories, and the compiled binary for the
// command-line surface.

use logsift::app::pipeline::{self, RunPlan};
use logsift::app::report::generate_report;
use logsift::app::scan::{filter_log_by_regex, tally_port_traffic};
use logsift::core::model::ScanOptions;
use logsift::core::report::ReportSpec;
use logsift::platform::config::AppConfig;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

// =============================================================================
// Helpers
// =============================================================================

/// Absolute path to an on-disk fixture file.
fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// The two-line log used by the end-to-end scenario.
fn write_two_line_log(dir: &Path) -> PathBuf {
    let path = dir.join("auth.log");
    fs::write(
        &path,
        "sshd: Invalid user root from 1.2.3.4\nkernel: DPT=22 SRC=1.2.3.4\n",
    )
    .unwrap();
    path
}

fn csv_rows(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

// =============================================================================
// Two-line scenario
// =============================================================================

#[test]
fn e2e_ssh_filter_returns_only_sshd_line() {
    let dir = tempfile::tempdir().unwrap();
    let log = write_two_line_log(dir.path());

    let result = filter_log_by_regex(&log, "sshd", ScanOptions::default(), &mut std::io::sink())
        .unwrap();
    let lines: Vec<_> = result.lines().collect();
    assert_eq!(lines, vec!["sshd: Invalid user root from 1.2.3.4"]);
}

#[test]
fn e2e_port_tally_counts_single_port() {
    let dir = tempfile::tempdir().unwrap();
    let log = write_two_line_log(dir.path());

    let tally = tally_port_traffic(&log).unwrap();
    assert_eq!(tally.len(), 1);
    assert_eq!(tally.get("22"), Some(&1));
}

#[test]
fn e2e_invalid_user_report_has_one_row() {
    let dir = tempfile::tempdir().unwrap();
    let log = write_two_line_log(dir.path());

    let path = generate_report(
        &log,
        &ReportSpec::invalid_user(),
        dir.path(),
        &mut std::io::sink(),
    )
    .unwrap();
    assert_eq!(
        csv_rows(&path),
        vec!["Log Records", "sshd: Invalid user root from 1.2.3.4"]
    );
}

// =============================================================================
// Full pipeline over the fixture
// =============================================================================

#[test]
fn e2e_pipeline_over_fixture() {
    let out_dir = tempfile::tempdir().unwrap();
    let mut config = AppConfig::default();
    config.output_dir = out_dir.path().to_path_buf();

    let mut plan = RunPlan::from_config(fixture("gateway.log"), &config);
    plan.tally_json = Some(out_dir.path().join("tally.json"));

    let mut console = Vec::new();
    let summary = pipeline::run(&plan, &mut console).unwrap();

    assert_eq!(summary.ssh_matches, 4);
    assert_eq!(summary.port_tally.get("22"), Some(&2));
    assert_eq!(summary.port_tally.get("23"), Some(&1));
    assert_eq!(summary.port_tally.get("3389"), Some(&1));

    let names: Vec<_> = summary
        .reports
        .iter()
        .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
        .collect();
    assert_eq!(
        names,
        vec![
            "port_22_traffic_report.csv",
            "invalid_user_report.csv",
            "source_ip_220_195_35_40.csv",
        ]
    );

    let port_rows = csv_rows(&out_dir.path().join("port_22_traffic_report.csv"));
    assert_eq!(port_rows.len(), 3);
    assert!(port_rows[1].contains("SPT=51142 DPT=22"));
    assert!(port_rows[2].contains("SPT=40112 DPT=22"));

    let invalid_rows = csv_rows(&out_dir.path().join("invalid_user_report.csv"));
    assert_eq!(invalid_rows.len(), 3);

    let ip_rows = csv_rows(&out_dir.path().join("source_ip_220_195_35_40.csv"));
    assert_eq!(ip_rows.len(), 3);
    assert!(ip_rows[1..].iter().all(|r| r.contains("SRC=220.195.35.40")));

    let console = String::from_utf8(console).unwrap();
    assert!(console.contains(
        "The log file contains 4 records that case-insensitive match the regex \"sshd\"."
    ));
    assert_eq!(console.matches("Report generated: ").count(), 3);
    assert!(out_dir.path().join("tally.json").exists());
}

#[test]
fn e2e_pipeline_threshold_adds_busy_ports() {
    let out_dir = tempfile::tempdir().unwrap();
    let mut config = AppConfig::default();
    config.output_dir = out_dir.path().to_path_buf();
    config.ports = Vec::new();
    config.port_threshold = Some(1);
    config.invalid_user_report = false;
    config.source_ips = Vec::new();
    config.print_records = false;
    config.print_summary = false;

    let plan = RunPlan::from_config(fixture("gateway.log"), &config);
    let summary = pipeline::run(&plan, &mut std::io::sink()).unwrap();

    let names: Vec<_> = summary
        .reports
        .iter()
        .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
        .collect();
    assert_eq!(
        names,
        vec![
            "port_22_traffic_report.csv",
            "port_23_traffic_report.csv",
            "port_3389_traffic_report.csv",
        ]
    );
}

#[test]
fn e2e_pipeline_missing_log_fails_without_reports() {
    let out_dir = tempfile::tempdir().unwrap();
    let mut config = AppConfig::default();
    config.output_dir = out_dir.path().join("reports");

    let plan = RunPlan::from_config(out_dir.path().join("missing.log"), &config);
    let result = pipeline::run(&plan, &mut std::io::sink());

    let err = result.unwrap_err();
    assert_eq!(
        err.to_string(),
        format!("File not found - {}", out_dir.path().join("missing.log").display())
    );
    assert!(!config.output_dir.exists());
}

#[test]
fn e2e_invalid_configured_pattern_is_fatal() {
    let out_dir = tempfile::tempdir().unwrap();
    let mut config = AppConfig::default();
    config.output_dir = out_dir.path().to_path_buf();
    config.ssh_pattern = "sshd[".to_string();

    let plan = RunPlan::from_config(fixture("gateway.log"), &config);
    let result = pipeline::run(&plan, &mut std::io::sink());
    assert!(result.unwrap_err().to_string().starts_with("Invalid regex 'sshd['"));
}

// =============================================================================
// Command-line surface
// =============================================================================

/// The binary, pointed at an empty config.toml inside `dir`.
fn logsift(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_logsift"));
    // Keep the user's config.toml and RUST_LOG out of the picture.
    let empty = dir.join("config.toml");
    fs::write(&empty, "").unwrap();
    cmd.arg("--config").arg(empty).env_remove("RUST_LOG");
    cmd
}

#[test]
fn e2e_cli_missing_argument_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    let output = logsift(dir.path()).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("Error: Missing command line parameter #1"),
        "stdout was: {stdout}"
    );
}

#[test]
fn e2e_cli_missing_argument_checked_before_config() {
    let dir = tempfile::tempdir().unwrap();
    let broken = dir.path().join("broken.toml");
    fs::write(&broken, "[scan\nssh_pattern = ").unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_logsift"))
        .arg("--config")
        .arg(&broken)
        .env_remove("RUST_LOG")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("Error: Missing command line parameter #1"),
        "stdout was: {stdout}"
    );
}

#[test]
fn e2e_cli_missing_file_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.log");
    let output = logsift(dir.path()).arg(&missing).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains(&format!("Error: File not found - {}", missing.display())),
        "stdout was: {stdout}"
    );
}

#[test]
fn e2e_cli_writes_reports() {
    let dir = tempfile::tempdir().unwrap();
    let log = write_two_line_log(dir.path());
    let out_dir = dir.path().join("out");

    let output = logsift(dir.path())
        .arg(&log)
        .arg("--output-dir")
        .arg(&out_dir)
        .args(["--port", "22", "--source-ip", "1.2.3.4", "--quiet"])
        .output()
        .unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("sshd: Invalid user root"));
    assert!(stdout.contains("The log file contains 1 records"));
    assert!(out_dir.join("port_22_traffic_report.csv").exists());
    assert!(out_dir.join("invalid_user_report.csv").exists());
    assert_eq!(
        csv_rows(&out_dir.join("source_ip_1_2_3_4.csv")),
        vec![
            "Log Records",
            "sshd: Invalid user root from 1.2.3.4",
            "kernel: DPT=22 SRC=1.2.3.4",
        ]
    );
}
