// LogSift - app/mod.rs
//
// Application layer: file-level scans, report generation, run orchestration.
// Dependencies: core and platform layers.

pub mod pipeline;
pub mod report;
pub mod scan;
