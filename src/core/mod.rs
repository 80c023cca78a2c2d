// LogSift - core/mod.rs
//
// Core business logic layer.
// Works on BufRead/Write trait objects only; never opens files itself.
// Must NOT depend on: platform or app.

pub mod export;
pub mod filter;
pub mod model;
pub mod report;
pub mod tally;
