//! Presentation-facing report types
//!
//! Consumers render a `SimulationReport` however they like; the formatters
//! here cover plain text, JSON and per-node CSV.

pub mod formatting;

pub use formatting::{CsvFormatter, JsonFormatter, OutputFormat, SimulationReport, TextFormatter};
