//! Report generation modules for different output formats
//!
//! This module contains report generators for the `check` command:
//! - human: Human-readable console output
//! - json: JSON format for programmatic use

pub mod human;
pub mod json;

use crate::error::WiringGuardError;
use crate::lifecycle::StartupReport;

/// Common trait for all report generators
pub trait ReportGenerator {
    /// Generate a report from a replayed startup
    fn generate_report(&self, report: &StartupReport) -> Result<String, WiringGuardError>;
}

// Re-export for convenience
pub use human::HumanReportGenerator;
pub use json::JsonReportGenerator;
