//! JSON format report generation

use serde_json::json;

use super::ReportGenerator;
use crate::error::WiringGuardError;
use crate::lifecycle::StartupReport;

pub struct JsonReportGenerator;

impl Default for JsonReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonReportGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl ReportGenerator for JsonReportGenerator {
    fn generate_report(&self, report: &StartupReport) -> Result<String, WiringGuardError> {
        // Ledger order depends on pass timing; sort for stable output
        let mut exclusions: Vec<_> = report.exclusions.iter().collect();
        exclusions.sort_by(|a, b| a.component.cmp(&b.component));

        let mut advisories: Vec<_> = report.advisories.iter().collect();
        advisories.sort_by(|a, b| (&a.source, &a.target).cmp(&(&b.source, &b.target)));

        let output = json!({
            "has_cycle_exclusions": report.has_cycle_exclusions(),
            "declared_count": report.declared,
            "accepted_count": report.accepted.len(),
            "excluded_count": report.exclusions.len(),
            "passes": report.passes,
            "accepted": report.accepted,
            "implicit": report.implicit,
            "exclusions": exclusions,
            "advisories": advisories,
        });

        serde_json::to_string_pretty(&output).map_err(WiringGuardError::Json)
    }
}
