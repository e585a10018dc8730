//! Human-readable console report generation

use std::fmt::Write;

use console::style;

use super::ReportGenerator;
use crate::core::{ExclusionCause, ExclusionEvent};
use crate::error::WiringGuardError;
use crate::lifecycle::StartupReport;
use crate::utils::string::pluralize;

pub struct HumanReportGenerator {
    max_exclusions: Option<usize>,
}

impl HumanReportGenerator {
    pub fn new(max_exclusions: Option<usize>) -> Self {
        Self { max_exclusions }
    }

    fn write_group(
        output: &mut String,
        heading: &str,
        events: &[&ExclusionEvent],
    ) -> Result<(), WiringGuardError> {
        if events.is_empty() {
            return Ok(());
        }

        writeln!(output, "  {} {}:", style("▸").yellow(), style(heading).bold())?;
        for event in events {
            writeln!(
                output,
                "    {} {} {}",
                style("•").dim(),
                style(&event.component).bold(),
                style(format!("({})", event.cause)).dim()
            )?;
        }
        writeln!(output)?;
        Ok(())
    }
}

impl ReportGenerator for HumanReportGenerator {
    fn generate_report(&self, report: &StartupReport) -> Result<String, WiringGuardError> {
        let mut output = String::new();

        if report.exclusions.is_empty() {
            write!(
                output,
                "\n{} All {} {} accepted. No dependency cycles detected.\n",
                style("✅").green().bold(),
                style(report.accepted.len()).green().bold(),
                pluralize("component", report.accepted.len())
            )?;
        } else {
            let total = report.exclusions.len();
            write!(
                output,
                "\n{} Excluded {} {} ({} accepted):\n\n",
                if report.has_cycle_exclusions() {
                    style("❌").red().bold()
                } else {
                    style("⚠️").yellow().bold()
                },
                style(total).red().bold(),
                pluralize("component", total),
                style(report.accepted.len()).green()
            )?;

            let shown: Vec<&ExclusionEvent> = match self.max_exclusions {
                Some(limit) => report.exclusions.iter().take(limit).collect(),
                None => report.exclusions.iter().collect(),
            };

            let by_cause = |wanted: fn(&ExclusionCause) -> bool| {
                shown
                    .iter()
                    .copied()
                    .filter(|event| wanted(&event.cause))
                    .collect::<Vec<_>>()
            };

            Self::write_group(
                &mut output,
                "On a dependency cycle",
                &by_cause(|cause| matches!(cause, ExclusionCause::CycleMember)),
            )?;
            Self::write_group(
                &mut output,
                "Only reachable through a cycle",
                &by_cause(|cause| matches!(cause, ExclusionCause::Unrooted)),
            )?;
            Self::write_group(
                &mut output,
                "Cut off by an excluded component",
                &by_cause(|cause| matches!(cause, ExclusionCause::Detached)),
            )?;
            Self::write_group(
                &mut output,
                "Rejected by the eligibility scan",
                &by_cause(|cause| matches!(cause, ExclusionCause::Ineligible(_))),
            )?;
            Self::write_group(
                &mut output,
                "Excluded by the host",
                &by_cause(|cause| matches!(cause, ExclusionCause::Manual)),
            )?;

            if let Some(limit) = self.max_exclusions
                && limit < total
            {
                writeln!(
                    output,
                    "{} Showing {} of {} exclusions. Use --max-exclusions to see more.\n",
                    style("ℹ️").blue(),
                    style(limit).yellow(),
                    style(total).yellow()
                )?;
            }
        }

        if !report.implicit.is_empty() {
            writeln!(
                output,
                "{} {} {} never declared, only depended on:",
                style("ℹ️").blue(),
                report.implicit.len(),
                pluralize("component", report.implicit.len())
            )?;
            for id in &report.implicit {
                writeln!(output, "    {} {}", style("•").dim(), id)?;
            }
            writeln!(output)?;
        }

        if !report.advisories.is_empty() {
            writeln!(
                output,
                "{} {} {}:",
                style("⚠️").yellow(),
                report.advisories.len(),
                pluralize("advisory", report.advisories.len())
            )?;
            for advisory in &report.advisories {
                writeln!(output, "    {} {}", style("•").dim(), advisory)?;
            }
            writeln!(output)?;
        }

        if report.has_cycle_exclusions() {
            writeln!(
                output,
                "{} Components on a cycle get no container extensions applied.",
                style("💡").yellow()
            )?;
            writeln!(
                output,
                "{} Break each cycle by removing one injected or declared dependency.",
                style("💡").yellow()
            )?;
        }

        writeln!(
            output,
            "{} {} classification {} over {} declared {}.",
            style("→").dim(),
            report.passes,
            pluralize("pass", report.passes),
            report.declared,
            pluralize("component", report.declared)
        )?;

        Ok(output)
    }
}
