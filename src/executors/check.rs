//! Check command executor

use console::style;
use miette::{Result, WrapErr};

use crate::cli::OutputFormat;
use crate::config::CheckConfig;
use crate::executors::{CommandExecutor, load_catalog};
use crate::lifecycle::LifecycleReplay;
use crate::reports::{HumanReportGenerator, JsonReportGenerator, ReportGenerator};
use crate::session::StartupSession;
use crate::utils::string::pluralize;

pub struct CheckExecutor;

impl CommandExecutor for CheckExecutor {
    type Config = CheckConfig;

    fn execute(config: Self::Config) -> Result<()> {
        eprintln!(
            "{} Replaying component startup...\n",
            style("🔌").cyan()
        );

        let catalog = load_catalog(&config.paths)?;

        if catalog.is_empty() {
            eprintln!("{} No components found to check", style("ℹ").blue());
            return Ok(());
        }

        eprintln!(
            "  {} Loaded {} {}",
            style("→").dim(),
            style(catalog.len()).bold(),
            pluralize("component", catalog.len())
        );

        let mut replay = LifecycleReplay::new(&catalog, config.scan_prefix.clone());
        eprintln!(
            "  {} Scan prefix: {}\n",
            style("→").dim(),
            match replay.rules().scan_prefix.as_deref() {
                Some(prefix) => style(prefix.to_string()).green(),
                None => style("none".to_string()).dim(),
            }
        );

        let mut session = StartupSession::new();
        let report = replay.run(&mut session);

        let rendered = match config.format {
            OutputFormat::Human => {
                HumanReportGenerator::new(config.max_exclusions).generate_report(&report)
            }
            OutputFormat::Json => JsonReportGenerator::new().generate_report(&report),
        }
        .wrap_err("Failed to generate report")?;

        print!("{rendered}");

        // Exit with error code if a cycle excluded anything and that was requested
        if config.error_on_exclusions && report.has_cycle_exclusions() {
            std::process::exit(1);
        }

        Ok(())
    }
}
