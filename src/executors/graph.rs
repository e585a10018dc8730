//! Graph command executor

use std::fs::File;
use std::io::{self, BufWriter, Write};

use console::style;
use miette::{Result, WrapErr};

use crate::config::GraphOptions;
use crate::error::WiringGuardError;
use crate::executors::{CommandExecutor, load_catalog};
use crate::graph::GraphRenderer;
use crate::lifecycle::LifecycleReplay;
use crate::session::StartupSession;

pub struct GraphExecutor;

impl CommandExecutor for GraphExecutor {
    type Config = GraphOptions;

    fn execute(config: Self::Config) -> Result<()> {
        eprintln!(
            "{} Generating {} component graph...",
            style("📊").cyan(),
            format!("{:?}", config.format).to_lowercase()
        );

        let catalog = load_catalog(&config.paths)?;

        if catalog.is_empty() {
            eprintln!("{} No components found to visualize", style("ℹ").blue());
            return Ok(());
        }

        let mut replay = LifecycleReplay::new(&catalog, config.scan_prefix.clone());
        let mut session = StartupSession::new();
        let report = replay.run(&mut session);

        let renderer = GraphRenderer::new(config.highlight_exclusions);

        // Determine output destination
        let mut output_writer: Box<dyn Write> = if let Some(output_path) = config.output.as_ref() {
            Box::new(BufWriter::new(
                File::create(output_path)
                    .map_err(|e| WiringGuardError::FileWriteError {
                        path: output_path.clone(),
                        source: e,
                    })
                    .wrap_err("Failed to create graph output file")?,
            ))
        } else {
            Box::new(io::stdout())
        };

        renderer
            .render(
                config.format,
                replay.observed(),
                &report.exclusions,
                output_writer.as_mut(),
            )
            .wrap_err("Failed to render component graph")?;

        output_writer
            .flush()
            .map_err(WiringGuardError::from)
            .wrap_err("Failed to flush graph output")?;

        if let Some(output_path) = config.output {
            eprintln!(
                "{} Graph written to {}",
                style("✓").green(),
                style(output_path.display()).bold()
            );
        }

        Ok(())
    }
}
