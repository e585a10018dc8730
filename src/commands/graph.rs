//! Graph command implementation

use miette::{Result, WrapErr};

use crate::cli::Commands;
use crate::common::{ConfigBuilder, FromCommand};
use crate::config::GraphOptions;
use crate::error::WiringGuardError;

impl FromCommand for GraphOptions {
    fn from_command(command: Commands) -> Result<Self, WiringGuardError> {
        match command {
            Commands::Graph {
                common,
                format,
                output,
                highlight_exclusions,
            } => GraphOptions::builder()
                .with_paths(common.get_paths())
                .with_format(format)
                .with_output(output)
                .with_scan_prefix(common.scan_prefix)
                .with_highlight_exclusions(highlight_exclusions)
                .build(),
            _ => Err(WiringGuardError::ConfigurationError {
                message: "Invalid command type for GraphOptions".to_string(),
            }),
        }
    }
}

crate::impl_try_from_command!(GraphOptions);

/// Execute the graph command for rendering the replayed dependency graph
pub fn execute_graph_command(command: Commands) -> Result<()> {
    let config = GraphOptions::from_command(command)
        .wrap_err("Failed to parse graph command configuration")?;

    use crate::executors::CommandExecutor;
    use crate::executors::graph::GraphExecutor;
    GraphExecutor::execute(config)
}
