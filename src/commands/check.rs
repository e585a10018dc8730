//! Check command implementation

use miette::{Result, WrapErr};

use crate::cli::Commands;
use crate::common::{ConfigBuilder, FromCommand};
use crate::config::CheckConfig;
use crate::error::WiringGuardError;

impl FromCommand for CheckConfig {
    fn from_command(command: Commands) -> Result<Self, WiringGuardError> {
        match command {
            Commands::Check {
                common,
                format,
                exclusion_display,
                error_on_exclusions,
            } => CheckConfig::builder()
                .with_paths(common.get_paths())
                .with_format(format.format)
                .with_scan_prefix(common.scan_prefix)
                .with_max_exclusions(exclusion_display.max_exclusions)
                .with_error_on_exclusions(error_on_exclusions)
                .build(),
            _ => Err(WiringGuardError::ConfigurationError {
                message: "Invalid command type for CheckConfig".to_string(),
            }),
        }
    }
}

crate::impl_try_from_command!(CheckConfig);

/// Execute the check command for replaying a startup
pub fn execute_check_command(command: Commands) -> Result<()> {
    let config = CheckConfig::from_command(command)
        .wrap_err("Failed to parse check command configuration")?;

    use crate::executors::CommandExecutor;
    use crate::executors::check::CheckExecutor;
    CheckExecutor::execute(config)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::Parser;

    use super::*;
    use crate::cli::{Cli, OutputFormat};

    #[test]
    fn test_config_from_check_command() {
        let cli = Cli::try_parse_from(["wiring-guard", "check", "app", "--max-exclusions", "2"])
            .unwrap();

        let config = CheckConfig::try_from(cli.command).unwrap();

        assert_eq!(config.paths, vec![PathBuf::from("app")]);
        assert_eq!(config.format, OutputFormat::Human);
        assert_eq!(config.max_exclusions, Some(2));
    }

    #[test]
    fn test_graph_command_is_rejected() {
        let cli = Cli::try_parse_from(["wiring-guard", "graph"]).unwrap();
        assert!(CheckConfig::from_command(cli.command).is_err());
    }
}
