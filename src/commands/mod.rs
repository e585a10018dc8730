//! Command implementations for the wiring-guard CLI
//!
//! This module contains the implementations for each CLI command:
//! - check: Replay a startup and report excluded components
//! - graph: Render the replayed dependency graph

pub mod check;
pub mod graph;

use miette::Result;

use crate::cli::Commands;

/// Execute a command based on CLI input
pub fn execute_command(command: Commands) -> Result<()> {
    match &command {
        Commands::Check { .. } => check::execute_check_command(command),
        Commands::Graph { .. } => graph::execute_graph_command(command),
    }
}
