use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::common::{CommonArgs, ExclusionDisplayArgs, FormatArgs};
use crate::graph::RenderFormat;

#[derive(Parser)]
#[command(
    name = "wiring-guard",
    about = "Find the components a dependency-injection container must leave alone",
    long_about = "wiring-guard replays the startup of a dependency-injection container from \
                  declarative component manifests. It records every declared and injected \
                  dependency, and excludes the components that sit on a dependency cycle or are \
                  only reachable through one, so that container extensions such as proxying \
                  post-processors can skip them.",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Replay a startup and report excluded components
    ///
    /// Loads every `components.toml` under the given paths, runs the
    /// eligibility scan, reports declared and injected dependencies, and
    /// classifies the graph after each component comes up.
    #[command(
        long_about = "Replay the two-phase startup of a dependency-injection container. The scan \
                      phase admits eligible components together with their declared \
                      dependencies; the instantiation phase reports the dependencies injected \
                      into each instance and runs a classification pass after every component. \
                      Components on a dependency cycle, or only reachable through one, are \
                      excluded and listed with the reason."
    )]
    Check {
        #[command(flatten)]
        common: CommonArgs,

        #[command(flatten)]
        format: FormatArgs,

        #[command(flatten)]
        exclusion_display: ExclusionDisplayArgs,

        /// Exit with error code if a cycle excluded any component
        #[arg(long, env = "WIRING_GUARD_ERROR_ON_EXCLUSIONS")]
        error_on_exclusions: bool,
    },

    /// Render the replayed dependency graph
    ///
    /// Draws every admitted component and every reported dependency, with
    /// excluded components highlighted and injected dependencies dashed.
    #[command(
        long_about = "Render the component dependency graph observed during a startup replay as a \
                      Graphviz DOT file or a Mermaid diagram. Components excluded by a \
                      classification pass keep their edges in the rendering so the cycles that \
                      caused the exclusion stay visible."
    )]
    Graph {
        #[command(flatten)]
        common: CommonArgs,

        /// Graph format
        #[arg(
            short,
            long,
            value_enum,
            default_value = crate::constants::output::DEFAULT_GRAPH_FORMAT,
            env = "WIRING_GUARD_GRAPH_FORMAT"
        )]
        format: RenderFormat,

        /// Output file (stdout if not specified)
        #[arg(short, long, env = "WIRING_GUARD_OUTPUT")]
        output: Option<PathBuf>,

        /// Highlight excluded components in the graph
        #[arg(
            long,
            default_value = "true",
            action = clap::ArgAction::Set,
            env = "WIRING_GUARD_HIGHLIGHT_EXCLUSIONS"
        )]
        highlight_exclusions: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, clap::ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}
