//! # Wiring Guard - Keep Container Extensions Away From Dependency Cycles
//!
//! Wiring Guard tracks the dependency graph of the components a
//! dependency-injection container brings up, one instantiation at a time. After
//! each step it classifies the graph and excludes every component that sits on
//! a dependency cycle, or can only be reached through one, so that container
//! extensions such as proxying post-processors leave those components alone.
//!
//! ## Main Components
//!
//! - **Graph**: the incrementally built dependency graph
//! - **Detector**: the classification pass and the excluded and scanned sets
//! - **Session**: the API a host lifecycle manager drives during startup
//! - **Eligibility**: the up-front scan that rejects components a container
//!   extension could never handle
//! - **Lifecycle**: replays a startup from `components.toml` manifests
//! - **Reports**: human-readable and machine-readable startup reports
//!
//! ## Usage
//!
//! ### Driving a Session From a Host
//!
//! ```
//! use wiring_guard::core::{ComponentId, ExclusionCause};
//! use wiring_guard::detector::RecordingListener;
//! use wiring_guard::session::StartupSession;
//!
//! let mut session = StartupSession::with_listener(RecordingListener::new());
//!
//! // Scan phase: register components and their declared dependencies
//! for name in ["app", "orders", "billing"] {
//!     session.register_node(name);
//!     session.mark_scanned(name);
//! }
//! session.register_static_edge("app", "orders");
//!
//! // Instantiation phase: report what each instance had injected
//! session.report_instance_edge("orders", "billing");
//! session.report_instance_edge("billing", "orders");
//! session.run_classification();
//!
//! let orders = ComponentId::from("orders");
//! assert!(session.is_excluded(&orders));
//! assert!(!session.is_excluded(&ComponentId::from("app")));
//! assert!(
//!     session
//!         .exclusions()
//!         .iter()
//!         .all(|event| event.cause == ExclusionCause::CycleMember)
//! );
//! ```
//!
//! ### Replaying Manifests
//!
//! ```no_run
//! use std::path::PathBuf;
//!
//! use wiring_guard::discovery::ManifestDiscovery;
//! use wiring_guard::lifecycle::LifecycleReplay;
//! use wiring_guard::manifest::ComponentCatalog;
//! use wiring_guard::reports::{HumanReportGenerator, ReportGenerator};
//! use wiring_guard::session::StartupSession;
//!
//! # fn main() -> miette::Result<()> {
//! let manifests = ManifestDiscovery::new().discover_all(&[PathBuf::from("services")])?;
//! let catalog = ComponentCatalog::from_manifests(manifests)?;
//!
//! let mut session = StartupSession::new();
//! let report = LifecycleReplay::new(&catalog, None).run(&mut session);
//!
//! println!("{}", HumanReportGenerator::new(Some(20)).generate_report(&report)?);
//! # Ok(())
//! # }
//! ```

// Private modules
mod constants;
mod utils;

// Public modules
pub mod cli;
pub mod commands;
pub mod common;
pub mod config;
pub mod core;
pub mod detector;
pub mod discovery;
pub mod eligibility;
pub mod error;
pub mod executors;
pub mod graph;
pub mod lifecycle;
pub mod manifest;
pub mod reports;
pub mod session;

/// Install the `tracing` subscriber for the CLI
///
/// Filter directives come from `WIRING_GUARD_LOG`; `WIRING_GUARD_LOG_FORMAT=json`
/// switches to JSON lines. Logs go to stderr so reports on stdout stay clean.
pub fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    use crate::constants::logging::{DEFAULT_FILTER, FILTER_ENV, FORMAT_ENV};

    let filter =
        EnvFilter::try_from_env(FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let format = std::env::var(FORMAT_ENV).unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    // A subscriber may already be installed when embedded; keep that one
    let _ = match format.as_str() {
        "json" => registry
            .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
            .try_init(),
        _ => registry
            .with(fmt::layer().compact().with_writer(std::io::stderr))
            .try_init(),
    };
}

// Main entry point for the library
pub fn run() -> miette::Result<()> {
    use clap::Parser;

    use crate::cli::Cli;
    use crate::commands::execute_command;

    init_tracing();

    let cli = Cli::parse();
    execute_command(cli.command)
}
