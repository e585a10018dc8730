//! Configuration constants for wiring-guard
//!
//! This module contains the constants used throughout the application. Most
//! CLI flags can also be set through the environment variables named here.

/// Manifest discovery configuration
pub mod discovery {
    /// File name of a component manifest
    pub const MANIFEST_FILE_NAME: &str = "components.toml";

    /// Directories never descended into while looking for manifests
    pub const SKIPPED_DIRS: &[&str] = &["target", ".git", "node_modules"];
}

/// Output formatting configuration
pub mod output {
    /// Default report format when not specified
    pub const DEFAULT_FORMAT: &str = "human";

    /// Default graph format when not specified
    pub const DEFAULT_GRAPH_FORMAT: &str = "dot";
}

/// Logging configuration
pub mod logging {
    /// Environment variable holding the `tracing` filter directives
    pub const FILTER_ENV: &str = "WIRING_GUARD_LOG";

    /// Environment variable selecting `json` or `compact` log lines
    pub const FORMAT_ENV: &str = "WIRING_GUARD_LOG_FORMAT";

    /// Filter used when `WIRING_GUARD_LOG` is unset
    pub const DEFAULT_FILTER: &str = "wiring_guard=info,warn";
}
