//! # Configuration Module
//!
//! Configuration structures for the wiring-guard commands. Each command has
//! its own config module with a builder implementing
//! [`ConfigBuilder`](crate::common::ConfigBuilder).
//!
//! ## Command Configurations
//!
//! - **CheckConfig**: Configuration for the `check` command
//! - **GraphOptions**: Configuration for the `graph` command
//!
//! ## Example
//!
//! ```
//! use wiring_guard::cli::OutputFormat;
//! use wiring_guard::common::ConfigBuilder;
//! use wiring_guard::config::{CheckConfig, GraphOptions};
//! use wiring_guard::graph::RenderFormat;
//!
//! let check = CheckConfig::builder()
//!     .with_paths(vec![".".into()])
//!     .with_format(OutputFormat::Human)
//!     .with_error_on_exclusions(true)
//!     .build()
//!     .unwrap();
//! assert!(check.scan_prefix.is_none());
//!
//! let graph = GraphOptions::builder()
//!     .with_paths(vec![".".into()])
//!     .with_format(RenderFormat::Dot)
//!     .build()
//!     .unwrap();
//! assert!(graph.highlight_exclusions);
//! ```

pub mod check;
pub mod graph;

pub use check::CheckConfig;
pub use graph::GraphOptions;
