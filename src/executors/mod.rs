//! Command executors that handle the actual logic for each command

pub mod check;
pub mod graph;

use std::path::PathBuf;

use miette::{Result, WrapErr};

use crate::discovery::ManifestDiscovery;
use crate::manifest::ComponentCatalog;

/// Trait for command executors
pub trait CommandExecutor {
    type Config;

    /// Execute the command with the given configuration
    fn execute(config: Self::Config) -> Result<()>;
}

/// Discover, parse and merge every manifest under `paths`
pub(crate) fn load_catalog(paths: &[PathBuf]) -> Result<ComponentCatalog> {
    let manifests = ManifestDiscovery::new()
        .discover_all(paths)
        .wrap_err("Failed to discover component manifests")?;

    ComponentCatalog::from_manifests(manifests).wrap_err("Failed to merge component manifests")
}
