use std::collections::HashSet;
use std::path::{Path, PathBuf};

use miette::{Result, WrapErr};
use rayon::prelude::*;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::constants::discovery::{MANIFEST_FILE_NAME, SKIPPED_DIRS};
use crate::manifest::ComponentManifest;

/// Finds and parses component manifests
pub struct ManifestDiscovery {
    seen: HashSet<PathBuf>,
}

impl Default for ManifestDiscovery {
    fn default() -> Self {
        Self::new()
    }
}

impl ManifestDiscovery {
    pub fn new() -> Self {
        Self {
            seen: HashSet::new(),
        }
    }

    /// Discover and parse every manifest under the given paths
    ///
    /// A file path is taken as a manifest as-is; a directory is walked for
    /// `components.toml` files. Missing paths are skipped with a warning.
    /// Manifests are returned sorted by path.
    pub fn discover_all(&mut self, paths: &[PathBuf]) -> Result<Vec<ComponentManifest>> {
        let mut found = Vec::new();

        for path in paths {
            if !path.exists() {
                warn!("Path '{}' does not exist", path.display());
                continue;
            }

            if path.is_file() {
                self.remember(path.to_path_buf(), &mut found);
            } else {
                self.discover_in_dir(path, &mut found);
            }
        }

        found.sort();
        debug!(count = found.len(), "discovered component manifests");

        found
            .into_par_iter()
            .map(|path| {
                ComponentManifest::parse_file(&path)
                    .wrap_err_with(|| format!("Failed to load manifest '{}'", path.display()))
            })
            .collect()
    }

    fn discover_in_dir(&mut self, dir: &Path, found: &mut Vec<PathBuf>) {
        let manifests: Vec<PathBuf> = WalkDir::new(dir)
            .into_iter()
            .filter_entry(|e| {
                let name = e.file_name().to_string_lossy();
                e.depth() == 0 || !SKIPPED_DIRS.contains(&name.as_ref())
            })
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file() && e.file_name() == MANIFEST_FILE_NAME)
            .map(|e| e.into_path())
            .collect();

        for manifest in manifests {
            self.remember(manifest, found);
        }
    }

    fn remember(&mut self, path: PathBuf, found: &mut Vec<PathBuf>) {
        let key = path.canonicalize().unwrap_or_else(|_| path.clone());
        if self.seen.insert(key) {
            found.push(path);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn write_manifest(dir: &Path, name: &str) {
        fs::create_dir_all(dir).unwrap();
        fs::write(
            dir.join(MANIFEST_FILE_NAME),
            format!("[[component]]\nname = \"{name}\"\n"),
        )
        .unwrap();
    }

    #[test]
    fn test_walks_directories_and_skips_build_output() {
        let temp = TempDir::new().unwrap();
        write_manifest(&temp.path().join("orders"), "orders");
        write_manifest(&temp.path().join("billing/nested"), "billing");
        write_manifest(&temp.path().join("target/debug"), "stale");

        let manifests = ManifestDiscovery::new()
            .discover_all(&[temp.path().to_path_buf()])
            .unwrap();

        let names: Vec<&str> = manifests
            .iter()
            .map(|m| m.components[0].name.as_str())
            .collect();
        assert_eq!(names, vec!["billing", "orders"]);
    }

    #[test]
    fn test_same_manifest_is_loaded_once() {
        let temp = TempDir::new().unwrap();
        write_manifest(temp.path(), "orders");
        let file = temp.path().join(MANIFEST_FILE_NAME);

        let manifests = ManifestDiscovery::new()
            .discover_all(&[temp.path().to_path_buf(), file])
            .unwrap();

        assert_eq!(manifests.len(), 1);
    }

    #[test]
    fn test_missing_path_is_skipped() {
        let manifests = ManifestDiscovery::new()
            .discover_all(&[PathBuf::from("/definitely/not/here")])
            .unwrap();
        assert!(manifests.is_empty());
    }

    #[test]
    fn test_parse_failure_is_reported() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(MANIFEST_FILE_NAME), "[[component]\n").unwrap();

        let result = ManifestDiscovery::new().discover_all(&[temp.path().to_path_buf()]);
        assert!(result.is_err());
    }
}
