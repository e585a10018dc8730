//! Component manifests
//!
//! A manifest (`components.toml`) declares the components a host would
//! discover, with what the host knows about each before instantiation:
//!
//! ```toml
//! scan_prefix = "com.acme."
//!
//! [[component]]
//! name = "com.acme.OrderService"
//! alias = "orderService"
//! depends_on = ["com.acme.Database"]
//! injects = ["com.acme.BillingService"]
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use miette::{NamedSource, Result, SourceSpan};
use serde::Deserialize;

use crate::core::ComponentId;
use crate::eligibility::ComponentDescriptor;
use crate::error::{ManifestParseError, WiringGuardError};

/// One parsed manifest file
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComponentManifest {
    #[serde(default)]
    pub scan_prefix: Option<String>,
    #[serde(default, rename = "component")]
    pub components: Vec<ComponentDescriptor>,
    #[serde(skip)]
    pub path: PathBuf,
}

impl ComponentManifest {
    pub fn parse_file(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| WiringGuardError::FileReadError {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(Self::parse_str(&content, path)?)
    }

    pub fn parse_str(content: &str, path: &Path) -> Result<Self, WiringGuardError> {
        let mut manifest: Self = toml::from_str(content).map_err(|e| {
            let span = e
                .span()
                .map(|span| SourceSpan::new(span.start.into(), span.end - span.start));

            WiringGuardError::ManifestParseError(Box::new(ManifestParseError {
                file: path.display().to_string(),
                source_code: NamedSource::new(path.display().to_string(), content.to_string()),
                span,
                source: e,
            }))
        })?;

        manifest.path = path.to_path_buf();
        Ok(manifest)
    }
}

/// All components from a set of manifests, in declaration order
#[derive(Debug, Clone, Default)]
pub struct ComponentCatalog {
    descriptors: Vec<ComponentDescriptor>,
    index: HashMap<ComponentId, usize>,
    scan_prefix: Option<String>,
}

impl ComponentCatalog {
    /// Merge manifests, rejecting duplicate component names and conflicting
    /// scan prefixes
    pub fn from_manifests(manifests: Vec<ComponentManifest>) -> Result<Self, WiringGuardError> {
        let mut catalog = Self::default();
        let mut origins: HashMap<ComponentId, PathBuf> = HashMap::new();
        let mut prefix_origin: Option<PathBuf> = None;

        for manifest in manifests {
            if let Some(prefix) = manifest.scan_prefix {
                match (&catalog.scan_prefix, &prefix_origin) {
                    (Some(existing), Some(first)) if *existing != prefix => {
                        return Err(WiringGuardError::ConfigurationError {
                            message: format!(
                                "scan_prefix '{}' in '{}' conflicts with '{}' in '{}'",
                                prefix,
                                manifest.path.display(),
                                existing,
                                first.display()
                            ),
                        });
                    }
                    (Some(_), _) => {}
                    (None, _) => {
                        catalog.scan_prefix = Some(prefix);
                        prefix_origin = Some(manifest.path.clone());
                    }
                }
            }

            for descriptor in manifest.components {
                if let Some(first) = origins.get(&descriptor.name) {
                    return Err(WiringGuardError::DuplicateComponent {
                        name: descriptor.name.to_string(),
                        first: first.clone(),
                        second: manifest.path.clone(),
                    });
                }
                origins.insert(descriptor.name.clone(), manifest.path.clone());
                catalog
                    .index
                    .insert(descriptor.name.clone(), catalog.descriptors.len());
                catalog.descriptors.push(descriptor);
            }
        }

        Ok(catalog)
    }

    pub fn descriptors(&self) -> &[ComponentDescriptor] {
        &self.descriptors
    }

    pub fn get(&self, id: &ComponentId) -> Option<&ComponentDescriptor> {
        self.index.get(id).map(|&i| &self.descriptors[i])
    }

    pub fn scan_prefix(&self) -> Option<&str> {
        self.scan_prefix.as_deref()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}
