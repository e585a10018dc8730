//! Check command configuration

use std::path::PathBuf;

use crate::cli::OutputFormat;
use crate::error::WiringGuardError;

/// Configuration for the check command
#[derive(Debug, Clone)]
pub struct CheckConfig {
    /// Manifests or directories to load
    pub paths: Vec<PathBuf>,
    /// Output format for the report
    pub format: OutputFormat,
    /// Eligibility prefix overriding the manifests
    pub scan_prefix: Option<String>,
    /// Maximum number of exclusions to report (None = all)
    pub max_exclusions: Option<usize>,
    /// Whether to exit with error code if a cycle excluded anything
    pub error_on_exclusions: bool,
}

impl CheckConfig {
    pub fn builder() -> CheckConfigBuilder {
        CheckConfigBuilder::new()
    }
}

#[derive(Default)]
pub struct CheckConfigBuilder {
    paths: Option<Vec<PathBuf>>,
    format: Option<OutputFormat>,
    scan_prefix: Option<String>,
    max_exclusions: Option<usize>,
    error_on_exclusions: bool,
}

impl CheckConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.paths = Some(paths);
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_scan_prefix(mut self, scan_prefix: Option<String>) -> Self {
        self.scan_prefix = scan_prefix;
        self
    }

    pub fn with_max_exclusions(mut self, max_exclusions: Option<usize>) -> Self {
        self.max_exclusions = max_exclusions;
        self
    }

    pub fn with_error_on_exclusions(mut self, error_on_exclusions: bool) -> Self {
        self.error_on_exclusions = error_on_exclusions;
        self
    }
}

impl crate::common::ConfigBuilder for CheckConfigBuilder {
    type Config = CheckConfig;

    fn build(self) -> Result<Self::Config, WiringGuardError> {
        let paths = self
            .paths
            .ok_or_else(|| WiringGuardError::ConfigurationError {
                message: "Missing required field: paths".to_string(),
            })?;
        if paths.is_empty() {
            return Err(WiringGuardError::ConfigurationError {
                message: "At least one path is required".to_string(),
            });
        }
        if self.max_exclusions == Some(0) {
            return Err(WiringGuardError::ConfigurationError {
                message: "--max-exclusions must be at least 1".to_string(),
            });
        }

        Ok(CheckConfig {
            paths,
            format: self
                .format
                .ok_or_else(|| WiringGuardError::ConfigurationError {
                    message: "Missing required field: format".to_string(),
                })?,
            scan_prefix: self.scan_prefix,
            max_exclusions: self.max_exclusions,
            error_on_exclusions: self.error_on_exclusions,
        })
    }
}
