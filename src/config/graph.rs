//! Graph command configuration

use std::path::PathBuf;

use crate::error::WiringGuardError;
use crate::graph::RenderFormat;

#[derive(Debug, Clone)]
pub struct GraphOptions {
    pub paths: Vec<PathBuf>,
    pub format: RenderFormat,
    pub output: Option<PathBuf>,
    pub scan_prefix: Option<String>,
    pub highlight_exclusions: bool,
}

impl GraphOptions {
    pub fn builder() -> GraphOptionsBuilder {
        GraphOptionsBuilder::new()
    }
}

pub struct GraphOptionsBuilder {
    paths: Option<Vec<PathBuf>>,
    format: Option<RenderFormat>,
    output: Option<PathBuf>,
    scan_prefix: Option<String>,
    highlight_exclusions: bool,
}

impl Default for GraphOptionsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphOptionsBuilder {
    pub fn new() -> Self {
        Self {
            paths: None,
            format: None,
            output: None,
            scan_prefix: None,
            highlight_exclusions: true,
        }
    }

    pub fn with_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.paths = Some(paths);
        self
    }

    pub fn with_format(mut self, format: RenderFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_output(mut self, output: Option<PathBuf>) -> Self {
        self.output = output;
        self
    }

    pub fn with_scan_prefix(mut self, scan_prefix: Option<String>) -> Self {
        self.scan_prefix = scan_prefix;
        self
    }

    pub fn with_highlight_exclusions(mut self, highlight_exclusions: bool) -> Self {
        self.highlight_exclusions = highlight_exclusions;
        self
    }
}

impl crate::common::ConfigBuilder for GraphOptionsBuilder {
    type Config = GraphOptions;

    fn build(self) -> Result<Self::Config, WiringGuardError> {
        Ok(GraphOptions {
            paths: self
                .paths
                .ok_or_else(|| WiringGuardError::ConfigurationError {
                    message: "Missing required field: paths".to_string(),
                })?,
            format: self
                .format
                .ok_or_else(|| WiringGuardError::ConfigurationError {
                    message: "Missing required field: format".to_string(),
                })?,
            output: self.output,
            scan_prefix: self.scan_prefix,
            highlight_exclusions: self.highlight_exclusions,
        })
    }
}
