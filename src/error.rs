use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
#[error("Invalid component manifest '{file}'")]
#[diagnostic(
    code(wiring_guard::manifest_parse_error),
    help("Check the TOML syntax and the component fields near the highlighted position")
)]
pub struct ManifestParseError {
    pub file: String,
    #[source_code]
    pub source_code: NamedSource<String>,
    #[label("problem here")]
    pub span: Option<SourceSpan>,
    #[source]
    pub source: toml::de::Error,
}

#[derive(Error, Debug, Diagnostic)]
pub enum WiringGuardError {
    #[error("Failed to read file '{path}'")]
    #[diagnostic(
        code(wiring_guard::io_error),
        help("Check if the file exists and you have read permissions")
    )]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file '{path}'")]
    #[diagnostic(
        code(wiring_guard::io_error),
        help("Check that the directory exists and you have write permissions")
    )]
    FileWriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    ManifestParseError(Box<ManifestParseError>),

    #[error("Component '{name}' is declared in both '{first}' and '{second}'")]
    #[diagnostic(
        code(wiring_guard::duplicate_component),
        help("Each component identity may be declared in only one manifest entry")
    )]
    DuplicateComponent {
        name: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("JSON serialization error")]
    #[diagnostic(
        code(wiring_guard::json_error),
        help("This is likely an internal error - please report it")
    )]
    Json(#[from] serde_json::Error),

    #[error("String formatting error")]
    #[diagnostic(
        code(wiring_guard::fmt_error),
        help("This is likely an internal error - please report it")
    )]
    Fmt(#[from] std::fmt::Error),

    #[error("IO error")]
    #[diagnostic(
        code(wiring_guard::io_error),
        help("Check file permissions and disk space")
    )]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    #[diagnostic(
        code(wiring_guard::config_error),
        help("Check your command arguments and configuration")
    )]
    ConfigurationError { message: String },
}

#[cfg(test)]
mod tests {
    use std::io;

    use miette::NamedSource;

    use super::*;

    #[test]
    fn test_manifest_parse_error_display() {
        let source_code = "[[component]\nname = 1";
        let toml_err = toml::from_str::<toml::Value>(source_code).unwrap_err();

        let error = ManifestParseError {
            file: "components.toml".to_string(),
            source_code: NamedSource::new("components.toml", source_code.to_string()),
            span: Some((0, 12).into()),
            source: toml_err,
        };

        assert_eq!(
            error.to_string(),
            "Invalid component manifest 'components.toml'"
        );
    }

    #[test]
    fn test_file_read_error() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let error = WiringGuardError::FileReadError {
            path: PathBuf::from("/tmp/missing/components.toml"),
            source: io_err,
        };

        assert_eq!(
            error.to_string(),
            "Failed to read file '/tmp/missing/components.toml'"
        );
    }

    #[test]
    fn test_file_write_error() {
        let error = WiringGuardError::FileWriteError {
            path: PathBuf::from("/read-only/graph.dot"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };

        assert_eq!(
            error.to_string(),
            "Failed to write file '/read-only/graph.dot'"
        );
    }

    #[test]
    fn test_duplicate_component() {
        let error = WiringGuardError::DuplicateComponent {
            name: "com.acme.Orders".to_string(),
            first: PathBuf::from("a/components.toml"),
            second: PathBuf::from("b/components.toml"),
        };

        assert_eq!(
            error.to_string(),
            "Component 'com.acme.Orders' is declared in both 'a/components.toml' and \
             'b/components.toml'"
        );
    }

    #[test]
    fn test_configuration_error() {
        let error = WiringGuardError::ConfigurationError {
            message: "Missing required field: paths".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "Configuration error: Missing required field: paths"
        );
    }

    #[test]
    fn test_error_codes() {
        use miette::Diagnostic;

        let error = WiringGuardError::FileReadError {
            path: PathBuf::from("components.toml"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "access denied"),
        };

        assert!(error.code().is_some());
        assert!(error.help().is_some());
    }

    #[test]
    fn test_error_conversion_from_io() {
        let error: WiringGuardError = io::Error::other("some io error").into();

        match error {
            WiringGuardError::Io(_) => {}
            _ => panic!("Expected Io variant"),
        }
    }
}
