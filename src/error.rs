//! Error types and handling for d3gen
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//! Validation findings (unresolved tokens, drift) are not errors; they are
//! returned as data and reported by the command layer.

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for d3gen operations
#[derive(Error, Diagnostic, Debug)]
pub enum D3genError {
    // Front matter errors
    #[error("Malformed front matter in {path}: {reason}")]
    #[diagnostic(
        code(d3gen::frontmatter::malformed),
        help("Front matter must be a YAML mapping between two `---` delimiters")
    )]
    MalformedFrontMatter { path: String, reason: String },

    // Configuration errors
    #[error("Failed to read configuration file: {path}")]
    #[diagnostic(code(d3gen::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(d3gen::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(d3gen::config::invalid))]
    ConfigInvalid { message: String },

    // Platform errors
    #[error("Platform not supported: {platform}")]
    #[diagnostic(
        code(d3gen::platform::not_supported),
        help("Declare the platform in d3.platform.yaml, with a `layout` if it has no built-in one")
    )]
    PlatformNotSupported { platform: String },

    #[error("Invalid glob pattern '{pattern}': {reason}")]
    #[diagnostic(code(d3gen::config::invalid_glob))]
    InvalidGlob { pattern: String, reason: String },

    // File system errors
    #[error("File not found: {path}")]
    #[diagnostic(code(d3gen::fs::not_found))]
    FileNotFound { path: String },

    #[error("Failed to read file: {path}")]
    #[diagnostic(code(d3gen::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}")]
    #[diagnostic(code(d3gen::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("Failed to read directory: {path}")]
    #[diagnostic(code(d3gen::fs::read_dir_failed))]
    DirectoryReadFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(d3gen::fs::io_error))]
    IoError { message: String },
}

impl From<std::io::Error> for D3genError {
    fn from(err: std::io::Error) -> Self {
        D3genError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for D3genError {
    fn from(err: serde_yaml::Error) -> Self {
        D3genError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for D3genError {
    fn from(err: serde_json::Error) -> Self {
        D3genError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, D3genError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_front_matter_display() {
        let err = D3genError::MalformedFrontMatter {
            path: "commands/plan.md".to_string(),
            reason: "missing closing delimiter".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Malformed front matter in commands/plan.md: missing closing delimiter"
        );
    }

    #[test]
    fn test_error_code() {
        let err = D3genError::PlatformNotSupported {
            platform: "windsurf".to_string(),
        };
        assert_eq!(
            err.code().map(|c| c.to_string()),
            Some("d3gen::platform::not_supported".to_string())
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: D3genError = io_err.into();
        assert!(matches!(err, D3genError::IoError { .. }));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let parse_result: std::result::Result<serde_yaml::Value, _> =
            serde_yaml::from_str("invalid: yaml: content: [unclosed");
        let err: D3genError = parse_result.unwrap_err().into();
        assert!(matches!(err, D3genError::ConfigParseFailed { .. }));
    }

    #[test]
    fn test_json_error_conversion() {
        let parse_result: std::result::Result<serde_json::Value, _> =
            serde_json::from_str("invalid json content");
        let err: D3genError = parse_result.unwrap_err().into();
        assert!(matches!(err, D3genError::ConfigParseFailed { .. }));
    }

    #[test]
    fn test_config_parse_failed_names_path() {
        let err = D3genError::ConfigParseFailed {
            path: "canonical/d3.platform.yaml".to_string(),
            reason: "missing field `tools`".to_string(),
        };
        assert!(err.to_string().contains("canonical/d3.platform.yaml"));
        assert!(err.to_string().contains("missing field `tools`"));
    }
}
