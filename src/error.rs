//! Error types for WLBB
//!
//! Centralized error handling using thiserror.

use std::path::PathBuf;

use thiserror::Error;

/// All error types that can occur in WLBB
#[derive(Debug, Error)]
pub enum WlbbError {
    /// Agent name is too short, too long, or uses forbidden characters
    #[error("Invalid agent name '{0}': must be 3 to 20 characters of [a-z0-9_]")]
    InvalidAgentName(String),

    /// Configuration name cannot be used as a config file stem
    #[error("Invalid config name '{0}': must be 1 to 64 characters of [A-Za-z0-9_-]")]
    InvalidConfigName(String),

    /// Parameter was never added to the configuration
    #[error("{0:?} isn't a parameter")]
    NotAParameter(String),

    /// No logger destination registered under this name
    #[error("Unknown logger name: {0:?}")]
    UnknownLogger(String),

    /// Operation not implemented for this platform or environment
    #[error("Unsupported: {0}")]
    Unsupported(String),

    /// Malformed configuration text
    #[error("Parse error in {} at line {line}: {message}", path.display())]
    Parse { path: PathBuf, line: usize, message: String },

    /// Configuration content the text format cannot hold without loss
    #[error("Cannot write config: {0}")]
    Unrepresentable(String),

    /// Config built for another agent
    #[error("Config mismatch: {0}")]
    ConfigMismatch(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for WLBB operations
pub type Result<T> = std::result::Result<T, WlbbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_agent_name_error() {
        let err = WlbbError::InvalidAgentName("AB".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid agent name 'AB': must be 3 to 20 characters of [a-z0-9_]"
        );
    }

    #[test]
    fn test_not_a_parameter_error() {
        let err = WlbbError::NotAParameter("brightness".to_string());
        assert_eq!(err.to_string(), "\"brightness\" isn't a parameter");
    }

    #[test]
    fn test_unknown_logger_error() {
        let err = WlbbError::UnknownLogger("file".to_string());
        assert_eq!(err.to_string(), "Unknown logger name: \"file\"");
    }

    #[test]
    fn test_parse_error() {
        let err = WlbbError::Parse {
            path: PathBuf::from("/tmp/test.cfg"),
            line: 3,
            message: "missing section header".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Parse error in /tmp/test.cfg at line 3: missing section header"
        );
    }

    #[test]
    fn test_unrepresentable_error() {
        let err = WlbbError::Unrepresentable("key \"a=b\" in section \"A\"".to_string());
        assert_eq!(err.to_string(), "Cannot write config: key \"a=b\" in section \"A\"");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: WlbbError = io_err.into();
        assert!(matches!(err, WlbbError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_ok() -> Result<i32> {
            Ok(42)
        }

        fn returns_err() -> Result<i32> {
            Err(WlbbError::Unrepresentable("test".to_string()))
        }

        assert_eq!(returns_ok().unwrap(), 42);
        assert!(returns_err().is_err());
    }
}
