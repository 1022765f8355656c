use thiserror::Error;

/// Unified error type for incver operations
#[derive(Error, Debug)]
pub enum IncverError {
    #[error("No version configuration found: {0}")]
    ConfigMissing(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Release error: {0}")]
    Release(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in incver
pub type Result<T> = std::result::Result<T, IncverError>;

impl IncverError {
    /// Create a missing-configuration error with context
    pub fn config_missing(msg: impl Into<String>) -> Self {
        IncverError::ConfigMissing(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        IncverError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        IncverError::Version(msg.into())
    }

    /// Create a release error with context
    pub fn release(msg: impl Into<String>) -> Self {
        IncverError::Release(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IncverError::config("test config issue");
        assert_eq!(err.to_string(), "Configuration error: test config issue");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: IncverError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_error_constructors() {
        assert!(IncverError::version("test").to_string().contains("Version"));
        assert!(IncverError::config_missing("test")
            .to_string()
            .contains("No version configuration"));
    }

    #[test]
    fn test_error_all_variants() {
        let errors = vec![
            IncverError::config_missing("no config source"),
            IncverError::config("config issue"),
            IncverError::version("version issue"),
        ];

        for err in errors {
            let msg = err.to_string();
            assert!(!msg.is_empty());
        }
    }

    #[test]
    fn test_error_empty_messages() {
        let errors = vec![
            IncverError::config(""),
            IncverError::version(""),
            IncverError::config_missing(""),
        ];

        for err in errors {
            let msg = err.to_string();
            // Even with empty message, the error type prefix should be present
            assert!(!msg.is_empty());
        }
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (IncverError::config_missing("x"), "No version configuration"),
            (IncverError::config("x"), "Configuration error"),
            (IncverError::version("x"), "Version parsing error"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }
}
