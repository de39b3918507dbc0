//! Error types for the homecam accessory.

use thiserror::Error;

/// Main error type for homecam operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Stream pipeline could not be launched
    #[error("Failed to launch stream pipeline: {0}")]
    Launch(String),

    /// Out-of-range video profile ordinal from the negotiated configuration
    #[error("Unknown video profile ordinal: {0}")]
    UnknownProfile(u8),

    /// Still capture invocation failure
    #[error("Still capture failed: {0}")]
    Capture(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_launch_error() {
        let err = Error::Launch("no such file or directory".to_string());
        assert_eq!(
            err.to_string(),
            "Failed to launch stream pipeline: no such file or directory"
        );
    }

    #[test]
    fn test_unknown_profile_error() {
        let err = Error::UnknownProfile(3);
        assert_eq!(err.to_string(), "Unknown video profile ordinal: 3");
    }

    #[test]
    fn test_capture_error() {
        let err = Error::Capture("spawn failed".to_string());
        assert_eq!(err.to_string(), "Still capture failed: spawn failed");
    }

    #[test]
    fn test_config_error() {
        let err = Error::Config("missing field: template".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: missing field: template"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_error_debug() {
        let err = Error::UnknownProfile(9);
        let debug_str = format!("{err:?}");
        assert!(debug_str.contains("UnknownProfile"));
    }
}
