//! Application error types with rich context

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types organized by layer/domain
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // Application Store Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Application not found: {id}")]
    AppNotFound { id: String },

    #[error("Application store error: {message}")]
    Store { message: String },

    // ─────────────────────────────────────────────────────────────
    // Form / Control Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid form controls: {message}")]
    InvalidControls { message: String },

    // ─────────────────────────────────────────────────────────────
    // Deployment Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Route transformation failed ({error_type}): {message}")]
    Transform { error_type: String, message: String },

    #[error("Remote operation failed: {}", message.as_deref().unwrap_or("no details"))]
    Remote { message: Option<String> },

    #[error("Operation cancelled")]
    Cancelled,

    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn app_not_found(id: impl Into<String>) -> Self {
        Self::AppNotFound { id: id.into() }
    }

    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    pub fn invalid_controls(message: impl Into<String>) -> Self {
        Self::InvalidControls {
            message: message.into(),
        }
    }

    pub fn transform(error_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transform {
            error_type: error_type.into(),
            message: message.into(),
        }
    }

    pub fn remote(message: Option<String>) -> Self {
        Self::Remote { message }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Check if this is a recoverable error
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::AppNotFound { .. }
                | Error::InvalidControls { .. }
                | Error::Transform { .. }
                | Error::Remote { .. }
                | Error::Cancelled
        )
    }

    /// Check if this error should abort the command that raised it
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::Config { .. } | Error::Store { .. } | Error::Io(_)
        )
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Context Extensions
// ─────────────────────────────────────────────────────────────────

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", context.into(), err);
            err
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", f(), err);
            err
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let err = Error::app_not_found("app-1");
        assert_eq!(err.to_string(), "Application not found: app-1");

        let err = Error::remote(Some("bad gateway".to_string()));
        assert_eq!(err.to_string(), "Remote operation failed: bad gateway");

        let err = Error::remote(None);
        assert_eq!(err.to_string(), "Remote operation failed: no details");
    }

    #[test]
    fn test_transform_error_display() {
        let err = Error::transform("missingName", "application has no name");
        assert!(err.to_string().contains("missingName"));
        assert!(err.to_string().contains("application has no name"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_error_is_fatal() {
        assert!(Error::config("bad toml").is_fatal());
        assert!(Error::store("disk full").is_fatal());
        assert!(!Error::Cancelled.is_fatal());
    }

    #[test]
    fn test_error_is_recoverable() {
        assert!(Error::Cancelled.is_recoverable());
        assert!(Error::remote(None).is_recoverable());
        assert!(Error::app_not_found("petstore").is_recoverable());
        assert!(!Error::config("bad toml").is_recoverable());
    }

    #[test]
    fn test_context_preserves_error() {
        let res: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        let err = res.context("writing store").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
