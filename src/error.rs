//! Error types and handling for the weathervane service

use thiserror::Error;

/// Main error type for the weathervane service
#[derive(Error, Debug)]
pub enum WeathervaneError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Upstream reported no matching location
    #[error("Location not found: {message}")]
    NotFound { message: String },

    /// Upstream rejected the API credential
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// Any other non-success upstream response or network failure
    #[error("Upstream error: {message}")]
    Upstream { message: String },

    /// History persistence read/write failure
    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl WeathervaneError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new not-found error
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a new unauthorized error
    pub fn unauthorized<S: Into<String>>(message: S) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Create a new upstream error
    pub fn upstream<S: Into<String>>(message: S) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }

    /// Create a new storage error
    pub fn storage<S: Into<String>>(message: S) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Whether this error is an upstream credential rejection.
    ///
    /// The lookup path recovers from exactly this kind by serving
    /// synthetic data; every other kind propagates.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}
