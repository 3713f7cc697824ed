//! Error types and handling for the Yatra itinerary planner

use thiserror::Error;

/// Main error type for the Yatra application
#[derive(Error, Debug)]
pub enum YatraError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Upstream provider communication errors
    #[error("API error: {message}")]
    Api { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// The geocoder returned no candidates for the query
    #[error("Location not found: {query}")]
    LocationNotFound { query: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// General application errors
    #[error("Application error: {message}")]
    General { message: String },
}

impl YatraError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new location-not-found error
    pub fn location_not_found<S: Into<String>>(query: S) -> Self {
        Self::LocationNotFound {
            query: query.into(),
        }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            YatraError::Config { .. } => {
                "Configuration error. Please check your config file and API keys.".to_string()
            }
            YatraError::Api { .. } => {
                "Unable to reach an external service. Please try again later.".to_string()
            }
            YatraError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            YatraError::LocationNotFound { query } => {
                format!("Could not find '{query}'. Please check the destination name.")
            }
            YatraError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
            YatraError::General { message } => message.clone(),
        }
    }
}

impl From<reqwest::Error> for YatraError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            YatraError::api(format!("request timed out: {err}"))
        } else if err.is_decode() {
            YatraError::api(format!("malformed response: {err}"))
        } else {
            YatraError::api(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = YatraError::config("missing API key");
        assert!(matches!(config_err, YatraError::Config { .. }));

        let api_err = YatraError::api("connection failed");
        assert!(matches!(api_err, YatraError::Api { .. }));

        let not_found = YatraError::location_not_found("Atlantis, India");
        assert!(matches!(not_found, YatraError::LocationNotFound { .. }));
        assert_eq!(not_found.to_string(), "Location not found: Atlantis, India");
    }

    #[test]
    fn test_user_messages() {
        let config_err = YatraError::config("test");
        assert!(config_err.user_message().contains("Configuration error"));

        let api_err = YatraError::api("test");
        assert!(api_err.user_message().contains("Unable to reach"));

        let validation_err = YatraError::validation("days must be at least 1");
        assert!(validation_err.user_message().contains("days must be at least 1"));

        let not_found = YatraError::location_not_found("Atlantis");
        assert!(not_found.user_message().contains("Atlantis"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: YatraError = io_err.into();
        assert!(matches!(err, YatraError::Io { .. }));
    }
}
