//! Error types for obs

use thiserror::Error;

/// The main error type for obs operations
#[derive(Error, Debug)]
pub enum Error {
    /// The session cookie is not valid base64
    #[error("Failed to decode Base64: {0}")]
    Decode(String),

    /// The decoded session cookie is not a session JSON object
    #[error("Failed to unmarshal JSON: {0}")]
    Parse(String),

    /// An update was attempted without an existing session cookie
    #[error("No valid cookie found")]
    NoSession,

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),
}

/// A specialized Result type for obs operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether the error was caused by what the client sent
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::Decode(_) | Error::Parse(_) | Error::NoSession)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codec_errors_are_client_errors() {
        assert!(Error::Decode("bad".into()).is_client_error());
        assert!(Error::Parse("bad".into()).is_client_error());
        assert!(Error::NoSession.is_client_error());
        assert!(!Error::Config("bad".into()).is_client_error());
    }

    #[test]
    fn test_no_session_message() {
        assert_eq!(Error::NoSession.to_string(), "No valid cookie found");
    }
}
