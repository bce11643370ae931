//! Error types for the smartshelf library

use thiserror::Error;

/// Result type alias for smartshelf operations
pub type Result<T> = std::result::Result<T, ShelfError>;

/// Error taxonomy for the demo workflows
///
/// Three classes drive the user-facing behavior: validation failures reject
/// input before any network call, network/HTTP failures surface a single
/// alert with no retry, and decode failures abort the pending transform.
#[derive(Error, Debug)]
pub enum ShelfError {
    /// Input rejected before submission (wrong file type, bad parameter)
    #[error("Validation failed: {message}")]
    Validation { message: String },

    /// Request never produced a response (transport failure)
    #[error("Request to {endpoint} failed: {source}")]
    Network {
        endpoint: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Backend answered with a non-success status
    #[error("Backend returned HTTP {status} for {endpoint}")]
    Http { endpoint: String, status: u16 },

    /// Backend answered 2xx but the body was not the expected JSON
    #[error("Unexpected response from {endpoint}: {message}")]
    Response { endpoint: String, message: String },

    /// Image bytes could not be decoded into pixel data
    #[error("Failed to decode image: {message}")]
    Decode {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Tabular input could not be parsed
    #[error("CSV error: {message}")]
    Csv { message: String },

    /// File access failed (CLI paths)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ShelfError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a network error with the failing endpoint for context
    pub fn network<E>(endpoint: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Network {
            endpoint: endpoint.into(),
            source: Box::new(source),
        }
    }

    /// Create a decode error with context
    pub fn decode<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Decode {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a decode error without an underlying source
    pub fn decode_msg(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
            source: None,
        }
    }

    /// Get the blocking alert text shown to the user for this failure
    pub fn user_message(&self) -> String {
        match self {
            ShelfError::Validation { message } => message.clone(),
            ShelfError::Network { .. } | ShelfError::Http { .. } | ShelfError::Response { .. } => {
                "An error occurred while processing the request".to_string()
            }
            ShelfError::Decode { .. } => {
                "Could not read the image. Please try a different file.".to_string()
            }
            ShelfError::Csv { .. } => {
                "Could not read the CSV file. Please check its contents.".to_string()
            }
            ShelfError::Io(_) => "Could not access the file. Please try again.".to_string(),
        }
    }
}
