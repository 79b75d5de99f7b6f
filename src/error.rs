//! Error types shared by every service call and store action.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Unauthorized: {message}")]
    Unauthorized { status: u16, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {message}")]
    Validation { status: u16, message: String },

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("No user loaded")]
    NoUserLoaded,

    #[error("Identity provider error: {0}")]
    Identity(String),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ClientError {
    /// Build the error for a non-success HTTP response.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 | 403 => ClientError::Unauthorized { status, message },
            404 => ClientError::NotFound(message),
            400 | 422 => ClientError::Validation { status, message },
            _ => ClientError::Api { status, message },
        }
    }

    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Unauthorized { status, .. }
            | ClientError::Validation { status, .. }
            | ClientError::Api { status, .. } => Some(*status),
            ClientError::NotFound(_) => Some(404),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Unauthorized { .. })
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ClientError::Decode(e.to_string())
        } else {
            ClientError::Network(e.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
