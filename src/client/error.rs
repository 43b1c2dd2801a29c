//! Client errors

use thiserror::Error;

/// Errors that can occur when talking to the payments API
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Not signed in")]
    MissingSession,

    #[error("Session rejected by server")]
    Unauthorized,

    #[error("Not found")]
    NotFound,

    #[error("API error {status}: {message}")]
    Http { status: u16, message: String },

    #[error("API unavailable")]
    Unavailable,

    #[error("Request timeout")]
    Timeout,

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
}

impl ClientError {
    /// The caller has to sign in (again)
    pub fn is_auth(&self) -> bool {
        matches!(self, ClientError::MissingSession | ClientError::Unauthorized)
    }

    pub(crate) fn from_transport(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ClientError::Timeout
        } else if e.is_connect() {
            ClientError::Unavailable
        } else {
            ClientError::Request(e)
        }
    }

    pub(crate) fn from_status(status: u16, message: String) -> Self {
        match status {
            401 | 403 => ClientError::Unauthorized,
            404 => ClientError::NotFound,
            _ => ClientError::Http { status, message },
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
