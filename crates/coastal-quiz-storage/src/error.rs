//! Storage error types.
//!
//! Stores return `anyhow::Result`, carrying one of these so callers can
//! downcast and tell a missing blob from a bad token.

use thiserror::Error;

/// Errors that can occur when reading or writing a question set.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The document does not exist.
    #[error("question set not found: {0}")]
    NotFound(String),

    /// The storage account rejected the credentials.
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The storage service returned an unexpected status.
    #[error("storage error (HTTP {status}): {message}")]
    Http { status: u16, message: String },

    /// A network error occurred.
    #[error("network error: {0}")]
    Network(String),

    /// Blob access was requested without an account name and token.
    #[error("storage credentials are not set (need AZURE_STORAGE_ACCOUNT_NAME and AZURE_STORAGE_SAS_TOKEN)")]
    MissingCredentials,

    /// The location cannot be written to.
    #[error("location is read-only: {0}")]
    ReadOnly(String),

    /// The location string could not be understood.
    #[error("invalid location: {0}")]
    InvalidLocation(String),
}

impl StorageError {
    /// Map an unsuccessful HTTP status to an error.
    pub fn from_status(status: u16, target: &str, body: String) -> Self {
        match status {
            404 => StorageError::NotFound(target.to_string()),
            401 | 403 => StorageError::AuthenticationFailed(body),
            _ => StorageError::Http {
                status,
                message: body,
            },
        }
    }

    /// Wrap a transport failure. The request URL is dropped: blob URLs carry
    /// the SAS token.
    pub fn network(target: &str, err: reqwest::Error) -> Self {
        StorageError::Network(format!("{target}: {}", err.without_url()))
    }

    /// Returns `true` if retrying the same request cannot succeed.
    pub fn is_permanent(&self) -> bool {
        !matches!(
            self,
            StorageError::Network(_) | StorageError::Http {
                status: 500..=599,
                ..
            }
        )
    }
}
