//! Error types for store operations.

use thiserror::Error;

/// Everything a store operation can fail with.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The request never produced a response (DNS, connect, timeout...)
    #[error("{0}")]
    Transport(String),

    /// A fetch came back with a non-2xx status
    #[error("{context}: HTTP status {status}")]
    Status { status: u16, context: &'static str },

    #[error("Failed to save settings (HTTP status {status})")]
    SaveFailed { status: u16 },

    #[error("Failed to reset settings (HTTP status {status})")]
    ResetFailed { status: u16 },

    #[error("Failed to calculate image cost (HTTP status {status})")]
    ImageCostFailed { status: u16 },

    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// An operation needs a loaded user record and there is none
    #[error("No user loaded")]
    NoUser,

    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The store actor has shut down and can no longer take commands
    #[error("Store actor is not running")]
    ActorGone,
}

impl StoreError {
    /// HTTP status carried by the error, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            StoreError::Status { status, .. }
            | StoreError::SaveFailed { status }
            | StoreError::ResetFailed { status }
            | StoreError::ImageCostFailed { status } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
