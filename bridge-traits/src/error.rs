use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Bridge capability not available: {0}")]
    NotAvailable(String),

    /// The inbound request is missing data or carries data in the wrong shape.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The caller's credentials were rejected.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// A call to the provider failed (network, non-2xx, token endpoint).
    #[error("Upstream request failed: {0}")]
    Upstream(String),

    #[error("Bridge operation failed: {0}")]
    OperationFailed(String),
}

pub type Result<T> = std::result::Result<T, BridgeError>;
