use bridge_traits::error::BridgeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    /// The token endpoint rejected an authorization code exchange.
    #[error("Token exchange failed: {0}")]
    TokenExchangeFailed(String),

    /// The token endpoint rejected a refresh token.
    #[error("Token refresh failed: {0}")]
    TokenRefreshFailed(String),

    /// The token endpoint answered 2xx but without the expected fields.
    #[error("Malformed token response: {0}")]
    MalformedTokenResponse(String),

    /// The opaque credential string could not be split into a token pair.
    #[error("Invalid credential: {0}")]
    InvalidCredential(String),

    #[error("Invalid authorization code: {0}")]
    InvalidAuthCode(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, AuthError>;

impl From<AuthError> for BridgeError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::InvalidCredential(msg) => BridgeError::Unauthorized(msg),
            AuthError::InvalidAuthCode(msg) => BridgeError::InvalidInput(msg),
            AuthError::Other(msg) => BridgeError::OperationFailed(msg),
            upstream => BridgeError::Upstream(upstream.to_string()),
        }
    }
}
