//! Error types for the Podio provider

use bridge_traits::error::BridgeError;
use core_auth::AuthError;
use thiserror::Error;

/// Podio provider errors
#[derive(Error, Debug)]
pub enum PodioError {
    /// Contact API returned a non-2xx status
    #[error("Podio API error (status {status_code})")]
    ApiError { status_code: u16 },

    /// Contact API could not be reached or timed out
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Token endpoint or credential failure
    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// Result type for Podio operations
pub type Result<T> = std::result::Result<T, PodioError>;

impl From<PodioError> for BridgeError {
    fn from(error: PodioError) -> Self {
        match error {
            PodioError::ApiError { status_code } => {
                BridgeError::Upstream(format!("Contact API returned status {}", status_code))
            }
            PodioError::NetworkError(msg) => {
                BridgeError::Upstream(format!("Contact API unreachable: {}", msg))
            }
            PodioError::Auth(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = PodioError::ApiError { status_code: 401 };

        assert_eq!(error.to_string(), "Podio API error (status 401)");
    }

    #[test]
    fn test_error_conversion() {
        let bridge: BridgeError = PodioError::NetworkError("timed out".to_string()).into();
        assert!(matches!(bridge, BridgeError::Upstream(_)));

        let bridge: BridgeError =
            PodioError::Auth(AuthError::InvalidCredential("no separator".to_string())).into();
        assert!(matches!(bridge, BridgeError::Unauthorized(_)));

        let bridge: BridgeError =
            PodioError::Auth(AuthError::TokenRefreshFailed("400".to_string())).into();
        assert!(matches!(bridge, BridgeError::Upstream(_)));
    }
}
