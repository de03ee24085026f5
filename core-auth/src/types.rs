use crate::error::{AuthError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator between the two tokens in the bridge's opaque API key.
pub const CREDENTIAL_SEPARATOR: char = ':';

/// Access/refresh token pair carried by the bridge between calls.
///
/// The bridge stores a single string per account, so the pair travels as
/// `"accessToken:refreshToken"`. Inside the crate it is always this structured
/// type; [`CredentialPair::encode`] and [`CredentialPair::parse`] are the only
/// places the string form appears.
///
/// The access token may be stale. The refresh token is assumed valid until the
/// provider rejects it.
///
/// # Examples
///
/// ```
/// use core_auth::CredentialPair;
///
/// let pair = CredentialPair::parse("AT1:RT1").unwrap();
/// assert_eq!(pair.access_token(), "AT1");
/// assert_eq!(pair.refresh_token(), "RT1");
/// assert_eq!(pair.encode(), "AT1:RT1");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialPair {
    access_token: String,
    refresh_token: String,
}

impl CredentialPair {
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }

    /// Split an opaque API key on its first separator.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredential`] unless both halves are non-empty.
    pub fn parse(api_key: &str) -> Result<Self> {
        let (access_token, refresh_token) = api_key
            .split_once(CREDENTIAL_SEPARATOR)
            .ok_or_else(|| {
                AuthError::InvalidCredential("API key is not an access/refresh token pair".to_string())
            })?;

        if access_token.is_empty() {
            return Err(AuthError::InvalidCredential(
                "API key has an empty access token".to_string(),
            ));
        }
        if refresh_token.is_empty() {
            return Err(AuthError::InvalidCredential(
                "API key has an empty refresh token".to_string(),
            ));
        }

        Ok(Self::new(access_token, refresh_token))
    }

    /// Serialize to the bridge's `"accessToken:refreshToken"` form.
    pub fn encode(&self) -> String {
        format!(
            "{}{}{}",
            self.access_token, CREDENTIAL_SEPARATOR, self.refresh_token
        )
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn refresh_token(&self) -> &str {
        &self.refresh_token
    }
}

impl From<OAuthTokens> for CredentialPair {
    fn from(tokens: OAuthTokens) -> Self {
        Self::new(tokens.access_token, tokens.refresh_token)
    }
}

// Custom Debug implementation to avoid logging tokens
impl fmt::Debug for CredentialPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialPair")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .finish()
    }
}

/// OAuth 2.0 token set.
///
/// Contains the access token, refresh token, and expiration time returned by
/// the token endpoint.
///
/// # Security
///
/// Tokens should never be logged. The `Debug` implementation redacts them.
#[derive(Clone, Serialize, Deserialize)]
pub struct OAuthTokens {
    /// The access token used for API requests
    pub access_token: String,
    /// The refresh token used to obtain new access tokens
    pub refresh_token: String,
    /// When the access token expires (UTC)
    pub expires_at: chrono::DateTime<chrono::Utc>,
}

impl OAuthTokens {
    /// Create a new token set
    ///
    /// # Arguments
    ///
    /// * `access_token` - The OAuth access token
    /// * `refresh_token` - The OAuth refresh token
    /// * `expires_in` - Number of seconds until token expiration
    ///
    /// # Examples
    ///
    /// ```
    /// use core_auth::OAuthTokens;
    ///
    /// let tokens = OAuthTokens::new(
    ///     "access_token".to_string(),
    ///     "refresh_token".to_string(),
    ///     28800,
    /// );
    /// assert!(tokens.expires_at > chrono::Utc::now());
    /// ```
    pub fn new(access_token: String, refresh_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            refresh_token,
            expires_at: chrono::Utc::now() + chrono::Duration::seconds(expires_in),
        }
    }
}

// Custom Debug implementation to avoid logging tokens
impl fmt::Debug for OAuthTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthTokens")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
