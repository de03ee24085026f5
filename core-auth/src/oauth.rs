//! OAuth 2.0 Authorization Code Flow Manager
//!
//! Implements the parts of RFC 6749 a bridge adapter needs against a
//! confidential-client provider.
//!
//! # Overview
//!
//! The OAuth flow manager handles:
//! - Building the authorization URL the user's browser is sent to
//! - Exchanging an authorization code for an access/refresh token pair
//! - Deriving a fresh access token from a refresh token
//!
//! Every call is a single request to the token endpoint with an
//! `application/x-www-form-urlencoded` body. There is no caching and no retry
//! here; callers own retry policy.
//!
//! # Security
//!
//! Tokens, codes and the client secret are never logged.
//!
//! # Example
//!
//! ```no_run
//! use core_auth::oauth::{OAuthConfig, OAuthFlowManager};
//! use std::sync::Arc;
//!
//! # async fn example() -> core_auth::Result<()> {
//! # use bridge_traits::http::HttpClient;
//! # let http_client: Arc<dyn HttpClient> = todo!();
//! let config = OAuthConfig {
//!     client_id: "your-client-id".to_string(),
//!     client_secret: "your-client-secret".to_string(),
//!     redirect_uri: "https://bridge.example.com/oauth2/callback".to_string(),
//!     scope: None,
//!     auth_url: "https://podio.com/oauth/authorize".to_string(),
//!     token_url: "https://podio.com/oauth/token".to_string(),
//!     request_timeout: None,
//! };
//!
//! let flow_manager = OAuthFlowManager::new(config, http_client);
//! let auth_url = flow_manager.build_auth_url()?;
//! // Redirect user to auth_url...
//! # Ok(())
//! # }
//! ```

use crate::error::{AuthError, Result};
use crate::types::OAuthTokens;
use async_trait::async_trait;
use bridge_traits::http::{HttpClient, HttpResponse};
use core_runtime::logging::redact_if_sensitive;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// OAuth 2.0 provider configuration.
#[derive(Clone)]
pub struct OAuthConfig {
    /// OAuth client ID
    pub client_id: String,
    /// OAuth client secret
    pub client_secret: String,
    /// Redirect URI for OAuth callback
    pub redirect_uri: String,
    /// Scope to request; omitted from the authorization URL when `None`
    pub scope: Option<String>,
    /// Authorization endpoint URL
    pub auth_url: String,
    /// Token endpoint URL
    pub token_url: String,
    /// Timeout for token endpoint requests (client default when `None`)
    pub request_timeout: Option<Duration>,
}

impl std::fmt::Debug for OAuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("redirect_uri", &self.redirect_uri)
            .field("scope", &self.scope)
            .field("auth_url", &self.auth_url)
            .field("token_url", &self.token_url)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

/// Derives a new access token from a refresh token.
///
/// This is the seam the contact retry path depends on, so it can be driven by
/// a fake in tests.
#[async_trait]
pub trait AccessTokenRefresher: Send + Sync {
    async fn refresh_access_token(&self, refresh_token: &str) -> Result<String>;
}

/// OAuth 2.0 flow manager.
pub struct OAuthFlowManager {
    config: OAuthConfig,
    http_client: Arc<dyn HttpClient>,
}

impl OAuthFlowManager {
    /// Create a new OAuth flow manager with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - OAuth provider configuration
    /// * `http_client` - HTTP client for making token requests
    pub fn new(config: OAuthConfig, http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            config,
            http_client,
        }
    }

    /// Build the authorization URL.
    ///
    /// Appends `client_id`, `redirect_uri` and, when configured, `scope` to the
    /// authorization endpoint. Values are form-URL-encoded. Deterministic, with
    /// no network call.
    ///
    /// # Errors
    ///
    /// Returns an error if the authorization endpoint URL cannot be parsed.
    #[instrument(skip(self))]
    pub fn build_auth_url(&self) -> Result<String> {
        let mut url = Url::parse(&self.config.auth_url)
            .map_err(|e| AuthError::Other(format!("Invalid auth URL: {}", e)))?;

        {
            let mut query = url.query_pairs_mut();
            query.append_pair("client_id", &self.config.client_id);
            query.append_pair("redirect_uri", &self.config.redirect_uri);
            if let Some(scope) = &self.config.scope {
                query.append_pair("scope", scope);
            }
        }

        debug!("Built authorization URL");

        Ok(url.to_string())
    }

    /// Exchange an authorization code for OAuth tokens.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The code is empty
    /// - Network errors occur
    /// - The token endpoint returns a non-2xx status
    /// - The response lacks `access_token` or `refresh_token`
    #[instrument(skip(self, code))]
    pub async fn exchange_code(&self, code: &str) -> Result<OAuthTokens> {
        if code.is_empty() {
            return Err(AuthError::InvalidAuthCode(
                "Authorization code is empty".to_string(),
            ));
        }

        debug!(
            authorization_code = %redact_if_sensitive("authorization_code", code),
            "Exchanging authorization code for tokens"
        );

        let params = [
            ("grant_type", "authorization_code"),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("redirect_uri", self.config.redirect_uri.as_str()),
            ("code", code),
        ];

        let response = self
            .http_client
            .post_form(&self.config.token_url, &params, self.config.request_timeout)
            .await
            .map_err(|e| AuthError::NetworkError(e.to_string()))?;

        if !response.is_success() {
            let message = describe_failure(&response);
            warn!(
                status = response.status,
                "Token exchange failed while exchanging authorization code"
            );
            return Err(AuthError::TokenExchangeFailed(message));
        }

        let token_response = parse_token_response(&response)?;
        let refresh_token = token_response.refresh_token.ok_or_else(|| {
            AuthError::MalformedTokenResponse("response is missing refresh_token".to_string())
        })?;

        info!(
            expires_in = token_response.expires_in,
            "Exchanged authorization code for tokens"
        );

        Ok(OAuthTokens::new(
            token_response.access_token,
            refresh_token,
            token_response.expires_in,
        ))
    }

    /// Refresh an access token using a refresh token.
    ///
    /// The provider does not rotate refresh tokens, so the returned set carries
    /// the supplied refresh token unless the response names a new one.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::TokenRefreshFailed`] for a non-2xx response,
    /// [`AuthError::MalformedTokenResponse`] when `access_token` is missing, and
    /// [`AuthError::NetworkError`] for transport failures.
    #[instrument(skip(self, refresh_token))]
    pub async fn refresh_tokens(&self, refresh_token: &str) -> Result<OAuthTokens> {
        let params = [
            ("grant_type", "refresh_token"),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("refresh_token", refresh_token),
        ];

        debug!("Refreshing access token");

        let response = self
            .http_client
            .post_form(&self.config.token_url, &params, self.config.request_timeout)
            .await
            .map_err(|e| AuthError::NetworkError(e.to_string()))?;

        if !response.is_success() {
            let message = describe_failure(&response);
            warn!(status = response.status, "Token refresh failed");
            return Err(AuthError::TokenRefreshFailed(message));
        }

        let token_response = parse_token_response(&response)?;

        info!(
            expires_in = token_response.expires_in,
            "Refreshed access token"
        );

        Ok(OAuthTokens::new(
            token_response.access_token,
            token_response
                .refresh_token
                .unwrap_or_else(|| refresh_token.to_string()),
            token_response.expires_in,
        ))
    }
}

#[async_trait]
impl AccessTokenRefresher for OAuthFlowManager {
    async fn refresh_access_token(&self, refresh_token: &str) -> Result<String> {
        self.refresh_tokens(refresh_token)
            .await
            .map(|tokens| tokens.access_token)
    }
}

/// Token response from the OAuth provider.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default = "default_expires_in")]
    expires_in: i64,
}

fn default_expires_in() -> i64 {
    3600 // Default to 1 hour if not specified
}

fn parse_token_response(response: &HttpResponse) -> Result<TokenResponse> {
    response
        .json::<TokenResponse>()
        .map_err(|e| AuthError::MalformedTokenResponse(e.to_string()))
}

/// Log the token endpoint's error body and keep only the status for callers.
fn describe_failure(response: &HttpResponse) -> String {
    let error_body = response
        .text()
        .unwrap_or_else(|_| "Unable to read error response".to_string());
    debug!(status = response.status, body = %error_body, "Token endpoint error body");
    format!("Token endpoint returned {}", response.status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_traits::error::{BridgeError, Result as BridgeResult};
    use bridge_traits::http::{HttpMethod, HttpRequest};
    use bytes::Bytes;
    use mockall::mock;
    use std::collections::HashMap;

    mock! {
        HttpClient {}

        #[async_trait]
        impl HttpClient for HttpClient {
            async fn execute(&self, request: HttpRequest) -> BridgeResult<HttpResponse>;
        }
    }

    fn test_config() -> OAuthConfig {
        OAuthConfig {
            client_id: "c1".to_string(),
            client_secret: "s1".to_string(),
            redirect_uri: "https://app/cb".to_string(),
            scope: None,
            auth_url: "https://podio.com/oauth/authorize".to_string(),
            token_url: "https://podio.com/oauth/token".to_string(),
            request_timeout: Some(Duration::from_secs(10)),
        }
    }

    fn json_response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: HashMap::new(),
            body: Bytes::from(body.to_string()),
        }
    }

    fn body_of(request: &HttpRequest) -> String {
        String::from_utf8(request.body.clone().unwrap_or_default().to_vec()).unwrap()
    }

    #[test]
    fn test_build_auth_url() {
        let manager = OAuthFlowManager::new(test_config(), Arc::new(MockHttpClient::new()));
        let url = manager.build_auth_url().unwrap();

        assert_eq!(
            url,
            "https://podio.com/oauth/authorize?client_id=c1&redirect_uri=https%3A%2F%2Fapp%2Fcb"
        );
    }

    #[test]
    fn test_build_auth_url_with_scope() {
        let mut config = test_config();
        config.scope = Some("contact:read user:read".to_string());
        let manager = OAuthFlowManager::new(config, Arc::new(MockHttpClient::new()));

        let url = manager.build_auth_url().unwrap();
        assert!(url.contains("client_id=c1"));
        assert!(url.ends_with("&scope=contact%3Aread+user%3Aread"));
    }

    #[test]
    fn test_build_auth_url_encodes_client_id() {
        let mut config = test_config();
        config.client_id = "my app&id".to_string();
        let manager = OAuthFlowManager::new(config, Arc::new(MockHttpClient::new()));

        let url = manager.build_auth_url().unwrap();
        assert!(url.contains("client_id=my+app%26id"));
    }

    #[test]
    fn test_build_auth_url_invalid_url() {
        let mut config = test_config();
        config.auth_url = "not a valid url".to_string();
        let manager = OAuthFlowManager::new(config, Arc::new(MockHttpClient::new()));

        assert!(matches!(manager.build_auth_url(), Err(AuthError::Other(_))));
    }

    #[tokio::test]
    async fn test_exchange_code_success() {
        let mut http = MockHttpClient::new();
        http.expect_execute()
            .withf(|req| {
                let body = body_of(req);
                req.method == HttpMethod::Post
                    && req.url == "https://podio.com/oauth/token"
                    && req.timeout == Some(Duration::from_secs(10))
                    && body.contains("grant_type=authorization_code")
                    && body.contains("client_id=c1")
                    && body.contains("client_secret=s1")
                    && body.contains("redirect_uri=https%3A%2F%2Fapp%2Fcb")
                    && body.contains("code=xyz")
            })
            .times(1)
            .returning(|_| {
                Ok(json_response(
                    200,
                    r#"{"access_token":"AT1","refresh_token":"RT1","expires_in":28800,"token_type":"bearer"}"#,
                ))
            });

        let manager = OAuthFlowManager::new(test_config(), Arc::new(http));
        let tokens = manager.exchange_code("xyz").await.unwrap();

        assert_eq!(tokens.access_token, "AT1");
        assert_eq!(tokens.refresh_token, "RT1");
        assert!(tokens.expires_at > chrono::Utc::now() + chrono::Duration::hours(7));
    }

    #[tokio::test]
    async fn test_exchange_code_rejected() {
        let mut http = MockHttpClient::new();
        http.expect_execute()
            .times(1)
            .returning(|_| Ok(json_response(400, r#"{"error":"invalid_grant"}"#)));

        let manager = OAuthFlowManager::new(test_config(), Arc::new(http));
        let err = manager.exchange_code("bad").await.unwrap_err();

        assert!(matches!(err, AuthError::TokenExchangeFailed(ref msg) if msg.contains("400")));
        assert!(!err.to_string().contains("invalid_grant"));
    }

    #[tokio::test]
    async fn test_exchange_code_missing_refresh_token() {
        let mut http = MockHttpClient::new();
        http.expect_execute()
            .times(1)
            .returning(|_| Ok(json_response(200, r#"{"access_token":"AT1"}"#)));

        let manager = OAuthFlowManager::new(test_config(), Arc::new(http));
        let err = manager.exchange_code("xyz").await.unwrap_err();

        assert!(matches!(err, AuthError::MalformedTokenResponse(_)));
    }

    #[tokio::test]
    async fn test_exchange_code_empty_code_makes_no_request() {
        let http = MockHttpClient::new();
        let manager = OAuthFlowManager::new(test_config(), Arc::new(http));

        let err = manager.exchange_code("").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidAuthCode(_)));
    }

    #[tokio::test]
    async fn test_exchange_code_network_error() {
        let mut http = MockHttpClient::new();
        http.expect_execute()
            .times(1)
            .returning(|_| Err(BridgeError::OperationFailed("Request timed out".to_string())));

        let manager = OAuthFlowManager::new(test_config(), Arc::new(http));
        let err = manager.exchange_code("xyz").await.unwrap_err();

        assert!(matches!(err, AuthError::NetworkError(ref msg) if msg.contains("timed out")));
    }

    #[tokio::test]
    async fn test_refresh_access_token_returns_only_access_token() {
        let mut http = MockHttpClient::new();
        http.expect_execute()
            .withf(|req| {
                let body = body_of(req);
                body.contains("grant_type=refresh_token")
                    && body.contains("refresh_token=RT_VALID")
                    && body.contains("client_secret=s1")
                    && !body.contains("redirect_uri")
            })
            .times(1)
            .returning(|_| Ok(json_response(200, r#"{"access_token":"AT_NEW"}"#)));

        let manager = OAuthFlowManager::new(test_config(), Arc::new(http));
        let access_token = manager.refresh_access_token("RT_VALID").await.unwrap();

        assert_eq!(access_token, "AT_NEW");
    }

    #[tokio::test]
    async fn test_refresh_tokens_keeps_refresh_token() {
        let mut http = MockHttpClient::new();
        http.expect_execute()
            .times(1)
            .returning(|_| Ok(json_response(200, r#"{"access_token":"AT_NEW"}"#)));

        let manager = OAuthFlowManager::new(test_config(), Arc::new(http));
        let tokens = manager.refresh_tokens("RT_VALID").await.unwrap();

        assert_eq!(tokens.refresh_token, "RT_VALID");
    }

    #[tokio::test]
    async fn test_refresh_rejected() {
        let mut http = MockHttpClient::new();
        http.expect_execute()
            .times(1)
            .returning(|_| Ok(json_response(401, "unauthorized")));

        let manager = OAuthFlowManager::new(test_config(), Arc::new(http));
        let err = manager.refresh_access_token("RT_REVOKED").await.unwrap_err();

        assert!(matches!(err, AuthError::TokenRefreshFailed(_)));
        assert!(matches!(BridgeError::from(err), BridgeError::Upstream(_)));
    }

    #[tokio::test]
    async fn test_refresh_unparseable_body() {
        let mut http = MockHttpClient::new();
        http.expect_execute()
            .times(1)
            .returning(|_| Ok(json_response(200, "<html>maintenance</html>")));

        let manager = OAuthFlowManager::new(test_config(), Arc::new(http));
        let err = manager.refresh_access_token("RT").await.unwrap_err();

        assert!(matches!(err, AuthError::MalformedTokenResponse(_)));
    }

    #[test]
    fn test_token_response_deserialization_minimal() {
        let response: TokenResponse = serde_json::from_str(r#"{"access_token":"token"}"#).unwrap();
        assert_eq!(response.access_token, "token");
        assert_eq!(response.refresh_token, None);
        assert_eq!(response.expires_in, 3600);
    }

    #[test]
    fn test_config_debug_redacts_secret() {
        let rendered = format!("{:?}", test_config());
        assert!(!rendered.contains("s1\""));
        assert!(rendered.contains("[REDACTED]"));
    }
}
