//! # Authentication Module
//!
//! Token management for the CRM bridge.
//!
//! ## Overview
//!
//! The bridge hands each account a single opaque API key. This crate owns how
//! that key is built from OAuth 2.0 tokens and how it is taken apart again:
//!
//! - Building the authorization URL for the provider's consent screen
//! - Exchanging an authorization code for an access/refresh token pair
//! - Deriving a fresh access token from a refresh token
//! - Encoding and decoding the `accessToken:refreshToken` credential pair
//!
//! Nothing is cached or persisted here. Every operation is one request to the
//! provider's token endpoint, driven through the injected
//! [`HttpClient`](bridge_traits::http::HttpClient).

pub mod error;
pub mod oauth;
pub mod types;

pub use error::{AuthError, Result};
pub use oauth::{AccessTokenRefresher, OAuthConfig, OAuthFlowManager};
pub use types::{CredentialPair, OAuthTokens, CREDENTIAL_SEPARATOR};
