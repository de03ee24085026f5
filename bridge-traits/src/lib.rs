//! # Host Bridge Traits
//!
//! Contracts shared by the bridge host, the provider adapters, and the
//! platform-specific capability implementations.
//!
//! ## Overview
//!
//! This crate defines two seams:
//!
//! - [`ContactAdapter`](contacts::ContactAdapter) - the three bridge operations a
//!   CRM adapter exposes (`get_contacts`, `get_oauth2_redirect_url`,
//!   `handle_oauth2_callback`) together with the bridge-facing data shapes.
//! - [`HttpClient`](http::HttpClient) - the outbound HTTP capability adapters are
//!   written against, so they can be exercised with fakes instead of a network.
//!
//! | Capability | Implementation Crate |
//! |------------|---------------------|
//! | `HttpClient` | `bridge-desktop` (reqwest) |
//! | `ContactAdapter` | `provider-podio` |
//!
//! ## Error Handling
//!
//! All bridge traits use the [`BridgeError`](error::BridgeError) type. Adapter
//! crates keep their own error enums and convert at the boundary, choosing the
//! variant that tells the host how to respond (bad input, rejected credentials,
//! upstream failure).
//!
//! ## Thread Safety
//!
//! All bridge traits require `Send + Sync` so a single adapter instance can
//! serve concurrent requests.
//!
//! ## Examples
//!
//! ### Implementing HttpClient
//!
//! ```ignore
//! use bridge_traits::http::{HttpClient, HttpRequest, HttpResponse};
//! use bridge_traits::error::Result;
//! use async_trait::async_trait;
//!
//! pub struct MyHttpClient {
//!     client: reqwest::Client,
//! }
//!
//! #[async_trait]
//! impl HttpClient for MyHttpClient {
//!     async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
//!         // Implementation
//!         todo!()
//!     }
//! }
//! ```

pub mod contacts;
pub mod error;
pub mod http;

pub use error::BridgeError;

// Re-export commonly used types
pub use contacts::{
    BridgeConfig, Contact, ContactAdapter, OAuth2Callback, OAuth2Credentials, PhoneNumber,
    PhoneNumberLabel,
};
pub use http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
