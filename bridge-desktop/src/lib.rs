//! # Desktop Bridge Implementations
//!
//! Default implementations of bridge capabilities for server and desktop hosts
//! (macOS, Windows, Linux).
//!
//! ## Overview
//!
//! - `HttpClient` using `reqwest`, with bounded client and per-request timeouts
//!   and no automatic retry
//!
//! ## Usage
//!
//! ```ignore
//! use bridge_desktop::ReqwestHttpClient;
//! use std::sync::Arc;
//!
//! let http_client = Arc::new(ReqwestHttpClient::new()?);
//! // Hand it to the provider adapter
//! ```

mod http;

pub use http::ReqwestHttpClient;
