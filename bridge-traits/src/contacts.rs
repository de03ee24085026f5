//! Contact Bridge Contract
//!
//! The shapes exchanged with the bridge-hosting framework and the
//! [`ContactAdapter`] trait every CRM adapter implements.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::error::{BridgeError, Result};

/// Label attached to a phone number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PhoneNumberLabel {
    Work,
    Home,
    Mobile,
}

impl PhoneNumberLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            PhoneNumberLabel::Work => "WORK",
            PhoneNumberLabel::Home => "HOME",
            PhoneNumberLabel::Mobile => "MOBILE",
        }
    }
}

impl fmt::Display for PhoneNumberLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneNumber {
    pub label: Option<PhoneNumberLabel>,
    pub phone_number: String,
}

/// Normalized contact handed to the bridge.
///
/// Optional fields serialize as `null` rather than being omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: String,
    pub name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub organization: Option<String>,
    pub contact_url: Option<String>,
    pub avatar_url: Option<String>,
    pub phone_numbers: Vec<PhoneNumber>,
}

/// Per-call configuration supplied by the bridge.
///
/// `api_key` is opaque to the bridge; each adapter decides its encoding.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeConfig {
    pub api_key: String,
    #[serde(default)]
    pub api_url: String,
}

impl BridgeConfig {
    pub fn new(api_key: impl Into<String>, api_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_url: api_url.into(),
        }
    }
}

// The api key carries live credentials.
impl fmt::Debug for BridgeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BridgeConfig")
            .field("api_key", &"[REDACTED]")
            .field("api_url", &self.api_url)
            .finish()
    }
}

/// Inbound OAuth2 callback request as seen by the adapter.
#[derive(Debug, Clone, Default)]
pub struct OAuth2Callback {
    pub query: HashMap<String, String>,
}

impl OAuth2Callback {
    pub fn new(query: HashMap<String, String>) -> Self {
        Self { query }
    }

    /// The authorization `code` query parameter.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::InvalidInput`] when the parameter is missing or empty.
    pub fn code(&self) -> Result<&str> {
        match self.query.get("code").map(String::as_str) {
            Some(code) if !code.is_empty() => Ok(code),
            _ => Err(BridgeError::InvalidInput(
                "OAuth2 callback is missing the `code` query parameter".to_string(),
            )),
        }
    }
}

/// Credentials produced by a completed OAuth2 flow.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuth2Credentials {
    pub api_key: String,
    pub api_url: String,
}

impl fmt::Debug for OAuth2Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuth2Credentials")
            .field("api_key", &"[REDACTED]")
            .field("api_url", &self.api_url)
            .finish()
    }
}

/// Contract between the bridge-hosting framework and a CRM adapter.
#[async_trait]
pub trait ContactAdapter: Send + Sync {
    /// Fetch the caller's contacts using the credentials in `config`.
    async fn get_contacts(&self, config: &BridgeConfig) -> Result<Vec<Contact>>;

    /// URL the user's browser is sent to in order to start authorization.
    async fn get_oauth2_redirect_url(&self) -> Result<String>;

    /// Complete authorization and return the credentials the caller must store.
    async fn handle_oauth2_callback(&self, callback: &OAuth2Callback) -> Result<OAuth2Credentials>;
}
